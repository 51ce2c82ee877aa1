//! # Domain records for users and meals
//!
//! Defines the rows persisted by a [`crate::UserStore`] / [`crate::MealStore`]
//! and the inputs used to create or change them. The record types are
//! `Serialize` so the HTTP layer can return them as-is; with the `sqlx`
//! feature enabled they also derive [`sqlx::FromRow`] and map onto the
//! `users` and `meals` tables column for column.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | An anonymous caller identified by a session token. The token itself is never serialized. |
//! | [`NewUser`] | Fields needed to create a [`User`]; `id` and `created_at` are generated by the store. |
//! | [`Meal`] | A meal owned by exactly one user. Serialized with the persisted column names (`eaten_at`, `userId`, ...). |
//! | [`NewMeal`] | Fields needed to create a [`Meal`]. |
//! | [`MealChanges`] | A partial update: every `None` field is left as stored. |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name given to users created implicitly from an unseen session token.
pub const ANONYMOUS_FIRST_NAME: &str = "Anonymous";

/// A user record, one per session token.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "firstName"))]
    pub first_name: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "lastName"))]
    pub last_name: String,
    /// Opaque token carried by the session cookie.
    #[serde(skip_serializing)]
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a [`User`].
#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub session_id: String,
}

impl NewUser {
    /// A user seeded only with a session token.
    pub fn anonymous(session_id: impl Into<String>) -> Self {
        Self {
            first_name: ANONYMOUS_FIRST_NAME.to_string(),
            last_name: String::new(),
            session_id: session_id.into(),
        }
    }
}

/// A meal record.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    /// When the meal was eaten, as reported by the caller.
    pub eaten_at: DateTime<Utc>,
    /// Whether the meal is diet-compliant.
    pub diet: bool,
    /// Owning user. Never changes after creation.
    #[serde(rename = "userId")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "userId"))]
    pub user_id: Uuid,
}

/// Input for creating a [`Meal`].
#[derive(Clone, Debug, PartialEq)]
pub struct NewMeal {
    pub name: String,
    pub description: Option<String>,
    pub eaten_at: DateTime<Utc>,
    pub diet: bool,
    pub user_id: Uuid,
}

/// A partial update of a [`Meal`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MealChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub eaten_at: Option<DateTime<Utc>>,
    pub diet: Option<bool>,
}

impl MealChanges {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.eaten_at.is_none()
            && self.diet.is_none()
    }

    /// Apply the provided fields to `meal`, leaving the others untouched.
    pub fn apply(self, meal: &mut Meal) {
        if let Some(name) = self.name {
            meal.name = name;
        }
        if let Some(description) = self.description {
            meal.description = Some(description);
        }
        if let Some(eaten_at) = self.eaten_at {
            meal.eaten_at = eaten_at;
        }
        if let Some(diet) = self.diet {
            meal.diet = diet;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_meal() -> Meal {
        Meal {
            id: Uuid::new_v4(),
            name: "Oatmeal".to_string(),
            description: Some("With berries".to_string()),
            created_at: Utc::now(),
            eaten_at: "2024-07-18T08:00:00Z".parse().unwrap(),
            diet: true,
            user_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_apply_only_diet() {
        let mut meal = sample_meal();
        let before = meal.clone();

        MealChanges {
            diet: Some(false),
            ..Default::default()
        }
        .apply(&mut meal);

        assert!(!meal.diet);
        assert_eq!(meal.name, before.name);
        assert_eq!(meal.description, before.description);
        assert_eq!(meal.eaten_at, before.eaten_at);
        assert_eq!(meal.user_id, before.user_id);
    }

    #[test]
    fn test_empty_changes() {
        assert!(MealChanges::default().is_empty());
        assert!(!MealChanges {
            name: Some("Soup".to_string()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_meal_json_shape() {
        let meal = sample_meal();
        let json = to_json(&meal);
        assert!(json.contains("\"userId\""));
        assert!(json.contains("\"eaten_at\""));
        assert!(!json.contains("\"user_id\""));
    }

    #[test]
    fn test_user_hides_session_token() {
        let user = User {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            session_id: "secret-token".to_string(),
            created_at: Utc::now(),
        };
        let json = to_json(&user);
        assert!(json.contains("\"firstName\":\"Ada\""));
        assert!(!json.contains("secret-token"));
    }

    #[test]
    fn test_changes_deserialize_partial() {
        let changes: MealChanges = serde_json::from_str(r#"{"diet": true}"#).unwrap();
        assert_eq!(changes.diet, Some(true));
        assert!(changes.name.is_none());
        assert!(changes.eaten_at.is_none());
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string(value).unwrap()
    }
}
