//! Meal ownership checks.
//!
//! A meal may only be read, changed or deleted by the user who created it.
//! [`owned_meal`] is the single entry point handlers use before touching a
//! meal by id: an unknown id is reported as [`ApiError::NotFound`] before any
//! ownership comparison, a foreign meal as [`ApiError::Forbidden`].

use store::{Meal, MealStore, User};
use uuid::Uuid;

use crate::error::ApiError;

/// Outcome of an ownership check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Forbidden,
}

/// Whether `user` may act on `meal`.
pub fn authorize(user: &User, meal: &Meal) -> Access {
    if meal.user_id == user.id {
        Access::Allowed
    } else {
        Access::Forbidden
    }
}

/// Load `meal_id` on behalf of `user`.
pub async fn owned_meal<S: MealStore>(
    store: &S,
    user: &User,
    meal_id: Uuid,
) -> Result<Meal, ApiError> {
    let meal = store.find_meal(meal_id).await?.ok_or(ApiError::NotFound)?;

    match authorize(user, &meal) {
        Access::Allowed => Ok(meal),
        Access::Forbidden => {
            tracing::warn!("User {} denied access to meal {}", user.id, meal_id);
            Err(ApiError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use store::{MemoryStore, NewMeal, NewUser, UserStore};

    async fn setup() -> (MemoryStore, User, User, Meal) {
        let store = MemoryStore::new();
        let owner = store.create_user(NewUser::anonymous("owner")).await.unwrap();
        let other = store.create_user(NewUser::anonymous("other")).await.unwrap();
        let meal = store
            .create_meal(NewMeal {
                name: "Omelette".to_string(),
                description: None,
                eaten_at: Utc::now(),
                diet: true,
                user_id: owner.id,
            })
            .await
            .unwrap();
        (store, owner, other, meal)
    }

    #[tokio::test]
    async fn test_authorize() {
        let (_, owner, other, meal) = setup().await;
        assert_eq!(authorize(&owner, &meal), Access::Allowed);
        assert_eq!(authorize(&other, &meal), Access::Forbidden);
    }

    #[tokio::test]
    async fn test_owned_meal() {
        let (store, owner, other, meal) = setup().await;

        let loaded = owned_meal(&store, &owner, meal.id).await.unwrap();
        assert_eq!(loaded, meal);

        assert!(matches!(
            owned_meal(&store, &other, meal.id).await,
            Err(ApiError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn test_missing_meal_is_not_found() {
        let (store, owner, _, _) = setup().await;
        assert!(matches!(
            owned_meal(&store, &owner, Uuid::new_v4()).await,
            Err(ApiError::NotFound)
        ));
    }
}
