use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Meal, MealChanges, NewMeal, NewUser, User};
use crate::repo::{sort_recent_first, MealStore, UserStore};

/// In-memory store for testing and local runs without a database.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
    meals: Arc<Mutex<HashMap<Uuid, Meal>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users currently stored.
    pub fn user_count(&self) -> Result<usize, StoreError> {
        Ok(lock(&self.users)?.len())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|e| StoreError::Backend(format!("memory store poisoned: {e}")))
}

impl UserStore for MemoryStore {
    async fn find_user_by_session(&self, session_id: &str) -> Result<Option<User>, StoreError> {
        let users = lock(&self.users)?;
        Ok(users.values().find(|u| u.session_id == session_id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = lock(&self.users)?;
        if users.values().any(|u| u.session_id == user.session_id) {
            return Err(StoreError::Conflict(
                "users.session_id must be unique".to_string(),
            ));
        }
        let user = User {
            id: Uuid::new_v4(),
            first_name: user.first_name,
            last_name: user.last_name,
            session_id: user.session_id,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

impl MealStore for MemoryStore {
    async fn create_meal(&self, meal: NewMeal) -> Result<Meal, StoreError> {
        let meal = Meal {
            id: Uuid::new_v4(),
            name: meal.name,
            description: meal.description,
            created_at: Utc::now(),
            eaten_at: meal.eaten_at,
            diet: meal.diet,
            user_id: meal.user_id,
        };
        lock(&self.meals)?.insert(meal.id, meal.clone());
        Ok(meal)
    }

    async fn list_meals(&self, user_id: Uuid) -> Result<Vec<Meal>, StoreError> {
        let mut meals: Vec<Meal> = lock(&self.meals)?
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        sort_recent_first(&mut meals);
        Ok(meals)
    }

    async fn find_meal(&self, meal_id: Uuid) -> Result<Option<Meal>, StoreError> {
        Ok(lock(&self.meals)?.get(&meal_id).cloned())
    }

    async fn update_meal(
        &self,
        meal_id: Uuid,
        changes: MealChanges,
    ) -> Result<Option<Meal>, StoreError> {
        let mut meals = lock(&self.meals)?;
        Ok(meals.get_mut(&meal_id).map(|meal| {
            changes.apply(meal);
            meal.clone()
        }))
    }

    async fn delete_meal(&self, meal_id: Uuid) -> Result<bool, StoreError> {
        Ok(lock(&self.meals)?.remove(&meal_id).is_some())
    }
}
