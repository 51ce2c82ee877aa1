//! # Record store traits
//!
//! Every persistence operation the service performs goes through the two
//! traits defined here, so request handling is written once and runs against
//! the in-memory [`crate::MemoryStore`] in tests and against PostgreSQL in
//! production (`api::db::PgStore`).
//!
//! ## [`UserStore`]
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`find_user_by_session`](UserStore::find_user_by_session) | Exact-match lookup of the user owning a session token. |
//! | [`create_user`](UserStore::create_user) | Inserts a user. Must fail with [`StoreError::Conflict`] when the token is already taken. |
//!
//! ## [`MealStore`]
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`create_meal`](MealStore::create_meal) | Inserts a meal, generating `id` and `created_at`. |
//! | [`list_meals`](MealStore::list_meals) | All meals of one user, most recently eaten first. |
//! | [`find_meal`](MealStore::find_meal) | Lookup by id, `None` when absent. |
//! | [`update_meal`](MealStore::update_meal) | Partial update; `None` when absent. |
//! | [`delete_meal`](MealStore::delete_meal) | Removes a meal; deleting an unknown id returns `false`, not an error. |
//!
//! None of these methods check ownership. Authorization happens one level up.

use std::future::Future;

use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Meal, MealChanges, NewMeal, NewUser, User};

/// Async storage for users.
pub trait UserStore {
    fn find_user_by_session(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;
    fn create_user(
        &self,
        user: NewUser,
    ) -> impl Future<Output = Result<User, StoreError>> + Send;
}

/// Async storage for meals.
pub trait MealStore {
    fn create_meal(
        &self,
        meal: NewMeal,
    ) -> impl Future<Output = Result<Meal, StoreError>> + Send;
    fn list_meals(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Meal>, StoreError>> + Send;
    fn find_meal(
        &self,
        meal_id: Uuid,
    ) -> impl Future<Output = Result<Option<Meal>, StoreError>> + Send;
    fn update_meal(
        &self,
        meal_id: Uuid,
        changes: MealChanges,
    ) -> impl Future<Output = Result<Option<Meal>, StoreError>> + Send;
    fn delete_meal(
        &self,
        meal_id: Uuid,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// A complete backend that can be shared across request handlers.
pub trait Store: UserStore + MealStore + Clone + Send + Sync + 'static {}

impl<T> Store for T where T: UserStore + MealStore + Clone + Send + Sync + 'static {}

/// Order meals most recently eaten first, newest record first on ties.
pub fn sort_recent_first(meals: &mut [Meal]) {
    meals.sort_by(|a, b| {
        b.eaten_at
            .cmp(&a.eaten_at)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    });
}
