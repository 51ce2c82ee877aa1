//! PostgreSQL implementation of the record store traits.

use chrono::Utc;
use sqlx::PgPool;
use store::{Meal, MealChanges, MealStore, NewMeal, NewUser, StoreError, User, UserStore};
use uuid::Uuid;

/// Store backed by a PostgreSQL pool. Cloning shares the pool.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgStore {
    async fn find_user_by_session(&self, session_id: &str) -> Result<Option<User>, StoreError> {
        let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE session_id = $1")
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let user: User = sqlx::query_as(
            r#"INSERT INTO users (id, session_id, "firstName", "lastName", created_at)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.session_id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}

impl MealStore for PgStore {
    async fn create_meal(&self, meal: NewMeal) -> Result<Meal, StoreError> {
        let meal: Meal = sqlx::query_as(
            r#"INSERT INTO meals (id, name, description, eaten_at, diet, "userId")
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(&meal.name)
        .bind(&meal.description)
        .bind(meal.eaten_at)
        .bind(meal.diet)
        .bind(meal.user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(meal)
    }

    async fn list_meals(&self, user_id: Uuid) -> Result<Vec<Meal>, StoreError> {
        let meals: Vec<Meal> = sqlx::query_as(
            r#"SELECT * FROM meals WHERE "userId" = $1
               ORDER BY eaten_at DESC, created_at DESC, id DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(meals)
    }

    async fn find_meal(&self, meal_id: Uuid) -> Result<Option<Meal>, StoreError> {
        let meal: Option<Meal> = sqlx::query_as("SELECT * FROM meals WHERE id = $1")
            .bind(meal_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(meal)
    }

    async fn update_meal(
        &self,
        meal_id: Uuid,
        changes: MealChanges,
    ) -> Result<Option<Meal>, StoreError> {
        // COALESCE keeps the stored value for every field left out of the update.
        let meal: Option<Meal> = sqlx::query_as(
            "UPDATE meals SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                eaten_at = COALESCE($4, eaten_at),
                diet = COALESCE($5, diet)
             WHERE id = $1
             RETURNING *",
        )
        .bind(meal_id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.eaten_at)
        .bind(changes.diet)
        .fetch_optional(&self.pool)
        .await?;
        Ok(meal)
    }

    async fn delete_meal(&self, meal_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1")
            .bind(meal_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
