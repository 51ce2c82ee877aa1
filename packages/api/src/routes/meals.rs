use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::{Meal, MealChanges, MealStore, NewMeal, Store};
use uuid::Uuid;

use crate::auth::{owned_meal, CurrentUser};
use crate::error::ApiError;
use crate::state::AppState;
use crate::summary::{summarize, Summary};

#[derive(Debug, Deserialize)]
pub struct CreateMealBody {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub eaten_at: DateTime<Utc>,
    pub diet: bool,
}

#[derive(Debug, Serialize)]
pub struct MealsResponse {
    pub meals: Vec<Meal>,
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub meal: Meal,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: Summary,
}

fn require_name(name: &str) -> Result<String, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

/// `POST /meals`
pub async fn create<S: Store>(
    State(state): State<AppState<S>>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<CreateMealBody>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(body) = body?;

    let meal = state
        .store
        .create_meal(NewMeal {
            name: require_name(&body.name)?,
            description: body.description,
            eaten_at: body.eaten_at,
            diet: body.diet,
            user_id: user.id,
        })
        .await?;

    tracing::info!("User {} created meal {}", user.id, meal.id);
    Ok(StatusCode::CREATED)
}

/// `GET /meals`
pub async fn list<S: Store>(
    State(state): State<AppState<S>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<MealsResponse>, ApiError> {
    let meals = state.store.list_meals(user.id).await?;
    tracing::debug!("Listing {} meals for user {}", meals.len(), user.id);
    Ok(Json(MealsResponse { meals }))
}

/// `GET /meals/{id}`
pub async fn show<S: Store>(
    State(state): State<AppState<S>>,
    CurrentUser(user): CurrentUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MealResponse>, ApiError> {
    let Path(id) = id?;
    let meal = owned_meal(&state.store, &user, id).await?;
    Ok(Json(MealResponse { meal }))
}

/// `PUT /meals/{id}`
pub async fn update<S: Store>(
    State(state): State<AppState<S>>,
    CurrentUser(user): CurrentUser,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<MealChanges>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let Json(mut changes) = body?;
    changes.name = changes.name.as_deref().map(require_name).transpose()?;

    owned_meal(&state.store, &user, id).await?;

    if changes.is_empty() {
        tracing::debug!("Empty update for meal {}", id);
        return Ok(StatusCode::OK);
    }

    state
        .store
        .update_meal(id, changes)
        .await?
        .ok_or(ApiError::NotFound)?;

    tracing::info!("User {} updated meal {}", user.id, id);
    Ok(StatusCode::OK)
}

/// `DELETE /meals/{id}`
pub async fn delete<S: Store>(
    State(state): State<AppState<S>>,
    CurrentUser(user): CurrentUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    owned_meal(&state.store, &user, id).await?;

    state.store.delete_meal(id).await?;

    tracing::info!("User {} deleted meal {}", user.id, id);
    Ok(StatusCode::OK)
}

/// `GET /meals/summary`
pub async fn summary<S: Store>(
    State(state): State<AppState<S>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<SummaryResponse>, ApiError> {
    let meals = state.store.list_meals(user.id).await?;
    Ok(Json(SummaryResponse {
        summary: summarize(&meals),
    }))
}
