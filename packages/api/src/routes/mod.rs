//! # HTTP routes
//!
//! | Method | Path | Handler | Success |
//! |--------|------|---------|---------|
//! | `POST` | `/users` | [`users::create`] | 201 `{user}`, sets the session cookie; 200 with the existing user when the session already has one |
//! | `GET` | `/users/me` | [`users::me`] | 200 `{user}` |
//! | `POST` | `/meals` | [`meals::create`] | 201, empty body |
//! | `GET` | `/meals` | [`meals::list`] | 200 `{meals}` |
//! | `GET` | `/meals/summary` | [`meals::summary`] | 200 `{summary}` |
//! | `GET` | `/meals/{id}` | [`meals::show`] | 200 `{meal}` |
//! | `PUT` | `/meals/{id}` | [`meals::update`] | 200 |
//! | `DELETE` | `/meals/{id}` | [`meals::delete`] | 200 |
//!
//! Every route except `POST /users` requires the session token; see
//! [`crate::error::ApiError`] for the failure statuses. The session layer is
//! not part of [`router`]: callers add [`crate::auth::session_layer`] with
//! the session store of their choice.

pub mod meals;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};
use store::Store;

use crate::state::AppState;

/// Build the application router over any store backend.
pub fn router<S: Store>(state: AppState<S>) -> Router {
    Router::new()
        .route("/users", post(users::create::<S>))
        .route("/users/me", get(users::me))
        .route("/meals", get(meals::list::<S>).post(meals::create::<S>))
        .route("/meals/summary", get(meals::summary::<S>))
        .route(
            "/meals/{id}",
            get(meals::show::<S>)
                .put(meals::update::<S>)
                .delete(meals::delete::<S>),
        )
        .with_state(state)
}
