//! # Database module: PostgreSQL pool, migrations and store
//!
//! - [`connect`] opens a [`sqlx::PgPool`] sized from [`crate::settings::Database`].
//!   The pool is created once by the server binary and handed to [`PgStore`];
//!   nothing in this crate holds a process-wide handle.
//! - [`migrate`] runs the embedded SQL migrations (`users` and `meals`).
//! - [`PgStore`] implements [`store::UserStore`] and [`store::MealStore`] with
//!   plain `sqlx::query_as` calls. Unique violations on `users.session_id`
//!   surface as [`store::StoreError::Conflict`] so the session resolver can
//!   recover from a concurrent first request.

mod pool;
mod postgres;

pub use pool::{connect, migrate};
pub use postgres::PgStore;
