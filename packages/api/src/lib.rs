//! # API crate: meal tracking over an anonymous session
//!
//! This crate holds everything the server binary wires together: request
//! handlers, the session identity resolver, the ownership guard, the summary
//! aggregator, configuration, and the PostgreSQL backend for the
//! [`store`] traits.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Session token handling ([`auth::identify`], [`auth::issue`]), token → user resolution ([`auth::SessionResolver`], [`auth::CurrentUser`]) and meal ownership ([`auth::owned_meal`]) |
//! | [`db`] | PostgreSQL pool, embedded migrations and [`db::PgStore`] |
//! | [`error`] | [`ApiError`], the request failure taxonomy and its HTTP mapping |
//! | [`routes`] | The axum [`routes::router`] and its handlers |
//! | [`settings`] | Layered [`Settings`] (defaults, `config.toml`, environment) |
//! | [`summary`] | [`summary::summarize`], meal counters and the diet streak |
//!
//! Handlers are generic over [`store::Store`], so the same router runs against
//! [`db::PgStore`] in production and [`store::MemoryStore`] in tests.

pub mod auth;
pub mod db;
pub mod error;
pub mod routes;
pub mod settings;
pub mod state;
pub mod summary;

pub use error::ApiError;
pub use routes::router;
pub use settings::Settings;
pub use state::AppState;
