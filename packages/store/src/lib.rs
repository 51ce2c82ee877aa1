pub mod error;
pub mod models;
pub mod repo;

mod memory;
pub use memory::MemoryStore;

pub use error::StoreError;
pub use models::{Meal, MealChanges, NewMeal, NewUser, User};
pub use repo::{sort_recent_first, MealStore, Store, UserStore};
