//! # Meal summary
//!
//! [`summarize`] turns a user's meals into the counters returned by
//! `GET /meals/summary`. It is a pure function of its input: meals are
//! ordered most recently eaten first (ties broken by creation time, then id),
//! so the result does not depend on the order the store returned them in.
//!
//! The diet streak counts the on-diet meals at the head of that order, i.e.
//! the run of diet-compliant meals ending at the most recent one. It stops at
//! the first off-diet meal, or covers every meal if there is none.

use serde::Serialize;
use store::{sort_recent_first, Meal};

/// Aggregated counters for a user's meals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    #[serde(rename = "totalMeals")]
    pub total_meals: usize,
    #[serde(rename = "totalMealsOnDiet")]
    pub total_on_diet: usize,
    #[serde(rename = "totalMealsNotOnDiet")]
    pub total_off_diet: usize,
    #[serde(rename = "dietStreak")]
    pub diet_streak: usize,
}

/// Compute the [`Summary`] of `meals`.
pub fn summarize(meals: &[Meal]) -> Summary {
    let total_meals = meals.len();
    let total_on_diet = meals.iter().filter(|m| m.diet).count();

    let mut ordered = meals.to_vec();
    sort_recent_first(&mut ordered);
    let diet_streak = ordered.iter().take_while(|m| m.diet).count();

    Summary {
        total_meals,
        total_on_diet,
        total_off_diet: total_meals - total_on_diet,
        diet_streak,
    }
}
