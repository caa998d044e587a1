//! Mensa card: today's meals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of meal names shown before the rest is summarized.
pub const MAX_LISTED_MEALS: usize = 2;

/// A single dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    /// Display name of the dish.
    pub name: String,
}

/// The menu of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MensaDay {
    /// Day the menu applies to.
    pub date: NaiveDate,
    /// Dishes served that day.
    pub meals: Vec<Meal>,
}

/// Summarizes the menu for `today`.
///
/// No menu or no meals gives no lines. Up to [`MAX_LISTED_MEALS`] meals are
/// listed by name; beyond that the first name is followed by a count of the
/// remaining dishes.
pub fn todays_meals(plan: &[MensaDay], today: NaiveDate) -> Vec<String> {
    let Some(day) = plan.iter().find(|d| d.date == today) else {
        return Vec::new();
    };

    match day.meals.as_slice() {
        [] => Vec::new(),
        meals if meals.len() <= MAX_LISTED_MEALS => {
            meals.iter().map(|m| m.name.clone()).collect()
        }
        [first, rest @ ..] => vec![
            first.name.clone(),
            format!("and {} more dishes", rest.len()),
        ],
    }
}
