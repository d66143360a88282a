//! Weekly bonus eligibility.
//!
//! A week earns its bonus when every day in the window rated at least
//! two stars and the rating total lands in the reward band. Totals
//! above the band are deliberately NOT rewarded -- the band models
//! "near-perfect", and out-of-range totals are treated as suspicious
//! rather than better.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rating::star_rating;
use crate::week::window_for;

/// Minimum per-day rating that keeps a week eligible.
pub const MIN_DAY_RATING: u8 = 2;

/// Inclusive reward band for the week's rating total.
pub const BONUS_MIN: u32 = 21;
/// Upper bound of the reward band, inclusive.
pub const BONUS_MAX: u32 = 25;

/// One day's server-reported progress, as fed to the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayScore {
    /// 1-based day number within the marathon.
    pub day_number: u32,
    /// Server-computed progress score for the day.
    pub progress: f64,
}

/// Decide bonus eligibility for one week.
///
/// Days outside the week's window are ignored. A single day rated
/// below [`MIN_DAY_RATING`] disqualifies the whole week, and an empty
/// window (week not started) never earns a vacuous bonus. Fails only
/// on an out-of-range `week_index`.
pub fn week_bonus(days: &[DayScore], week_index: u32) -> Result<bool> {
    let window = window_for(week_index)?;

    let ratings: Vec<u8> = days
        .iter()
        .filter(|d| window.contains(d.day_number))
        .map(|d| star_rating(d.progress))
        .collect();

    if ratings.is_empty() {
        return Ok(false);
    }
    if ratings.iter().any(|&r| r < MIN_DAY_RATING) {
        return Ok(false);
    }

    let total: u32 = ratings.iter().map(|&r| r as u32).sum();
    Ok((BONUS_MIN..=BONUS_MAX).contains(&total))
}
