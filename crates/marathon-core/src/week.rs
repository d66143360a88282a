//! Week windows over a 30-day marathon.
//!
//! Weeks 1-4 are seven days each; week 5 is the short two-day tail
//! (days 29-30). The mapping is a fixed table with no generating rule.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Number of weeks in a standard 30-day marathon.
pub const WEEK_COUNT: u32 = 5;

/// Total day count covered by the week table.
pub const MARATHON_DAYS: u32 = 30;

/// Inclusive day-number range belonging to one week index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    /// First day number in the window (1-based).
    pub start: u32,
    /// Last day number in the window, inclusive.
    pub end: u32,
}

impl WeekWindow {
    /// Whether `day_number` falls inside this window.
    pub fn contains(&self, day_number: u32) -> bool {
        day_number >= self.start && day_number <= self.end
    }

    /// Number of days in the window.
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Windows are never empty; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }
}

const WEEK_TABLE: [WeekWindow; WEEK_COUNT as usize] = [
    WeekWindow { start: 1, end: 7 },
    WeekWindow { start: 8, end: 14 },
    WeekWindow { start: 15, end: 21 },
    WeekWindow { start: 22, end: 28 },
    WeekWindow { start: 29, end: 30 },
];

/// Resolve the day window for a week index in `1..=5`.
///
/// An out-of-range index is a caller bug and fails loudly instead of
/// returning a sentinel the caller could mishandle.
pub fn window_for(week_index: u32) -> Result<WeekWindow> {
    if week_index == 0 || week_index > WEEK_COUNT {
        return Err(EngineError::validation(
            "week_index",
            format!("must be in 1..={WEEK_COUNT}, got {week_index}"),
        ));
    }
    Ok(WEEK_TABLE[(week_index - 1) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_table() {
        assert_eq!(window_for(1).unwrap(), WeekWindow { start: 1, end: 7 });
        assert_eq!(window_for(2).unwrap(), WeekWindow { start: 8, end: 14 });
        assert_eq!(window_for(3).unwrap(), WeekWindow { start: 15, end: 21 });
        assert_eq!(window_for(4).unwrap(), WeekWindow { start: 22, end: 28 });
        assert_eq!(window_for(5).unwrap(), WeekWindow { start: 29, end: 30 });
    }

    #[test]
    fn test_invalid_index_fails_loudly() {
        assert!(matches!(
            window_for(0),
            Err(EngineError::Validation { .. })
        ));
        assert!(matches!(
            window_for(6),
            Err(EngineError::Validation { .. })
        ));
        assert!(matches!(
            window_for(u32::MAX),
            Err(EngineError::Validation { .. })
        ));
    }

    #[test]
    fn test_windows_partition_thirty_days() {
        // Every day 1..=30 belongs to exactly one window.
        for day in 1..=MARATHON_DAYS {
            let owners = (1..=WEEK_COUNT)
                .filter(|&w| window_for(w).unwrap().contains(day))
                .count();
            assert_eq!(owners, 1, "day {day} must belong to exactly one week");
        }
        // No window reaches outside [1, 30].
        for week in 1..=WEEK_COUNT {
            let window = window_for(week).unwrap();
            assert!(window.start >= 1 && window.end <= MARATHON_DAYS);
            assert!(window.start <= window.end);
        }
    }

    #[test]
    fn test_week_lengths() {
        for week in 1..=4 {
            assert_eq!(window_for(week).unwrap().len(), 7);
        }
        assert_eq!(window_for(5).unwrap().len(), 2);
    }

    #[test]
    fn test_contains_boundaries() {
        let w2 = window_for(2).unwrap();
        assert!(!w2.contains(7));
        assert!(w2.contains(8));
        assert!(w2.contains(14));
        assert!(!w2.contains(15));
    }
}
