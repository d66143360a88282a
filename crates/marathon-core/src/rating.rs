//! Star rating derived from a day's progress score.
//!
//! The server hands back a numeric progress value after every exercise
//! status change; this module folds it into the 0-5 star scale shown
//! on the day card. Thresholds are a fixed business table, not a
//! formula -- keep them literal.

/// Inclusive lower bounds, highest-matching-wins. `(progress, stars)`.
const RATING_THRESHOLDS: [(f64, u8); 5] = [
    (200.0, 5),
    (150.0, 4),
    (100.0, 3),
    (50.0, 2),
    (1.0, 1),
];

/// Maximum star rating a day can earn.
pub const MAX_RATING: u8 = 5;

/// Map a progress score to a 0-5 star rating.
///
/// Total over all finite inputs: anything below 1 (including negative
/// values and NaN) lands in the 0 bucket.
pub fn star_rating(progress: f64) -> u8 {
    for (threshold, stars) in RATING_THRESHOLDS {
        if progress >= threshold {
            return stars;
        }
    }
    0
}
