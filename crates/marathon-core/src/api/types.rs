//! Wire types for the marathon backend API.
//!
//! Field casing follows the server's JSON exactly, PascalCase quirks
//! included -- `ImagePostion` is misspelled on the wire and that
//! spelling is the contract.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a single exercise within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// One exercise as listed in a day plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub status: ExerciseStatus,
    /// Weight this exercise contributes to the day's progress score.
    #[serde(default)]
    pub progress_contribution: f64,
}

/// One day of a marathon as returned by the day-plan endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarathonDay {
    pub id: String,
    /// 1-based day number, unique within the marathon.
    #[serde(rename = "day")]
    pub day_number: u32,
    #[serde(default)]
    pub is_practice_day: bool,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// Per-day state inside a marathon snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayState {
    #[serde(rename = "day")]
    pub day_number: u32,
    /// Server-computed aggregate progress for the day.
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub is_practice_day: bool,
}

/// Aggregate marathon state, server authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarathonSnapshot {
    pub id: String,
    pub number_of_days: u32,
    /// Tenure of the marathon in days.
    #[serde(default)]
    pub tenure: u32,
    #[serde(default)]
    pub days: Vec<DayState>,
}

/// Body of the exercise status-change call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeRequest {
    pub day_id: String,
    pub marathon_exercise_id: String,
    pub status: ExerciseStatus,
}

/// Server response to a status change. `progress` is the new
/// authoritative aggregate for the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeResponse {
    pub progress: f64,
    #[serde(default)]
    pub is_practice_day: bool,
    #[serde(rename = "day")]
    pub day_number: u32,
}

/// Named photo slot in the before/after contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    BeforeFront,
    BeforeSide,
    BeforeBack,
    AfterFront,
    AfterSide,
    AfterBack,
}

/// The "before" milestone group.
pub const BEFORE_POSITIONS: [Position; 3] = [
    Position::BeforeFront,
    Position::BeforeSide,
    Position::BeforeBack,
];

/// The "after" milestone group.
pub const AFTER_POSITIONS: [Position; 3] = [
    Position::AfterFront,
    Position::AfterSide,
    Position::AfterBack,
];

impl Position {
    /// Whether this slot belongs to the "before" group.
    pub fn is_before(&self) -> bool {
        matches!(
            self,
            Position::BeforeFront | Position::BeforeSide | Position::BeforeBack
        )
    }
}

/// A confirmed contest photo occupying one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestImage {
    pub position: Position,
    #[serde(default)]
    pub image_path: String,
}

/// Body of the image mask confirmation call. The server expects the
/// original client's PascalCase model, typo and all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmImageRequest {
    #[serde(rename = "ContestId")]
    pub contest_id: String,
    #[serde(rename = "MarathonId")]
    pub marathon_id: String,
    #[serde(rename = "ImagePostion")]
    pub position: Position,
    #[serde(rename = "masktype")]
    pub mask_type: String,
}

/// A contest participant eligible for peer voting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finalist {
    pub id: String,
    #[serde(default)]
    pub image_path: String,
    /// Server-owned tally; the client holds an optimistic mirror.
    pub total_vote: i64,
    /// Whether the current user has voted for this finalist.
    pub is_voted: bool,
}

/// Body of the vote call. Carries the client-computed absolute tally,
/// matching the deployed wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub contest_id: String,
    pub finalist_id: String,
    pub is_voted: bool,
    pub total_vote: i64,
}

/// Which side of the before/after pair a user record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSide {
    Before,
    After,
}

/// Participant metadata attached to one side of the photo pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub side: RecordSide,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub is_liked: bool,
}

/// Body of the set-record call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRecordRequest {
    pub contest_id: String,
    #[serde(flatten)]
    pub record: UserRecord,
}
