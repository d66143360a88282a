//! # Marathon Core Library
//!
//! Core business logic for the multi-week fitness marathon platform:
//! the rules that turn raw exercise-completion events into day star
//! ratings, weekly bonus eligibility and photo-contest milestones,
//! plus the voting protocol for contest finalists.
//!
//! The library is CLI-first: everything here is reachable from the
//! companion `marathon-cli` binary, with any GUI expected to be a
//! thin layer over the same crate.
//!
//! ## Key Components
//!
//! - [`star_rating`]: progress score to 0-5 stars
//! - [`window_for`]: week index to its inclusive day range
//! - [`week_bonus`]: weekly bonus eligibility over a day window
//! - [`DayProgressionTracker`]: per-day exercise status state machine
//! - [`ContestSlotTracker`]: photo slot map with milestone edge detection
//! - [`VotingLedger`]: optimistic finalist vote tallies with rollback
//! - [`HttpBackend`]: reqwest client behind the [`MarathonBackend`] seam

pub mod api;
pub mod bonus;
pub mod config;
pub mod contest;
pub mod error;
pub mod progression;
pub mod rating;
pub mod week;

pub use api::{
    ConfirmImageRequest, ContestImage, ExerciseStatus, Finalist, HttpBackend, MarathonBackend,
    MarathonDay, MarathonSnapshot, Position, RecordSide, UserRecord, AFTER_POSITIONS,
    BEFORE_POSITIONS,
};
pub use bonus::{week_bonus, DayScore, BONUS_MAX, BONUS_MIN, MIN_DAY_RATING};
pub use config::EngineConfig;
pub use contest::{ContestSlotTracker, MilestoneSignal, RecordStore, VotingLedger};
pub use error::{ConfigError, EngineError, Result};
pub use progression::{ApplyOutcome, ChangeTicket, DayProgressionTracker};
pub use rating::{star_rating, MAX_RATING};
pub use week::{window_for, WeekWindow, MARATHON_DAYS, WEEK_COUNT};
