//! Per-day exercise progression tracking.
//!
//! Owns the state of the currently selected marathon day: each
//! exercise's status, the server-reported progress score, the derived
//! star rating, and the registry of in-flight status changes.
//!
//! Status changes are two-phase so overlapping requests stay
//! independent: [`DayProgressionTracker::begin_status_change`] registers
//! the in-flight request and hands back a ticket,
//! [`DayProgressionTracker::apply_status_change`] settles it with the
//! server outcome. Tickets are epoch-stamped -- a response that arrives
//! after the user has navigated to another day settles as a no-op
//! instead of corrupting the newer day's state.

use std::collections::HashMap;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::api::{
    ExerciseStatus, MarathonBackend, MarathonDay, MarathonSnapshot, StatusChangeResponse,
};
use crate::bonus::{week_bonus, DayScore};
use crate::error::{EngineError, Result};
use crate::rating::star_rating;

/// Handle for one in-flight status change.
///
/// Returned by `begin_status_change` and consumed by
/// `apply_status_change`; not clonable, so a ticket settles once.
#[derive(Debug)]
pub struct ChangeTicket {
    id: Uuid,
    epoch: u64,
    exercise_id: String,
    new_status: ExerciseStatus,
}

impl ChangeTicket {
    /// Exercise this ticket belongs to.
    pub fn exercise_id(&self) -> &str {
        &self.exercise_id
    }
}

/// Result of settling a ticket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApplyOutcome {
    /// The change landed; new progress and rating for the day.
    Applied { progress: f64, rating: u8 },
    /// The ticket belonged to a previously selected day; nothing
    /// was touched.
    Stale,
}

/// Tracks exercise statuses and the derived rating for the currently
/// selected day of one marathon.
pub struct DayProgressionTracker {
    marathon_id: String,
    day_id: Option<String>,
    day_number: u32,
    statuses: HashMap<String, ExerciseStatus>,
    /// In-flight status changes keyed by exercise id.
    pending: HashMap<String, Uuid>,
    progress: f64,
    rating: u8,
    /// Bumped on every `select_day`; stale tickets are detected by
    /// comparing against this.
    epoch: u64,
    marathon: Option<MarathonSnapshot>,
}

impl DayProgressionTracker {
    /// Create a tracker for one marathon. No day is selected yet.
    pub fn new(marathon_id: impl Into<String>) -> Self {
        Self {
            marathon_id: marathon_id.into(),
            day_id: None,
            day_number: 0,
            statuses: HashMap::new(),
            pending: HashMap::new(),
            progress: 0.0,
            rating: 0,
            epoch: 0,
            marathon: None,
        }
    }

    /// Select a day, replacing all per-day state. Pending requests
    /// from the previous day are orphaned; their responses settle as
    /// stale no-ops.
    pub fn select_day(&mut self, day: &MarathonDay) {
        self.epoch += 1;
        self.day_id = Some(day.id.clone());
        self.day_number = day.day_number;
        self.statuses = day
            .exercises
            .iter()
            .map(|e| (e.id.clone(), e.status))
            .collect();
        self.pending.clear();
        self.progress = 0.0;
        self.rating = 0;
        debug!(day = day.day_number, exercises = day.exercises.len(), "day selected");
    }

    /// Id of the currently selected day.
    pub fn selected_day_id(&self) -> Option<&str> {
        self.day_id.as_deref()
    }

    /// Last server-reported progress for the selected day.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Star rating derived from the last reported progress.
    pub fn rating(&self) -> u8 {
        self.rating
    }

    /// Local status of one exercise, if it belongs to the selected day.
    pub fn status_of(&self, exercise_id: &str) -> Option<ExerciseStatus> {
        self.statuses.get(exercise_id).copied()
    }

    /// Whether a status change for this exercise is still in flight.
    pub fn is_pending(&self, exercise_id: &str) -> bool {
        self.pending.contains_key(exercise_id)
    }

    /// Number of in-flight status changes.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Latest aggregate marathon state, if fetched.
    pub fn marathon(&self) -> Option<&MarathonSnapshot> {
        self.marathon.as_ref()
    }

    /// Store a freshly fetched marathon snapshot.
    pub fn set_marathon(&mut self, snapshot: MarathonSnapshot) {
        self.marathon = Some(snapshot);
    }

    /// Register an in-flight status change for one exercise.
    ///
    /// Distinct exercises may have overlapping requests; a second
    /// change for an exercise that is still pending is rejected
    /// rather than queued.
    pub fn begin_status_change(
        &mut self,
        exercise_id: &str,
        new_status: ExerciseStatus,
    ) -> Result<ChangeTicket> {
        if self.day_id.is_none() {
            return Err(EngineError::validation("day", "no day selected"));
        }
        if !self.statuses.contains_key(exercise_id) {
            return Err(EngineError::validation(
                "exercise_id",
                format!("'{exercise_id}' is not part of the selected day"),
            ));
        }
        if self.pending.contains_key(exercise_id) {
            return Err(EngineError::AlreadyPending {
                key: exercise_id.to_string(),
            });
        }

        let id = Uuid::new_v4();
        self.pending.insert(exercise_id.to_string(), id);
        debug!(exercise = exercise_id, ?new_status, "status change started");
        Ok(ChangeTicket {
            id,
            epoch: self.epoch,
            exercise_id: exercise_id.to_string(),
            new_status,
        })
    }

    /// Settle an in-flight status change with the server outcome.
    ///
    /// The pending marker is always cleared. On success the exercise
    /// status, day progress and rating are updated from the response;
    /// on failure prior state stays untouched and the error is
    /// returned to the caller instead of being swallowed.
    pub fn apply_status_change(
        &mut self,
        ticket: ChangeTicket,
        outcome: Result<StatusChangeResponse>,
    ) -> Result<ApplyOutcome> {
        if ticket.epoch != self.epoch {
            debug!(exercise = %ticket.exercise_id, "stale status change ignored");
            return Ok(ApplyOutcome::Stale);
        }

        // Only the ticket that registered the marker may clear it.
        if self.pending.get(&ticket.exercise_id) == Some(&ticket.id) {
            self.pending.remove(&ticket.exercise_id);
        }

        let response = outcome?;
        self.statuses
            .insert(ticket.exercise_id.clone(), ticket.new_status);
        self.progress = response.progress;
        self.rating = star_rating(response.progress);
        debug!(
            exercise = %ticket.exercise_id,
            progress = self.progress,
            rating = self.rating,
            "status change applied"
        );
        Ok(ApplyOutcome::Applied {
            progress: self.progress,
            rating: self.rating,
        })
    }

    /// Full status-change flow: register, call the server, settle,
    /// then refresh the marathon snapshot so server-side day
    /// unlocking is reflected locally.
    ///
    /// A refresh failure is logged and keeps the previous snapshot;
    /// the status change itself has already succeeded at that point.
    pub async fn change_exercise_status<B: MarathonBackend>(
        &mut self,
        backend: &B,
        exercise_id: &str,
        new_status: ExerciseStatus,
    ) -> Result<f64> {
        let day_id = self
            .day_id
            .clone()
            .ok_or_else(|| EngineError::validation("day", "no day selected"))?;

        let ticket = self.begin_status_change(exercise_id, new_status)?;
        let outcome = backend.change_status(&day_id, exercise_id, new_status).await;
        let applied = self.apply_status_change(ticket, outcome)?;

        match backend.get_marathon(&self.marathon_id).await {
            Ok(snapshot) => self.marathon = Some(snapshot),
            Err(e) => warn!(error = %e, "marathon refresh after status change failed"),
        }

        match applied {
            ApplyOutcome::Applied { progress, .. } => Ok(progress),
            ApplyOutcome::Stale => Ok(self.progress),
        }
    }

    /// Evaluate weekly bonus eligibility from the latest marathon
    /// snapshot. Without a snapshot there are no in-window days, so
    /// no week qualifies.
    pub fn week_bonus(&self, week_index: u32) -> Result<bool> {
        let days: Vec<DayScore> = self
            .marathon
            .iter()
            .flat_map(|m| m.days.iter())
            .map(|d| DayScore {
                day_number: d.day_number,
                progress: d.progress,
            })
            .collect();
        week_bonus(&days, week_index)
    }
}
