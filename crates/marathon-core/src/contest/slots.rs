//! Contest photo slots and milestone detection.
//!
//! The congratulations screen must appear exactly once, at the moment
//! the last slot of a group fills -- not on every refresh that finds
//! the group complete. That is an edge detector: capture the open
//! state before the confirmation, refresh, and fire only on the
//! open-to-closed transition.

use std::collections::HashMap;

use tracing::debug;

use crate::api::{
    ConfirmImageRequest, ContestImage, MarathonBackend, Position, AFTER_POSITIONS,
    BEFORE_POSITIONS,
};
use crate::error::Result;

/// Open/closed state of both milestone groups at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSnapshot {
    before_open: bool,
    after_open: bool,
}

/// One-shot milestone result of a confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MilestoneSignal {
    /// The "before" group went from incomplete to complete.
    pub before_completed: bool,
    /// The "after" group went from incomplete to complete.
    pub after_completed: bool,
}

impl MilestoneSignal {
    /// Whether any milestone fired.
    pub fn any(&self) -> bool {
        self.before_completed || self.after_completed
    }
}

/// Tracks which contest positions the current user has filled.
pub struct ContestSlotTracker {
    contest_id: String,
    marathon_id: String,
    slots: HashMap<Position, ContestImage>,
}

impl ContestSlotTracker {
    /// Create an empty tracker for one (user, contest) pair.
    pub fn new(contest_id: impl Into<String>, marathon_id: impl Into<String>) -> Self {
        Self {
            contest_id: contest_id.into(),
            marathon_id: marathon_id.into(),
            slots: HashMap::new(),
        }
    }

    /// Contest this tracker belongs to.
    pub fn contest_id(&self) -> &str {
        &self.contest_id
    }

    /// Replace the slot map from a server image list. A re-upload at
    /// an occupied position is last-write-wins.
    pub fn replace_images(&mut self, images: Vec<ContestImage>) {
        self.slots = images.into_iter().map(|img| (img.position, img)).collect();
    }

    /// The confirmed image at one position, if any.
    pub fn image_at(&self, position: Position) -> Option<&ContestImage> {
        self.slots.get(&position)
    }

    /// True iff any position in the group lacks a confirmed image.
    pub fn has_open_slot(&self, group: &[Position]) -> bool {
        group.iter().any(|p| !self.slots.contains_key(p))
    }

    /// Capture group-open state before a confirmation.
    pub fn snapshot(&self) -> SlotSnapshot {
        SlotSnapshot {
            before_open: self.has_open_slot(&BEFORE_POSITIONS),
            after_open: self.has_open_slot(&AFTER_POSITIONS),
        }
    }

    /// Install the refreshed image list and report which groups
    /// closed since `snapshot` was taken. Both groups may fire on the
    /// same confirmation; a group that was already complete never
    /// fires again.
    pub fn apply_refresh(
        &mut self,
        snapshot: SlotSnapshot,
        images: Vec<ContestImage>,
    ) -> MilestoneSignal {
        self.replace_images(images);
        let signal = MilestoneSignal {
            before_completed: snapshot.before_open && !self.has_open_slot(&BEFORE_POSITIONS),
            after_completed: snapshot.after_open && !self.has_open_slot(&AFTER_POSITIONS),
        };
        if signal.any() {
            debug!(
                before = signal.before_completed,
                after = signal.after_completed,
                "contest milestone reached"
            );
        }
        signal
    }

    /// Full confirmation flow: snapshot, confirm the mask upload,
    /// refresh the slot map, detect the milestone edge. A failed
    /// confirmation or refresh leaves the prior slot state intact and
    /// surfaces the error.
    pub async fn confirm_image<B: MarathonBackend>(
        &mut self,
        backend: &B,
        position: Position,
        mask_type: impl Into<String>,
    ) -> Result<MilestoneSignal> {
        let snapshot = self.snapshot();
        let req = ConfirmImageRequest {
            contest_id: self.contest_id.clone(),
            marathon_id: self.marathon_id.clone(),
            position,
            mask_type: mask_type.into(),
        };
        backend.confirm_contest_image(&req).await?;
        let images = backend.get_contest_images(&self.marathon_id).await?;
        Ok(self.apply_refresh(snapshot, images))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(position: Position) -> ContestImage {
        ContestImage {
            position,
            image_path: format!("/img/{position:?}.jpg"),
        }
    }

    fn images(positions: &[Position]) -> Vec<ContestImage> {
        positions.iter().copied().map(image).collect()
    }

    #[test]
    fn test_open_slot_detection() {
        let mut tracker = ContestSlotTracker::new("c-1", "m-1");
        assert!(tracker.has_open_slot(&BEFORE_POSITIONS));
        assert!(tracker.has_open_slot(&AFTER_POSITIONS));

        tracker.replace_images(images(&BEFORE_POSITIONS));
        assert!(!tracker.has_open_slot(&BEFORE_POSITIONS));
        assert!(tracker.has_open_slot(&AFTER_POSITIONS));
    }

    #[test]
    fn test_milestone_fires_on_falling_edge() {
        let mut tracker = ContestSlotTracker::new("c-1", "m-1");
        tracker.replace_images(images(&[Position::BeforeFront, Position::BeforeSide]));

        let snapshot = tracker.snapshot();
        let signal = tracker.apply_refresh(snapshot, images(&BEFORE_POSITIONS));
        assert!(signal.before_completed);
        assert!(!signal.after_completed);
    }

    #[test]
    fn test_milestone_fires_exactly_once() {
        let mut tracker = ContestSlotTracker::new("c-1", "m-1");
        tracker.replace_images(images(&[Position::BeforeFront, Position::BeforeSide]));

        let snapshot = tracker.snapshot();
        let first = tracker.apply_refresh(snapshot, images(&BEFORE_POSITIONS));
        assert!(first.before_completed);

        // Subsequent confirmations (e.g. a re-upload, or the first
        // after-photo) must not re-fire the before milestone.
        let snapshot = tracker.snapshot();
        let mut all = images(&BEFORE_POSITIONS);
        all.push(image(Position::AfterFront));
        let second = tracker.apply_refresh(snapshot, all);
        assert!(!second.before_completed);
        assert!(!second.after_completed);
    }

    #[test]
    fn test_last_after_slot_fires_only_after_milestone() {
        // All before slots already filled, after missing one.
        let mut tracker = ContestSlotTracker::new("c-1", "m-1");
        let mut current = images(&BEFORE_POSITIONS);
        current.push(image(Position::AfterFront));
        current.push(image(Position::AfterSide));
        tracker.replace_images(current.clone());

        let snapshot = tracker.snapshot();
        current.push(image(Position::AfterBack));
        let signal = tracker.apply_refresh(snapshot, current);
        assert!(!signal.before_completed);
        assert!(signal.after_completed);
    }

    #[test]
    fn test_both_milestones_can_fire_together() {
        let mut tracker = ContestSlotTracker::new("c-1", "m-1");
        let mut current = images(&BEFORE_POSITIONS[..2]);
        current.extend(images(&AFTER_POSITIONS[..2]));
        tracker.replace_images(current);

        let snapshot = tracker.snapshot();
        let mut all = images(&BEFORE_POSITIONS);
        all.extend(images(&AFTER_POSITIONS));
        let signal = tracker.apply_refresh(snapshot, all);
        assert!(signal.before_completed);
        assert!(signal.after_completed);
        assert!(signal.any());
    }

    #[test]
    fn test_reupload_replaces_position() {
        let mut tracker = ContestSlotTracker::new("c-1", "m-1");
        tracker.replace_images(vec![ContestImage {
            position: Position::BeforeFront,
            image_path: "/img/old.jpg".to_string(),
        }]);
        tracker.replace_images(vec![ContestImage {
            position: Position::BeforeFront,
            image_path: "/img/new.jpg".to_string(),
        }]);
        assert_eq!(
            tracker.image_at(Position::BeforeFront).unwrap().image_path,
            "/img/new.jpg"
        );
    }
}
