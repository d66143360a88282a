//! Finalist voting with optimistic local updates.
//!
//! A tap must be reflected instantly, so the ledger mutates its
//! mirror of the server tally before the network call resolves. Every
//! optimistic update captures a pre-update snapshot; a failed call
//! rolls the snapshot back instead of leaving phantom votes behind.
//!
//! The vote request carries the client-computed absolute tally, which
//! is what the deployed server expects. Rapid double-votes from two
//! devices can race on a stale baseline; see DESIGN.md before
//! changing this to a delta.

use tracing::{debug, warn};

use crate::api::{Finalist, MarathonBackend, VoteRequest};
use crate::error::{EngineError, Result};

/// Pre-update state of one finalist, used to undo an optimistic vote.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteSnapshot {
    finalist_id: String,
    total_vote: i64,
    is_voted: bool,
}

/// Client-side mirror of the finalist list and vote tallies.
///
/// Single-writer per client; cross-client consistency is the
/// server's problem.
#[derive(Default)]
pub struct VotingLedger {
    finalists: Vec<Finalist>,
}

impl VotingLedger {
    /// Empty ledger; populate via [`VotingLedger::replace_finalists`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the whole ledger from a server finalist list.
    pub fn replace_finalists(&mut self, finalists: Vec<Finalist>) {
        self.finalists = finalists;
    }

    /// Current finalist list, optimistic state included.
    pub fn finalists(&self) -> &[Finalist] {
        &self.finalists
    }

    /// Look up one finalist by id.
    pub fn finalist(&self, finalist_id: &str) -> Option<&Finalist> {
        self.finalists.iter().find(|f| f.id == finalist_id)
    }

    /// Apply an optimistic vote locally: tally moves by one in the
    /// direction of `want_vote` and the vote flag is set. Returns the
    /// pre-update snapshot for rollback.
    pub fn apply_vote(&mut self, finalist_id: &str, want_vote: bool) -> Result<VoteSnapshot> {
        let finalist = self
            .finalists
            .iter_mut()
            .find(|f| f.id == finalist_id)
            .ok_or_else(|| {
                EngineError::validation("finalist_id", format!("unknown finalist '{finalist_id}'"))
            })?;

        let snapshot = VoteSnapshot {
            finalist_id: finalist.id.clone(),
            total_vote: finalist.total_vote,
            is_voted: finalist.is_voted,
        };

        finalist.total_vote += if want_vote { 1 } else { -1 };
        finalist.is_voted = want_vote;
        debug!(
            finalist = finalist_id,
            total = finalist.total_vote,
            voted = want_vote,
            "optimistic vote applied"
        );
        Ok(snapshot)
    }

    /// Restore a finalist to its pre-vote snapshot. A no-op when the
    /// finalist has disappeared from the ledger in the meantime.
    pub fn rollback(&mut self, snapshot: VoteSnapshot) {
        if let Some(finalist) = self
            .finalists
            .iter_mut()
            .find(|f| f.id == snapshot.finalist_id)
        {
            finalist.total_vote = snapshot.total_vote;
            finalist.is_voted = snapshot.is_voted;
        }
    }

    /// Reconcile one finalist against a server-confirmed tally.
    pub fn reconcile(&mut self, finalist_id: &str, total_vote: i64, is_voted: bool) {
        if let Some(finalist) = self.finalists.iter_mut().find(|f| f.id == finalist_id) {
            finalist.total_vote = total_vote;
            finalist.is_voted = is_voted;
        }
    }

    /// Full vote flow: optimistic apply, send the vote carrying the
    /// new absolute tally and the real contest id, roll back on
    /// failure.
    pub async fn cast_vote<B: MarathonBackend>(
        &mut self,
        backend: &B,
        contest_id: &str,
        finalist_id: &str,
        want_vote: bool,
    ) -> Result<()> {
        let snapshot = self.apply_vote(finalist_id, want_vote)?;
        let total_vote = self
            .finalist(finalist_id)
            .map(|f| f.total_vote)
            .unwrap_or(snapshot.total_vote);

        let req = VoteRequest {
            contest_id: contest_id.to_string(),
            finalist_id: finalist_id.to_string(),
            is_voted: want_vote,
            total_vote,
        };
        if let Err(e) = backend.vote_finalist(&req).await {
            warn!(finalist = finalist_id, error = %e, "vote failed, rolling back");
            self.rollback(snapshot);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finalist(id: &str, total_vote: i64, is_voted: bool) -> Finalist {
        Finalist {
            id: id.to_string(),
            image_path: format!("/img/{id}.jpg"),
            total_vote,
            is_voted,
        }
    }

    fn ledger_with(finalists: Vec<Finalist>) -> VotingLedger {
        let mut ledger = VotingLedger::new();
        ledger.replace_finalists(finalists);
        ledger
    }

    #[test]
    fn test_optimistic_vote_applies_immediately() {
        let mut ledger = ledger_with(vec![finalist("f-1", 10, false)]);
        ledger.apply_vote("f-1", true).unwrap();

        let f = ledger.finalist("f-1").unwrap();
        assert_eq!(f.total_vote, 11);
        assert!(f.is_voted);
    }

    #[test]
    fn test_double_toggle_restores_tally() {
        let mut ledger = ledger_with(vec![finalist("f-1", 10, false)]);
        ledger.apply_vote("f-1", true).unwrap();
        ledger.apply_vote("f-1", false).unwrap();

        let f = ledger.finalist("f-1").unwrap();
        assert_eq!(f.total_vote, 10);
        assert!(!f.is_voted);
    }

    #[test]
    fn test_rollback_restores_snapshot() {
        let mut ledger = ledger_with(vec![finalist("f-1", 10, false)]);
        let snapshot = ledger.apply_vote("f-1", true).unwrap();
        ledger.rollback(snapshot);

        let f = ledger.finalist("f-1").unwrap();
        assert_eq!(f.total_vote, 10);
        assert!(!f.is_voted);
    }

    #[test]
    fn test_unknown_finalist_rejected() {
        let mut ledger = ledger_with(vec![finalist("f-1", 10, false)]);
        assert!(matches!(
            ledger.apply_vote("nope", true),
            Err(EngineError::Validation { .. })
        ));
    }

    #[test]
    fn test_retract_vote_decrements() {
        let mut ledger = ledger_with(vec![finalist("f-1", 10, true)]);
        ledger.apply_vote("f-1", false).unwrap();

        let f = ledger.finalist("f-1").unwrap();
        assert_eq!(f.total_vote, 9);
        assert!(!f.is_voted);
    }

    #[test]
    fn test_reconcile_overwrites_optimistic_state() {
        let mut ledger = ledger_with(vec![finalist("f-1", 10, false)]);
        ledger.apply_vote("f-1", true).unwrap();
        // Server says the authoritative tally is different.
        ledger.reconcile("f-1", 14, true);

        let f = ledger.finalist("f-1").unwrap();
        assert_eq!(f.total_vote, 14);
    }

    #[test]
    fn test_votes_touch_only_their_finalist() {
        let mut ledger = ledger_with(vec![
            finalist("f-1", 10, false),
            finalist("f-2", 3, false),
        ]);
        ledger.apply_vote("f-1", true).unwrap();

        assert_eq!(ledger.finalist("f-2").unwrap().total_vote, 3);
        assert!(!ledger.finalist("f-2").unwrap().is_voted);
    }
}
