//! Photo contest: slot tracking, milestone detection, user records
//! and finalist voting.

pub mod records;
pub mod slots;
pub mod voting;

pub use records::RecordStore;
pub use slots::{ContestSlotTracker, MilestoneSignal, SlotSnapshot};
pub use voting::{VoteSnapshot, VotingLedger};
