//! Participant records for the photo contest.
//!
//! One record may exist per before/after side (age, weight, height,
//! free-text comment, like flag). Records are set and fetched
//! independently of image upload order.

use std::collections::HashMap;

use crate::api::{MarathonBackend, RecordSide, SetRecordRequest, UserRecord};
use crate::error::Result;

/// Local cache of the user's contest records, one per side.
pub struct RecordStore {
    contest_id: String,
    records: HashMap<RecordSide, UserRecord>,
}

impl RecordStore {
    /// Empty store for one contest.
    pub fn new(contest_id: impl Into<String>) -> Self {
        Self {
            contest_id: contest_id.into(),
            records: HashMap::new(),
        }
    }

    /// Cached record for one side, if known.
    pub fn record(&self, side: RecordSide) -> Option<&UserRecord> {
        self.records.get(&side)
    }

    /// Store a record on the server and cache it on success. Failure
    /// leaves the cache untouched.
    pub async fn set_record<B: MarathonBackend>(
        &mut self,
        backend: &B,
        record: UserRecord,
    ) -> Result<()> {
        let req = SetRecordRequest {
            contest_id: self.contest_id.clone(),
            record: record.clone(),
        };
        backend.set_user_record(&req).await?;
        self.records.insert(record.side, record);
        Ok(())
    }

    /// Fetch one side's record from the server, refreshing the cache.
    pub async fn fetch_record<B: MarathonBackend>(
        &mut self,
        backend: &B,
        side: RecordSide,
    ) -> Result<Option<UserRecord>> {
        let record = backend.get_user_record(&self.contest_id, side).await?;
        match &record {
            Some(r) => {
                self.records.insert(side, r.clone());
            }
            None => {
                self.records.remove(&side);
            }
        }
        Ok(record)
    }
}
