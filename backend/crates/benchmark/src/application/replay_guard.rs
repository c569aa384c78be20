//! Replay Guard
//!
//! A submission id is accepted at most once. The id is checked when the
//! request is authenticated and again, atomically, when the record is
//! written; the store's unique key settles races between the two.

use kernel::id::SubmissionId;
use std::sync::Arc;
use std::time::Duration;

use crate::application::store_timeout::with_timeout;
use crate::domain::entities::SubmissionRecord;
use crate::domain::repository::{BenchmarkRepository, InsertOutcome};
use crate::error::{IngestError, IngestResult, StorageResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    Fresh,
    AlreadySeen,
}

pub struct ReplayGuard<R> {
    repo: Arc<R>,
    timeout: Duration,
}

impl<R> ReplayGuard<R>
where
    R: BenchmarkRepository,
{
    pub fn new(repo: Arc<R>, timeout: Duration) -> Self {
        Self { repo, timeout }
    }

    /// Early check at authentication time
    pub async fn reserve(&self, submission_id: SubmissionId) -> StorageResult<Reservation> {
        let seen = with_timeout(self.timeout, self.repo.exists(submission_id)).await?;
        Ok(if seen {
            Reservation::AlreadySeen
        } else {
            Reservation::Fresh
        })
    }

    /// Persist the record; a duplicate key here is a replay
    pub async fn commit(&self, record: &SubmissionRecord) -> IngestResult<()> {
        match with_timeout(self.timeout, self.repo.insert_if_absent(record)).await? {
            InsertOutcome::Inserted => Ok(()),
            InsertOutcome::Duplicate => Err(IngestError::Replay),
        }
    }
}
