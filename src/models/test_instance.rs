use crate::models::grade::GradedResult;
use crate::models::submission::SubmittedAnswerSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One end-user attempt at a package.
///
/// Lifecycle: created open (accepting exactly one submission) and closed by a
/// successful grading, which sets `finished_at`. Closed is terminal. A test
/// past `open_until` rejects submissions even though it never closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestInstance {
    pub id: Uuid,
    pub package_id: Uuid,
    pub user_id: Option<Uuid>,
    /// Submitted payload, persisted together with the result on finalize.
    pub answer: Option<SubmittedAnswerSet>,
    pub result: Option<GradedResult>,
    pub open_until: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// One-way digest of the single-use submit key. The plaintext exists
    /// only in the tuple returned at initiation.
    pub submit_key: String,
    pub created_at: DateTime<Utc>,
}

impl TestInstance {
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }
}
