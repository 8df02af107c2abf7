pub mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::models::grade::GradedResult;
use crate::models::package::Package;
use crate::models::submission::SubmittedAnswerSet;
use crate::models::test_instance::TestInstance;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// How the lifecycle picks the package a new test is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageSelector {
    /// Explicit package id, e.g. chosen by an administrator.
    ById(Uuid),
    /// The active package this known user has taken the fewest tests on.
    LeastUsedFor(Uuid),
    /// Any active package, for anonymous callers.
    RandomActive,
}

/// Package lookup and lock capability. Implementations own the transaction
/// discipline: `mark_locked` must be an atomic conditional update so two
/// concurrent initiations cannot both observe an unlocked package.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Package>;

    async fn find_random_active(&self) -> Result<Package>;

    async fn find_least_used_for_user(&self, user_id: Uuid) -> Result<Package>;

    /// Flips the one-way lock. Returns `true` if this call performed the
    /// flip, `false` if the package was already locked.
    async fn mark_locked(&self, id: Uuid) -> Result<bool>;
}

/// Test persistence capability. The two mutating operations are the atomic
/// units the lifecycle relies on; this core performs no locking of its own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestRepository: Send + Sync {
    /// Creates the test and locks its package (if not yet locked) as one
    /// atomic unit. On failure nothing is persisted and no lock sticks.
    async fn create_locking_package(&self, test: &TestInstance, package_id: Uuid) -> Result<()>;

    async fn find_by_id(&self, id: Uuid) -> Result<TestInstance>;

    /// Re-checks acceptance and writes the graded result as one atomic unit,
    /// setting `finished_at`. Of two concurrent submissions for the same
    /// test, the second observes `AlreadyAnswered`.
    async fn finalize(
        &self,
        test_id: Uuid,
        answer: &SubmittedAnswerSet,
        result: &GradedResult,
        finished_at: DateTime<Utc>,
    ) -> Result<TestInstance>;
}
