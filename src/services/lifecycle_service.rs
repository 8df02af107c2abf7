use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::grade::GradedResult;
use crate::models::package::Package;
use crate::models::submission::SubmittedAnswerSet;
use crate::models::test_instance::TestInstance;
use crate::services::grading_service::GradingService;
use crate::storage::{PackageRepository, PackageSelector, TestRepository};
use crate::utils::time::Clock;
use crate::utils::token::SubmitKeys;
use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

/// Creates tests from packages and closes them after grading. Every
/// collaborator comes in through a seam: repositories for persistence, the
/// clock for expiry checks, the submit-key service for the single-use secret.
#[derive(Clone)]
pub struct LifecycleService {
    packages: Arc<dyn PackageRepository>,
    tests: Arc<dyn TestRepository>,
    submit_keys: SubmitKeys,
    clock: Arc<dyn Clock>,
    default_duration: Duration,
}

impl LifecycleService {
    pub fn new(
        packages: Arc<dyn PackageRepository>,
        tests: Arc<dyn TestRepository>,
        clock: Arc<dyn Clock>,
        config: &Config,
    ) -> Self {
        Self {
            packages,
            tests,
            submit_keys: SubmitKeys::new(config.submit_key_length),
            clock,
            default_duration: Duration::minutes(config.default_test_duration_minutes),
        }
    }

    /// Opens a new test from the package the selector resolves to.
    ///
    /// Returns the created test together with the plaintext submit key; the
    /// plaintext is handed out here and nowhere else, only its digest is
    /// stored. Package locking and test creation happen as one atomic
    /// storage operation, so a failure leaves no half-initiated state.
    pub async fn initiate(
        &self,
        selector: PackageSelector,
        user_ref: Option<Uuid>,
        duration: Option<Duration>,
    ) -> Result<(TestInstance, String)> {
        let package = self.resolve_package(selector).await?;
        if !package.is_active {
            return Err(Error::PackageInactive);
        }

        let pair = self.submit_keys.generate();
        let now = self.clock.now();
        let test = TestInstance {
            id: Uuid::new_v4(),
            package_id: package.id,
            user_id: user_ref,
            answer: None,
            result: None,
            open_until: now + duration.unwrap_or(self.default_duration),
            finished_at: None,
            submit_key: pair.digest,
            created_at: now,
        };

        self.tests
            .create_locking_package(&test, package.id)
            .await
            .map_err(|err| {
                tracing::error!(package_id = %package.id, %err, "failed to create test");
                Error::Internal(format!("Could not create test: {}", err))
            })?;

        tracing::info!(test_id = %test.id, package_id = %package.id, "test initiated");
        Ok((test, pair.plaintext))
    }

    /// Whether the test still takes a submission. Re-checked atomically by
    /// the storage layer when the result is written, so a race between this
    /// read and the write cannot admit a second submission.
    pub fn is_accepting_answers(&self, test: &TestInstance) -> Result<()> {
        if self.clock.now() > test.open_until {
            return Err(Error::TestExpired);
        }
        if test.finished_at.is_some() {
            return Err(Error::AlreadyAnswered);
        }
        Ok(())
    }

    /// Takes the one submission a test accepts: verifies acceptance and the
    /// submit key, grades, and persists the result with `finished_at` set.
    pub async fn submit(
        &self,
        test: &TestInstance,
        submitted_key: &str,
        answers: &SubmittedAnswerSet,
        package: &Package,
    ) -> Result<GradedResult> {
        self.is_accepting_answers(test)?;

        if !self.submit_keys.matches(submitted_key, &test.submit_key) {
            return Err(Error::InvalidSubmitKey);
        }

        let result = GradingService::grade(answers, package)?;

        let now = self.clock.now();
        self.tests
            .finalize(test.id, answers, &result, now)
            .await
            .map_err(|err| match err {
                Error::AlreadyAnswered | Error::TestExpired | Error::NotFound(_) => err,
                other => {
                    tracing::error!(test_id = %test.id, %other, "failed to persist result");
                    Error::Internal(format!("Could not persist result: {}", other))
                }
            })?;

        tracing::info!(test_id = %test.id, total = result.total, "test graded and closed");
        Ok(result)
    }

    async fn resolve_package(&self, selector: PackageSelector) -> Result<Package> {
        match selector {
            PackageSelector::ById(id) => self.packages.find_by_id(id).await,
            PackageSelector::LeastUsedFor(user_id) => {
                self.packages.find_least_used_for_user(user_id).await
            }
            PackageSelector::RandomActive => self.packages.find_random_active().await,
        }
    }
}
