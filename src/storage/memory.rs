use crate::error::{Error, Result};
use crate::models::grade::GradedResult;
use crate::models::package::Package;
use crate::models::submission::SubmittedAnswerSet;
use crate::models::test_instance::TestInstance;
use crate::storage::{PackageRepository, TestRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// In-memory implementation of both repositories. A single mutex around the
/// whole state gives the compound operations the atomicity the lifecycle
/// requires; useful for tests and for embedding without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    packages: HashMap<Uuid, Package>,
    tests: HashMap<Uuid, TestInstance>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_package(&self, package: Package) {
        let mut state = self.lock_state();
        state.packages.insert(package.id, package);
    }

    pub fn package(&self, id: Uuid) -> Option<Package> {
        self.lock_state().packages.get(&id).cloned()
    }

    pub fn test(&self, id: Uuid) -> Option<TestInstance> {
        self.lock_state().tests.get(&id).cloned()
    }

    pub fn test_count(&self) -> usize {
        self.lock_state().tests.len()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, State> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PackageRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Package> {
        self.package(id)
            .ok_or_else(|| Error::NotFound(format!("Package {} not found", id)))
    }

    async fn find_random_active(&self) -> Result<Package> {
        let state = self.lock_state();
        let active: Vec<&Package> = state.packages.values().filter(|p| p.is_active).collect();
        active
            .choose(&mut rand::thread_rng())
            .map(|p| (*p).clone())
            .ok_or_else(|| Error::NotFound("No active package available".to_string()))
    }

    async fn find_least_used_for_user(&self, user_id: Uuid) -> Result<Package> {
        let state = self.lock_state();
        let usage = |package_id: Uuid| {
            state
                .tests
                .values()
                .filter(|t| t.package_id == package_id && t.user_id == Some(user_id))
                .count()
        };
        state
            .packages
            .values()
            .filter(|p| p.is_active)
            .min_by_key(|p| usage(p.id))
            .cloned()
            .ok_or_else(|| Error::NotFound("No active package available".to_string()))
    }

    async fn mark_locked(&self, id: Uuid) -> Result<bool> {
        let mut state = self.lock_state();
        let package = state
            .packages
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("Package {} not found", id)))?;
        if package.is_locked {
            return Ok(false);
        }
        package.is_locked = true;
        Ok(true)
    }
}

#[async_trait]
impl TestRepository for MemoryStore {
    async fn create_locking_package(&self, test: &TestInstance, package_id: Uuid) -> Result<()> {
        let mut state = self.lock_state();
        let package = state
            .packages
            .get_mut(&package_id)
            .ok_or_else(|| Error::NotFound(format!("Package {} not found", package_id)))?;
        package.is_locked = true;
        state.tests.insert(test.id, test.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<TestInstance> {
        self.test(id)
            .ok_or_else(|| Error::NotFound(format!("Test {} not found", id)))
    }

    async fn finalize(
        &self,
        test_id: Uuid,
        answer: &SubmittedAnswerSet,
        result: &GradedResult,
        finished_at: DateTime<Utc>,
    ) -> Result<TestInstance> {
        let mut state = self.lock_state();
        let test = state
            .tests
            .get_mut(&test_id)
            .ok_or_else(|| Error::NotFound(format!("Test {} not found", test_id)))?;
        // Same precedence as LifecycleService::is_accepting_answers: the
        // deadline is checked before the finished flag.
        if finished_at > test.open_until {
            return Err(Error::TestExpired);
        }
        if test.finished_at.is_some() {
            return Err(Error::AlreadyAnswered);
        }
        test.answer = Some(answer.clone());
        test.result = Some(result.clone());
        test.finished_at = Some(finished_at);
        Ok(test.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grade::GroupScore;
    use crate::models::package::{AnswerOption, Question, SubGroup};
    use chrono::Duration;

    fn package(active: bool) -> Package {
        Package {
            id: Uuid::new_v4(),
            name: "Screening 3y".to_string(),
            template_id: Uuid::new_v4(),
            is_active: active,
            is_locked: false,
            sub_groups: vec![SubGroup {
                name: "speech".to_string(),
                questions: vec![Question {
                    text: "Says simple sentences?".to_string(),
                    answers: vec![
                        AnswerOption {
                            text: "yes".to_string(),
                            value: 1,
                        },
                        AnswerOption {
                            text: "no".to_string(),
                            value: 2,
                        },
                    ],
                }],
            }],
        }
    }

    fn open_test(package_id: Uuid, open_until: DateTime<Utc>) -> TestInstance {
        TestInstance {
            id: Uuid::new_v4(),
            package_id,
            user_id: None,
            answer: None,
            result: None,
            open_until,
            finished_at: None,
            submit_key: "digest".to_string(),
            created_at: open_until - Duration::minutes(60),
        }
    }

    #[tokio::test]
    async fn mark_locked_flips_once() {
        let store = MemoryStore::new();
        let pkg = package(true);
        let id = pkg.id;
        store.insert_package(pkg);

        assert!(store.mark_locked(id).await.unwrap());
        assert!(!store.mark_locked(id).await.unwrap());
        assert!(store.package(id).unwrap().is_locked);
    }

    #[tokio::test]
    async fn finalize_rejects_second_submission() {
        let store = MemoryStore::new();
        let pkg = package(true);
        let pkg_id = pkg.id;
        store.insert_package(pkg);

        let now = Utc::now();
        let test = open_test(pkg_id, now + Duration::minutes(10));
        store.create_locking_package(&test, pkg_id).await.unwrap();

        let answer = SubmittedAnswerSet { groups: vec![] };
        let result = GradedResult {
            groups: vec![GroupScore {
                group_name: "speech".to_string(),
                score: 2,
            }],
            total: 2,
        };

        let finalized = store.finalize(test.id, &answer, &result, now).await.unwrap();
        assert_eq!(finalized.finished_at, Some(now));
        assert_eq!(finalized.result, Some(result.clone()));

        let second = store.finalize(test.id, &answer, &result, now).await;
        assert!(matches!(second, Err(Error::AlreadyAnswered)));
    }

    #[tokio::test]
    async fn finalize_rejects_past_deadline() {
        let store = MemoryStore::new();
        let pkg = package(true);
        let pkg_id = pkg.id;
        store.insert_package(pkg);

        let now = Utc::now();
        let test = open_test(pkg_id, now - Duration::minutes(1));
        store.create_locking_package(&test, pkg_id).await.unwrap();

        let answer = SubmittedAnswerSet { groups: vec![] };
        let result = GradedResult {
            groups: vec![],
            total: 0,
        };
        let outcome = store.finalize(test.id, &answer, &result, now).await;
        assert!(matches!(outcome, Err(Error::TestExpired)));
        assert!(store.test(test.id).unwrap().result.is_none());
    }

    #[tokio::test]
    async fn deadline_outranks_finished_flag() {
        let store = MemoryStore::new();
        let pkg = package(true);
        let pkg_id = pkg.id;
        store.insert_package(pkg);

        let now = Utc::now();
        let test = open_test(pkg_id, now + Duration::minutes(10));
        store.create_locking_package(&test, pkg_id).await.unwrap();

        let answer = SubmittedAnswerSet { groups: vec![] };
        let result = GradedResult {
            groups: vec![],
            total: 0,
        };
        store.finalize(test.id, &answer, &result, now).await.unwrap();

        // A write attempted after the deadline on an already finished test
        // reports the deadline, matching is_accepting_answers precedence.
        let late = now + Duration::minutes(11);
        let outcome = store.finalize(test.id, &answer, &result, late).await;
        assert!(matches!(outcome, Err(Error::TestExpired)));
    }

    #[tokio::test]
    async fn least_used_prefers_untaken_package() {
        let store = MemoryStore::new();
        let first = package(true);
        let second = package(true);
        let first_id = first.id;
        let second_id = second.id;
        store.insert_package(first);
        store.insert_package(second);

        let user = Uuid::new_v4();
        let now = Utc::now();
        let mut taken = open_test(first_id, now + Duration::minutes(10));
        taken.user_id = Some(user);
        store.create_locking_package(&taken, first_id).await.unwrap();

        let chosen = store.find_least_used_for_user(user).await.unwrap();
        assert_eq!(chosen.id, second_id);
    }
}
