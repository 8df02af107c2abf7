pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

use crate::config::Config;
use crate::services::lifecycle_service::LifecycleService;
use crate::storage::{PackageRepository, TestRepository};
use crate::utils::time::{Clock, SystemClock};
use std::sync::Arc;

/// Wires the screening core together. Storage and clock come in from the
/// caller; nothing here reaches for globals.
#[derive(Clone)]
pub struct ScreeningCore {
    pub config: Config,
    pub lifecycle: LifecycleService,
}

impl ScreeningCore {
    pub fn new(
        packages: Arc<dyn PackageRepository>,
        tests: Arc<dyn TestRepository>,
        config: Config,
    ) -> Self {
        Self::with_clock(packages, tests, Arc::new(SystemClock), config)
    }

    /// Same as [`ScreeningCore::new`] but with an explicit clock, which is
    /// how tests pin time.
    pub fn with_clock(
        packages: Arc<dyn PackageRepository>,
        tests: Arc<dyn TestRepository>,
        clock: Arc<dyn Clock>,
        config: Config,
    ) -> Self {
        let lifecycle = LifecycleService::new(packages, tests, clock, &config);
        Self { config, lifecycle }
    }
}
