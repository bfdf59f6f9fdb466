//! End-to-end test runs
//!
//! [`TestRunner`] resolves the requested configuration, builds the plan, runs
//! every case in order through the executor and summarizes the results. A
//! [`RunObserver`] sees each case start and finish so progress can be shown
//! while the run is still going.

use crate::clock::{Clock, ManualClock, SystemClock};
use crate::config::SimulationConfig;
use crate::executor::TestExecutor;
use crate::plan::TestPlanGenerator;
use crate::report::{ReportAggregator, SummaryReport};
use crate::types::{TestCase, TestResult};
use chrono::{DateTime, Utc};
use equipment::{CatalogError, ConfigurationCatalog, EquipmentConfiguration};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;

/// Hooks called while a run is in progress
pub trait RunObserver {
    fn run_started(&mut self, _config: &EquipmentConfiguration, _plan: &[TestCase]) {}

    fn test_started(&mut self, _case: &TestCase) {}

    fn test_finished(&mut self, _result: &TestResult) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Everything produced by one run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    /// Seed of the random source, when known; rerunning with it reproduces the results
    pub seed: Option<u64>,
    pub configuration: EquipmentConfiguration,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<TestResult>,
    pub summary: SummaryReport,
}

/// Runner built by [`TestRunner::from_config`]
pub type DefaultRunner = TestRunner<StdRng, Box<dyn Clock>>;

pub struct TestRunner<R, C> {
    catalog: ConfigurationCatalog,
    generator: TestPlanGenerator,
    executor: TestExecutor<R, C>,
    aggregator: ReportAggregator,
    seed: Option<u64>,
}

impl DefaultRunner {
    /// Build a runner from simulation settings, seeding the random source.
    pub fn from_config(config: &SimulationConfig) -> HarnessResult<Self> {
        config
            .validate()
            .map_err(|message| HarnessError::InvalidConfig { message })?;

        let seed = config.seed_or_random();
        let clock: Box<dyn Clock> = if config.fast {
            Box::new(ManualClock::new())
        } else {
            Box::new(SystemClock::new())
        };

        let executor = TestExecutor::with_config(StdRng::seed_from_u64(seed), clock, config);
        Ok(Self::new(executor).with_seed(seed))
    }
}

impl<R: Rng, C: Clock> TestRunner<R, C> {
    pub fn new(executor: TestExecutor<R, C>) -> Self {
        Self {
            catalog: ConfigurationCatalog::new(),
            generator: TestPlanGenerator::new(),
            executor,
            aggregator: ReportAggregator::new(),
            seed: None,
        }
    }

    /// Record the seed the executor's random source was built from
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn catalog(&self) -> &ConfigurationCatalog {
        &self.catalog
    }

    /// Resolve `(equipment_type, operation)` and run its full plan.
    ///
    /// An unsupported pair returns [`HarnessError::Catalog`] before any case runs.
    pub fn run(
        &mut self,
        equipment_type: &str,
        operation: &str,
        observer: &mut dyn RunObserver,
    ) -> HarnessResult<RunReport> {
        let config = match self.catalog.resolve(equipment_type, operation) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}", e);
                return Err(e.into());
            }
        };

        Ok(self.run_configuration(config, observer))
    }

    /// Run the full plan for an already resolved configuration
    pub fn run_configuration(
        &mut self,
        config: &EquipmentConfiguration,
        observer: &mut dyn RunObserver,
    ) -> RunReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let plan = self.generator.plan(config);

        info!(
            "Starting run {} for {} - {} ({} tests)",
            run_id,
            config.type_name,
            config.operation_name,
            plan.len()
        );
        observer.run_started(config, &plan);

        let mut results = Vec::with_capacity(plan.len());
        for case in &plan {
            observer.test_started(case);
            let result = self.executor.execute(case, config);
            observer.test_finished(&result);
            results.push(result);
        }

        let summary = self.aggregator.summarize(&results);
        if summary.failed > 0 {
            warn!(
                "Run {} finished with {} of {} tests failing",
                run_id, summary.failed, summary.total
            );
        } else {
            info!("Run {} finished, all {} tests passed", run_id, summary.total);
        }

        RunReport {
            run_id,
            seed: self.seed,
            configuration: config.clone(),
            started_at,
            finished_at: Utc::now(),
            results,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TestKind;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingObserver {
        started: Vec<TestKind>,
        finished: Vec<TestKind>,
        plan_len: usize,
    }

    impl RunObserver for RecordingObserver {
        fn run_started(&mut self, _config: &EquipmentConfiguration, plan: &[TestCase]) {
            self.plan_len = plan.len();
        }

        fn test_started(&mut self, case: &TestCase) {
            assert_eq!(self.started.len(), self.finished.len());
            self.started.push(case.kind);
        }

        fn test_finished(&mut self, result: &TestResult) {
            assert_eq!(self.started.last(), Some(&result.kind));
            self.finished.push(result.kind);
        }
    }

    fn runner(seed: u64) -> TestRunner<StdRng, ManualClock> {
        let executor = TestExecutor::new(StdRng::seed_from_u64(seed), ManualClock::new());
        TestRunner::new(executor).with_seed(seed)
    }

    #[test]
    fn test_run_preserves_plan_order() {
        let mut observer = RecordingObserver::default();
        let report = runner(11).run("valve", "close", &mut observer).unwrap();

        let kinds: Vec<TestKind> = report.results.iter().map(|r| r.kind).collect();
        assert_eq!(observer.plan_len, 7);
        assert_eq!(observer.started, kinds);
        assert_eq!(observer.finished, kinds);
        assert_eq!(kinds.last(), Some(&TestKind::LeakClosed));
        assert_eq!(report.seed, Some(11));
    }

    #[test]
    fn test_unsupported_pair_runs_nothing() {
        let mut observer = RecordingObserver::default();
        let err = runner(12).run("drone", "fly", &mut observer).unwrap_err();

        assert!(matches!(err, HarnessError::Catalog(_)));
        assert_eq!(
            err.to_string(),
            "Unsupported equipment type 'drone' or operation 'fly'"
        );
        assert!(observer.started.is_empty());
        assert_eq!(observer.plan_len, 0);
    }

    #[test]
    fn test_summary_matches_results() {
        let report = runner(13).run("compressor", "test", &mut NoopObserver).unwrap();
        let summary = &report.summary;

        assert_eq!(summary.total, report.results.len());
        assert_eq!(
            summary.passed,
            report.results.iter().filter(|r| r.passed).count()
        );
        let total: Duration = report.results.iter().map(|r| r.duration).sum();
        assert_eq!(summary.total_duration, total);
        assert!(report.finished_at >= report.started_at);
    }

    #[test]
    fn test_from_config_validates() {
        let config = SimulationConfig::new()
            .with_settle_range(Duration::from_millis(5), Duration::from_millis(5));
        assert!(matches!(
            TestRunner::from_config(&config),
            Err(HarnessError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_from_config_is_reproducible() {
        let config = SimulationConfig::new().with_seed(2024).with_fast_mode(true);

        let first = TestRunner::from_config(&config)
            .unwrap()
            .run("pump", "opened", &mut NoopObserver)
            .unwrap();
        let second = TestRunner::from_config(&config)
            .unwrap()
            .run("pump", "opened", &mut NoopObserver)
            .unwrap();

        assert_eq!(first.results, second.results);
        assert_ne!(first.run_id, second.run_id);
    }
}
