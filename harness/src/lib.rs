pub mod clock;
pub mod config;
pub mod executor;
pub mod plan;
pub mod presentation;
pub mod report;
pub mod runner;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{SimulationConfig, TARGET_PASS_PROBABILITY};
pub use executor::{
    round_to_hundredths, MeasurementScale, TestExecutor, SEAL_INTEGRITY_THRESHOLD,
    VIBRATION_CEILING,
};
pub use plan::{operation_cases, TestPlanGenerator, BASELINE_CASES};
pub use presentation::ConsoleReporter;
pub use report::{format_result_line, ReportAggregator, SummaryReport, Verdict};
pub use runner::{
    DefaultRunner, HarnessError, HarnessResult, NoopObserver, RunObserver, RunReport, TestRunner,
};
pub use types::{TestCase, TestKind, TestResult, TestStatus, Unit};
