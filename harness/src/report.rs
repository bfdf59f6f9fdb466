//! Result aggregation
//!
//! Turns the finished result list into totals, a pass rate, one formatted line
//! per test and an overall verdict. Nothing here touches the terminal; the
//! console layer decides how to show it.

use crate::types::TestResult;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Width of the test-name column in formatted result lines
pub const NAME_WIDTH: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    AllPassed,
    MaintenanceRequired,
}

impl Verdict {
    pub fn message(self) -> &'static str {
        match self {
            Verdict::AllPassed => {
                "All tests passed! Equipment is operating within normal parameters."
            }
            Verdict::MaintenanceRequired => {
                "WARNING: Some tests failed. Equipment may require maintenance."
            }
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Percentage of passing tests, unrounded; 0 for an empty run
    pub pass_rate: f64,
    pub lines: Vec<String>,
    pub verdict: Verdict,
    pub total_duration: Duration,
}

impl SummaryReport {
    /// Pass rate with one decimal, e.g. "85.7%"
    pub fn pass_rate_display(&self) -> String {
        format!("{:.1}%", self.pass_rate)
    }

    pub fn all_passed(&self) -> bool {
        self.verdict == Verdict::AllPassed
    }
}

/// `{name:<25} | {value:>8.2} {unit:<8} | {status}`
pub fn format_result_line(result: &TestResult) -> String {
    format!(
        "{:<width$} | {:>8.2} {:<8} | {}",
        result.name,
        result.value,
        result.unit,
        result.status,
        width = NAME_WIDTH
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAggregator;

impl ReportAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, results: &[TestResult]) -> SummaryReport {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;
        let pass_rate = if total == 0 {
            0.0
        } else {
            passed as f64 / total as f64 * 100.0
        };

        let verdict = if failed > 0 {
            Verdict::MaintenanceRequired
        } else {
            Verdict::AllPassed
        };

        SummaryReport {
            total,
            passed,
            failed,
            pass_rate,
            lines: results.iter().map(format_result_line).collect(),
            verdict,
            total_duration: results.iter().map(|r| r.duration).sum(),
        }
    }
}
