//! Console presentation of test runs
//!
//! [`ConsoleReporter`] prints each test as it completes (it is a
//! [`RunObserver`]) and renders the final summary block. Icons and rules are
//! purely cosmetic; the data comes from [`RunReport`] and [`SummaryReport`].

use crate::report::SummaryReport;
use crate::runner::{RunObserver, RunReport};
use crate::types::{TestCase, TestResult};
use equipment::{EquipmentConfiguration, EquipmentType, Operation};
use std::io::{self, Write};

const RULE_WIDTH: usize = 60;

fn status_icon(passed: bool) -> &'static str {
    if passed {
        "✅"
    } else {
        "❌"
    }
}

fn join_tokens<I: IntoIterator<Item = &'static str>>(tokens: I) -> String {
    tokens.into_iter().collect::<Vec<_>>().join(", ")
}

pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "=== Industrial Pump Test Factory ===")?;
    writeln!(out)
}

pub fn write_usage<W: Write>(out: &mut W, program: &str) -> io::Result<()> {
    writeln!(out, "Usage: {} <equipment_type> <operation>", program)?;
    writeln!(out, "Example: {} pump opened", program)?;
    writeln!(out)?;
    writeln!(
        out,
        "Available equipment types: {}",
        join_tokens(EquipmentType::ALL.iter().map(|t| t.as_str()))
    )?;
    writeln!(
        out,
        "Available operations: {}",
        join_tokens(Operation::ALL.iter().map(|o| o.as_str()))
    )
}

pub fn write_unsupported<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "❌ {}", message)
}

pub fn write_configuration<W: Write>(
    out: &mut W,
    config: &EquipmentConfiguration,
) -> io::Result<()> {
    writeln!(
        out,
        "📋 Running tests for {} - {} operation",
        config.type_name, config.operation_name
    )?;
    writeln!(
        out,
        "⚙️  Max Pressure: {} PSI | Max Flow: {} GPM | Max Temp: {}°F",
        config.max_pressure, config.max_flow, config.max_temperature
    )?;
    writeln!(out)
}

pub fn write_summary<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    let summary: &SummaryReport = &report.summary;
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    writeln!(out)?;
    writeln!(out, "{}", heavy)?;
    writeln!(out, "🔍 TEST SUMMARY REPORT")?;
    writeln!(out, "{}", heavy)?;
    writeln!(out, "📊 Total Tests: {}", summary.total)?;
    writeln!(out, "✅ Passed: {}", summary.passed)?;
    writeln!(out, "❌ Failed: {}", summary.failed)?;
    writeln!(out, "📈 Pass Rate: {}", summary.pass_rate_display())?;
    writeln!(out)?;

    writeln!(out, "📋 DETAILED RESULTS:")?;
    writeln!(out, "{}", light)?;
    for (result, line) in report.results.iter().zip(&summary.lines) {
        writeln!(out, "{} {}", status_icon(result.passed), line)?;
    }
    writeln!(out, "{}", light)?;

    if summary.all_passed() {
        writeln!(out, "🎉 {}", summary.verdict)?;
    } else {
        writeln!(out, "⚠️  {}", summary.verdict)?;
    }

    writeln!(
        out,
        "⏱️  Total test duration: {}ms",
        summary.total_duration.as_millis()
    )?;
    if let Some(seed) = report.seed {
        writeln!(out, "🎲 Seed: {} (rerun with --seed {} to reproduce)", seed, seed)?;
    }
    Ok(())
}

/// Prints progress lines while a run executes.
///
/// Observer callbacks cannot return errors, so the first write failure is kept
/// and handed back by [`ConsoleReporter::finish`].
pub struct ConsoleReporter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn emit<F>(&mut self, write: F)
    where
        F: FnOnce(&mut W) -> io::Result<()>,
    {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = write(&mut self.out).and_then(|_| self.out.flush()) {
            self.error = Some(e);
        }
    }

    /// Return the writer without rendering a summary
    pub fn into_inner(mut self) -> io::Result<W> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }

    /// Render the summary block and return the writer
    pub fn finish(mut self, report: &RunReport) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        write_summary(&mut self.out, report)?;
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> RunObserver for ConsoleReporter<W> {
    fn run_started(&mut self, config: &EquipmentConfiguration, _plan: &[TestCase]) {
        self.emit(|out| write_configuration(out, config));
    }

    fn test_started(&mut self, case: &TestCase) {
        self.emit(|out| write!(out, "🔧 Running {}... ", case.name()));
    }

    fn test_finished(&mut self, result: &TestResult) {
        self.emit(|out| {
            writeln!(out, "{} {}", status_icon(result.passed), result.status)?;
            if let Some(note) = &result.note {
                writeln!(out, "   📝 {}", note)?;
            }
            Ok(())
        });
    }
}
