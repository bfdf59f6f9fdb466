//! Test case and test result types
//!
//! A [`TestCase`] is the empty shell produced by the plan generator. The executor
//! turns each case into exactly one [`TestResult`], which is read-only from then on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Unit label attached to a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "PSI")]
    Psi,
    #[serde(rename = "GPM")]
    Gpm,
    #[serde(rename = "°F")]
    Fahrenheit,
    #[serde(rename = "mm/s")]
    MillimetersPerSecond,
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "seconds")]
    Seconds,
    #[serde(rename = "ml/min")]
    MillilitersPerMinute,
    #[serde(rename = "Amps")]
    Amps,
    #[serde(rename = "kW")]
    Kilowatts,
    #[serde(rename = "dB")]
    Decibels,
}

impl Unit {
    pub const fn symbol(self) -> &'static str {
        match self {
            Unit::Psi => "PSI",
            Unit::Gpm => "GPM",
            Unit::Fahrenheit => "°F",
            Unit::MillimetersPerSecond => "mm/s",
            Unit::Percent => "%",
            Unit::Seconds => "seconds",
            Unit::MillilitersPerMinute => "ml/min",
            Unit::Amps => "Amps",
            Unit::Kilowatts => "kW",
            Unit::Decibels => "dB",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad honors width/alignment so report columns line up
        f.pad(self.symbol())
    }
}

/// Every measurement the harness knows how to simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    Pressure,
    FlowRate,
    Temperature,
    Vibration,
    SealIntegrity,
    OpeningTime,
    FullOpenPosition,
    ClosingTime,
    LeakClosed,
    StartupTime,
    MotorCurrent,
    ShutdownTime,
    CoastDown,
    Efficiency,
    PowerConsumption,
    NoiseLevel,
}

impl TestKind {
    pub const fn name(self) -> &'static str {
        match self {
            TestKind::Pressure => "Pressure Test",
            TestKind::FlowRate => "Flow Rate Test",
            TestKind::Temperature => "Temperature Test",
            TestKind::Vibration => "Vibration Test",
            TestKind::SealIntegrity => "Seal Integrity Test",
            TestKind::OpeningTime => "Opening Time Test",
            TestKind::FullOpenPosition => "Full Open Position Test",
            TestKind::ClosingTime => "Closing Time Test",
            TestKind::LeakClosed => "Leak Test (Closed)",
            TestKind::StartupTime => "Startup Time Test",
            TestKind::MotorCurrent => "Motor Current Test",
            TestKind::ShutdownTime => "Shutdown Time Test",
            TestKind::CoastDown => "Coast Down Test",
            TestKind::Efficiency => "Efficiency Test",
            TestKind::PowerConsumption => "Power Consumption Test",
            TestKind::NoiseLevel => "Noise Level Test",
        }
    }

    /// True for the five measurements every plan starts with
    pub const fn is_baseline(self) -> bool {
        matches!(
            self,
            TestKind::Pressure
                | TestKind::FlowRate
                | TestKind::Temperature
                | TestKind::Vibration
                | TestKind::SealIntegrity
        )
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A named measurement waiting to be executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub kind: TestKind,
    pub unit: Unit,
}

impl TestCase {
    pub const fn new(kind: TestKind, unit: Unit) -> Self {
        Self { kind, unit }
    }

    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Passed,
    Failed,
}

impl TestStatus {
    pub const fn from_passed(passed: bool) -> Self {
        if passed {
            TestStatus::Passed
        } else {
            TestStatus::Failed
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TestStatus::Passed => "PASSED",
            TestStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Outcome of one executed test case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub name: &'static str,
    pub kind: TestKind,
    pub passed: bool,
    /// Measured value, rounded to two decimal places
    pub value: f64,
    pub unit: Unit,
    pub status: TestStatus,
    /// Simulated time the measurement took
    pub duration: Duration,
    pub note: Option<String>,
}

impl TestResult {
    /// Build a result, deriving `status` from `passed` so the two never disagree.
    pub fn new(
        case: &TestCase,
        passed: bool,
        value: f64,
        duration: Duration,
        note: Option<String>,
    ) -> Self {
        Self {
            name: case.name(),
            kind: case.kind,
            passed,
            value,
            unit: case.unit,
            status: TestStatus::from_passed(passed),
            duration,
            note,
        }
    }
}
