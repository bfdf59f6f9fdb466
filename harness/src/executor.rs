//! Simulated execution of a single test case
//!
//! Each execution:
//!
//! 1. waits out a random instrument settle delay on the injected [`Clock`],
//! 2. draws pass/fail with [`TARGET_PASS_PROBABILITY`],
//! 3. draws a value scaled to the configuration's limits (pushed past the limit
//!    on failure),
//! 4. attaches a note and rounds the value to two decimals.
//!
//! Seal integrity ignores the shared draw: it passes only when its own value is
//! above [`SEAL_INTEGRITY_THRESHOLD`].
//!
//! Execution never fails. A failing measurement is a [`TestResult`] with
//! `passed == false`.

use crate::clock::Clock;
use crate::config::{SimulationConfig, TARGET_PASS_PROBABILITY};
use crate::types::{TestCase, TestKind, TestResult};
use equipment::EquipmentConfiguration;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// Seal integrity passes strictly above this percentage
pub const SEAL_INTEGRITY_THRESHOLD: f64 = 95.0;

/// Fixed vibration ceiling in mm/s, independent of equipment limits
pub const VIBRATION_CEILING: f64 = 10.0;

/// Ceiling for measurements without an equipment limit (percentages, times, etc.)
const GENERIC_CEILING: f64 = 100.0;

const MAINTENANCE_NOTE: &str = "Test failed - requires maintenance attention";

/// Round to two decimal places
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// How a measurement is drawn: a uniform fraction of `ceiling`, multiplied by
/// `pass_factor` or `fail_factor` depending on the draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementScale {
    pub ceiling: f64,
    pub pass_factor: f64,
    pub fail_factor: f64,
}

impl MeasurementScale {
    pub fn for_kind(kind: TestKind, config: &EquipmentConfiguration) -> Self {
        let (ceiling, pass_factor, fail_factor) = match kind {
            TestKind::Pressure => (config.max_pressure, 0.8, 1.1),
            TestKind::FlowRate => (config.max_flow, 0.9, 0.5),
            TestKind::Temperature => (config.max_temperature, 0.7, 1.2),
            TestKind::Vibration => (VIBRATION_CEILING, 0.5, 2.0),
            _ => (GENERIC_CEILING, 1.0, 1.0),
        };
        Self {
            ceiling,
            pass_factor,
            fail_factor,
        }
    }

    /// Upper bound (exclusive) of values this scale can produce
    pub fn upper_bound(&self, passed: bool) -> f64 {
        self.ceiling * self.factor(passed)
    }

    fn factor(&self, passed: bool) -> f64 {
        if passed {
            self.pass_factor
        } else {
            self.fail_factor
        }
    }

    fn apply(&self, fraction: f64, passed: bool) -> f64 {
        fraction * self.upper_bound(passed)
    }
}

fn note_for(kind: TestKind, passed: bool, config: &EquipmentConfiguration) -> Option<String> {
    let note = match (kind, passed) {
        (TestKind::Pressure, true) => {
            return Some(format!("Within normal range (< {} PSI)", config.max_pressure));
        }
        (TestKind::Pressure, false) => "Exceeds maximum pressure limit!",
        (TestKind::FlowRate, true) => "Flow rate nominal",
        (TestKind::FlowRate, false) => "Flow rate below minimum threshold",
        (TestKind::Temperature, true) => "Operating temperature normal",
        (TestKind::Temperature, false) => "Temperature exceeds safe limits!",
        (TestKind::Vibration, true) => "Vibration within acceptable limits",
        (TestKind::Vibration, false) => "Excessive vibration detected",
        (TestKind::SealIntegrity, true) => "Seal integrity excellent",
        (TestKind::SealIntegrity, false) => "Potential seal leakage detected",
        (_, true) => return None,
        (_, false) => MAINTENANCE_NOTE,
    };
    Some(note.to_string())
}

/// Runs test cases one at a time against an injected random source and clock.
pub struct TestExecutor<R, C> {
    rng: R,
    clock: C,
    settle_min_ms: u64,
    settle_max_ms: u64,
}

impl<R: Rng, C: Clock> TestExecutor<R, C> {
    pub fn new(rng: R, clock: C) -> Self {
        Self::with_config(rng, clock, &SimulationConfig::default())
    }

    pub fn with_config(rng: R, clock: C, config: &SimulationConfig) -> Self {
        Self {
            rng,
            clock,
            settle_min_ms: duration_millis(config.settle_min),
            settle_max_ms: duration_millis(config.settle_max),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn draw_settle_delay(&mut self) -> Duration {
        let millis = if self.settle_max_ms > self.settle_min_ms {
            self.rng.gen_range(self.settle_min_ms..self.settle_max_ms)
        } else {
            self.settle_min_ms
        };
        Duration::from_millis(millis)
    }

    /// Simulate one measurement and return its result
    pub fn execute(&mut self, case: &TestCase, config: &EquipmentConfiguration) -> TestResult {
        let started = self.clock.elapsed();

        let settle = self.draw_settle_delay();
        debug!("Settling {} for {:?}", case.name(), settle);
        self.clock.advance(settle);

        let drawn_pass = self.rng.gen_bool(TARGET_PASS_PROBABILITY);
        let fraction: f64 = self.rng.gen();
        let scale = MeasurementScale::for_kind(case.kind, config);
        let value = round_to_hundredths(scale.apply(fraction, drawn_pass));

        // Seal integrity is a hard physical threshold on the reported value
        let passed = match case.kind {
            TestKind::SealIntegrity => value > SEAL_INTEGRITY_THRESHOLD,
            _ => drawn_pass,
        };

        let note = note_for(case.kind, passed, config);
        let duration = self.clock.elapsed().saturating_sub(started);

        debug!(
            "Executed {}: {} {} ({})",
            case.name(),
            value,
            case.unit,
            if passed { "pass" } else { "fail" }
        );

        TestResult::new(case, passed, value, duration, note)
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::types::Unit;
    use equipment::{CatalogKey, ConfigurationCatalog, EquipmentType, Operation};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pump_start() -> &'static EquipmentConfiguration {
        ConfigurationCatalog::new()
            .get(CatalogKey::new(EquipmentType::Pump, Operation::Start))
            .unwrap()
    }

    fn executor(seed: u64) -> TestExecutor<StdRng, ManualClock> {
        TestExecutor::new(StdRng::seed_from_u64(seed), ManualClock::new())
    }

    #[test]
    fn test_round_to_hundredths() {
        assert_eq!(round_to_hundredths(1.234), 1.23);
        assert_eq!(round_to_hundredths(1.236), 1.24);
        assert_eq!(round_to_hundredths(99.999), 100.0);
        assert_eq!(round_to_hundredths(0.0), 0.0);
    }

    #[test]
    fn test_seal_integrity_follows_its_own_value() {
        let config = pump_start();
        let case = TestCase::new(TestKind::SealIntegrity, Unit::Percent);
        let mut executor = executor(1);

        for _ in 0..2_000 {
            let result = executor.execute(&case, config);
            assert_eq!(result.passed, result.value > SEAL_INTEGRITY_THRESHOLD);
            assert!((0.0..=100.0).contains(&result.value));
            let expected_note = if result.passed {
                "Seal integrity excellent"
            } else {
                "Potential seal leakage detected"
            };
            assert_eq!(result.note.as_deref(), Some(expected_note));
        }
    }

    #[test]
    fn test_values_respect_scaling() {
        let config = pump_start();
        let mut executor = executor(2);

        for kind in [
            TestKind::Pressure,
            TestKind::FlowRate,
            TestKind::Temperature,
            TestKind::Vibration,
            TestKind::MotorCurrent,
        ] {
            let case = TestCase::new(kind, Unit::Percent);
            let scale = MeasurementScale::for_kind(kind, config);
            for _ in 0..500 {
                let result = executor.execute(&case, config);
                assert!(result.value >= 0.0);
                assert!(result.value <= round_to_hundredths(scale.upper_bound(result.passed)));
            }
        }
    }

    #[test]
    fn test_pressure_notes_and_bounds() {
        let config = pump_start();
        let case = TestCase::new(TestKind::Pressure, Unit::Psi);
        let mut executor = executor(3);

        let mut saw_pass = false;
        let mut saw_fail = false;
        for _ in 0..200 {
            let result = executor.execute(&case, config);
            if result.passed {
                saw_pass = true;
                assert!(result.value <= 120.0);
                assert_eq!(
                    result.note.as_deref(),
                    Some("Within normal range (< 150 PSI)")
                );
            } else {
                saw_fail = true;
                assert!(result.value <= 165.0);
                assert_eq!(
                    result.note.as_deref(),
                    Some("Exceeds maximum pressure limit!")
                );
            }
        }
        assert!(saw_pass && saw_fail);
    }

    #[test]
    fn test_operation_specific_notes() {
        let config = pump_start();
        let case = TestCase::new(TestKind::StartupTime, Unit::Seconds);
        let mut executor = executor(4);

        for _ in 0..200 {
            let result = executor.execute(&case, config);
            if result.passed {
                assert_eq!(result.note, None);
            } else {
                assert_eq!(result.note.as_deref(), Some(MAINTENANCE_NOTE));
            }
        }
    }

    #[test]
    fn test_duration_is_settle_delay() {
        let config = pump_start();
        let case = TestCase::new(TestKind::FlowRate, Unit::Gpm);
        let mut executor = executor(5);

        let mut total = Duration::ZERO;
        for _ in 0..100 {
            let result = executor.execute(&case, config);
            assert!(result.duration >= Duration::from_millis(500));
            assert!(result.duration < Duration::from_millis(1500));
            total += result.duration;
        }
        assert_eq!(executor.clock().elapsed(), total);
    }

    #[test]
    fn test_custom_settle_range() {
        let config = pump_start();
        let case = TestCase::new(TestKind::Vibration, Unit::MillimetersPerSecond);
        let settings = SimulationConfig::new()
            .with_settle_range(Duration::from_millis(1), Duration::from_millis(3));
        let mut executor =
            TestExecutor::with_config(StdRng::seed_from_u64(6), ManualClock::new(), &settings);

        for _ in 0..50 {
            let result = executor.execute(&case, config);
            assert!(result.duration >= Duration::from_millis(1));
            assert!(result.duration < Duration::from_millis(3));
        }
    }

    #[test]
    fn test_same_seed_same_results() {
        let config = pump_start();
        let case = TestCase::new(TestKind::Temperature, Unit::Fahrenheit);

        let mut first = executor(99);
        let mut second = executor(99);
        for _ in 0..20 {
            assert_eq!(first.execute(&case, config), second.execute(&case, config));
        }
    }
}
