//! Test plan generation
//!
//! A plan is the five baseline measurements followed by the cases specific to
//! the requested operation. Both lists are plain data so they can be audited
//! without reading the executor.

use crate::types::{TestCase, TestKind, Unit};
use equipment::{EquipmentConfiguration, Operation};

pub const BASELINE_CASES: [TestCase; 5] = [
    TestCase::new(TestKind::Pressure, Unit::Psi),
    TestCase::new(TestKind::FlowRate, Unit::Gpm),
    TestCase::new(TestKind::Temperature, Unit::Fahrenheit),
    TestCase::new(TestKind::Vibration, Unit::MillimetersPerSecond),
    TestCase::new(TestKind::SealIntegrity, Unit::Percent),
];

const OPENED_CASES: [TestCase; 2] = [
    TestCase::new(TestKind::OpeningTime, Unit::Seconds),
    TestCase::new(TestKind::FullOpenPosition, Unit::Percent),
];

const CLOSE_CASES: [TestCase; 2] = [
    TestCase::new(TestKind::ClosingTime, Unit::Seconds),
    TestCase::new(TestKind::LeakClosed, Unit::MillilitersPerMinute),
];

const START_CASES: [TestCase; 2] = [
    TestCase::new(TestKind::StartupTime, Unit::Seconds),
    TestCase::new(TestKind::MotorCurrent, Unit::Amps),
];

const STOP_CASES: [TestCase; 2] = [
    TestCase::new(TestKind::ShutdownTime, Unit::Seconds),
    TestCase::new(TestKind::CoastDown, Unit::Seconds),
];

const TEST_CASES: [TestCase; 3] = [
    TestCase::new(TestKind::Efficiency, Unit::Percent),
    TestCase::new(TestKind::PowerConsumption, Unit::Kilowatts),
    TestCase::new(TestKind::NoiseLevel, Unit::Decibels),
];

/// Cases appended after the baseline for an operation
pub fn operation_cases(operation: Operation) -> &'static [TestCase] {
    match operation {
        Operation::Opened => &OPENED_CASES,
        Operation::Close => &CLOSE_CASES,
        Operation::Start => &START_CASES,
        Operation::Stop => &STOP_CASES,
        Operation::Test => &TEST_CASES,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TestPlanGenerator;

impl TestPlanGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Ordered test cases for a resolved configuration
    pub fn plan(&self, config: &EquipmentConfiguration) -> Vec<TestCase> {
        let extra = operation_cases(config.operation);
        let mut cases = Vec::with_capacity(BASELINE_CASES.len() + extra.len());
        cases.extend_from_slice(&BASELINE_CASES);
        cases.extend_from_slice(extra);
        cases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equipment::{CatalogKey, ConfigurationCatalog, EquipmentType};

    fn config(operation: Operation) -> &'static EquipmentConfiguration {
        ConfigurationCatalog::new()
            .get(CatalogKey::new(EquipmentType::Pump, operation))
            .unwrap()
    }

    fn kinds(cases: &[TestCase]) -> Vec<TestKind> {
        cases.iter().map(|c| c.kind).collect()
    }

    #[test]
    fn test_plan_sizes() {
        let generator = TestPlanGenerator::new();
        for operation in Operation::ALL {
            let expected = if operation == Operation::Test { 8 } else { 7 };
            assert_eq!(generator.plan(config(operation)).len(), expected);
        }
    }

    #[test]
    fn test_plan_starts_with_baseline() {
        let generator = TestPlanGenerator::new();
        for operation in Operation::ALL {
            let plan = generator.plan(config(operation));
            assert_eq!(
                kinds(&plan[..5]),
                vec![
                    TestKind::Pressure,
                    TestKind::FlowRate,
                    TestKind::Temperature,
                    TestKind::Vibration,
                    TestKind::SealIntegrity,
                ]
            );
            assert!(plan[5..].iter().all(|c| !c.kind.is_baseline()));
        }
    }

    #[test]
    fn test_operation_specific_cases() {
        let generator = TestPlanGenerator::new();

        let close = generator.plan(config(Operation::Close));
        assert_eq!(
            kinds(&close[5..]),
            vec![TestKind::ClosingTime, TestKind::LeakClosed]
        );
        assert_eq!(close[6].unit, Unit::MillilitersPerMinute);

        let test = generator.plan(config(Operation::Test));
        assert_eq!(
            kinds(&test[5..]),
            vec![
                TestKind::Efficiency,
                TestKind::PowerConsumption,
                TestKind::NoiseLevel
            ]
        );
        assert_eq!(test[7].unit, Unit::Decibels);

        let opened = generator.plan(config(Operation::Opened));
        assert_eq!(opened[6].name(), "Full Open Position Test");
    }
}
