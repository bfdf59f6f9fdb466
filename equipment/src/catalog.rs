//! Static catalog of equipment operating limits
//!
//! Every supported (equipment type, operation) pair has exactly one entry. The
//! limits are per equipment type; only the nominal test duration varies by
//! operation. Lookups go through [`CatalogKey`], never through concatenated
//! strings.

use crate::types::{EquipmentType, Operation, ParseEquipmentError};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unsupported equipment type '{equipment_type}' or operation '{operation}'")]
    Unsupported {
        equipment_type: String,
        operation: String,
    },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Composite lookup key for the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CatalogKey {
    pub equipment_type: EquipmentType,
    pub operation: Operation,
}

impl CatalogKey {
    pub const fn new(equipment_type: EquipmentType, operation: Operation) -> Self {
        Self {
            equipment_type,
            operation,
        }
    }

    /// Parse both halves of the key case-insensitively
    pub fn parse(equipment_type: &str, operation: &str) -> Result<Self, ParseEquipmentError> {
        Ok(Self::new(equipment_type.parse()?, operation.parse()?))
    }
}

/// Physical limits shared by every operation of one equipment type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperatingLimits {
    /// PSI
    pub max_pressure: f64,
    /// GPM
    pub max_flow: f64,
    /// °F
    pub max_temperature: f64,
}

const PUMP_LIMITS: OperatingLimits = OperatingLimits {
    max_pressure: 150.0,
    max_flow: 500.0,
    max_temperature: 180.0,
};

const COMPRESSOR_LIMITS: OperatingLimits = OperatingLimits {
    max_pressure: 300.0,
    max_flow: 200.0,
    max_temperature: 220.0,
};

const VALVE_LIMITS: OperatingLimits = OperatingLimits {
    max_pressure: 600.0,
    max_flow: 1000.0,
    max_temperature: 400.0,
};

/// Resolved limits for one (equipment type, operation) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentConfiguration {
    pub equipment_type: EquipmentType,
    pub operation: Operation,
    /// Display name of the equipment, e.g. "Centrifugal Pump"
    pub type_name: &'static str,
    /// Display name of the operation, e.g. "Opened"
    pub operation_name: &'static str,
    pub max_pressure: f64,
    pub max_flow: f64,
    pub max_temperature: f64,
    /// Nominal duration of the full test sequence
    pub test_duration: Duration,
}

impl EquipmentConfiguration {
    const fn entry(
        equipment_type: EquipmentType,
        operation: Operation,
        limits: OperatingLimits,
        duration_secs: u64,
    ) -> Self {
        Self {
            equipment_type,
            operation,
            type_name: equipment_type.display_name(),
            operation_name: operation.display_name(),
            max_pressure: limits.max_pressure,
            max_flow: limits.max_flow,
            max_temperature: limits.max_temperature,
            test_duration: Duration::from_secs(duration_secs),
        }
    }

    pub fn key(&self) -> CatalogKey {
        CatalogKey::new(self.equipment_type, self.operation)
    }

    pub fn limits(&self) -> OperatingLimits {
        OperatingLimits {
            max_pressure: self.max_pressure,
            max_flow: self.max_flow,
            max_temperature: self.max_temperature,
        }
    }
}

use EquipmentType::{Compressor, Pump, Valve};
use Operation::{Close, Opened, Start, Stop, Test};

static CATALOG: [EquipmentConfiguration; 15] = [
    EquipmentConfiguration::entry(Pump, Opened, PUMP_LIMITS, 30),
    EquipmentConfiguration::entry(Pump, Close, PUMP_LIMITS, 15),
    EquipmentConfiguration::entry(Pump, Start, PUMP_LIMITS, 45),
    EquipmentConfiguration::entry(Pump, Stop, PUMP_LIMITS, 20),
    EquipmentConfiguration::entry(Pump, Test, PUMP_LIMITS, 60),
    EquipmentConfiguration::entry(Compressor, Opened, COMPRESSOR_LIMITS, 25),
    EquipmentConfiguration::entry(Compressor, Close, COMPRESSOR_LIMITS, 20),
    EquipmentConfiguration::entry(Compressor, Start, COMPRESSOR_LIMITS, 50),
    EquipmentConfiguration::entry(Compressor, Stop, COMPRESSOR_LIMITS, 25),
    EquipmentConfiguration::entry(Compressor, Test, COMPRESSOR_LIMITS, 90),
    EquipmentConfiguration::entry(Valve, Opened, VALVE_LIMITS, 10),
    EquipmentConfiguration::entry(Valve, Close, VALVE_LIMITS, 10),
    EquipmentConfiguration::entry(Valve, Start, VALVE_LIMITS, 15),
    EquipmentConfiguration::entry(Valve, Stop, VALVE_LIMITS, 15),
    EquipmentConfiguration::entry(Valve, Test, VALVE_LIMITS, 30),
];

/// Read-only registry of every supported configuration
#[derive(Debug, Clone, Copy)]
pub struct ConfigurationCatalog {
    entries: &'static [EquipmentConfiguration],
}

impl ConfigurationCatalog {
    pub fn new() -> Self {
        Self { entries: &CATALOG }
    }

    pub fn entries(&self) -> &'static [EquipmentConfiguration] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: CatalogKey) -> Option<&'static EquipmentConfiguration> {
        self.entries.iter().find(|entry| entry.key() == key)
    }

    /// Resolve user-supplied tokens to a configuration.
    ///
    /// Matching is case-insensitive. An unknown equipment type and an unknown
    /// operation are reported the same way.
    pub fn resolve(
        &self,
        equipment_type: &str,
        operation: &str,
    ) -> CatalogResult<&'static EquipmentConfiguration> {
        let unsupported = || CatalogError::Unsupported {
            equipment_type: equipment_type.to_string(),
            operation: operation.to_string(),
        };

        let key = CatalogKey::parse(equipment_type, operation).map_err(|_| unsupported())?;
        self.get(key).ok_or_else(unsupported)
    }
}

impl Default for ConfigurationCatalog {
    fn default() -> Self {
        Self::new()
    }
}
