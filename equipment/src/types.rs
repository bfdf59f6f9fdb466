use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseEquipmentError {
    #[error("Unknown equipment type: {0}")]
    UnknownEquipmentType(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

/// Kind of equipment under test. Determines the physical limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentType {
    Pump,
    Compressor,
    Valve,
}

impl EquipmentType {
    pub const ALL: [EquipmentType; 3] = [
        EquipmentType::Pump,
        EquipmentType::Compressor,
        EquipmentType::Valve,
    ];

    /// Command-line token for this equipment type
    pub const fn as_str(self) -> &'static str {
        match self {
            EquipmentType::Pump => "pump",
            EquipmentType::Compressor => "compressor",
            EquipmentType::Valve => "valve",
        }
    }

    /// Name shown in reports
    pub const fn display_name(self) -> &'static str {
        match self {
            EquipmentType::Pump => "Centrifugal Pump",
            EquipmentType::Compressor => "Rotary Compressor",
            EquipmentType::Valve => "Ball Valve",
        }
    }
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentType {
    type Err = ParseEquipmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pump" => Ok(EquipmentType::Pump),
            "compressor" => Ok(EquipmentType::Compressor),
            "valve" => Ok(EquipmentType::Valve),
            _ => Err(ParseEquipmentError::UnknownEquipmentType(s.to_string())),
        }
    }
}

/// Operation the equipment is being accepted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Opened,
    Close,
    Start,
    Stop,
    Test,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Opened,
        Operation::Close,
        Operation::Start,
        Operation::Stop,
        Operation::Test,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Opened => "opened",
            Operation::Close => "close",
            Operation::Start => "start",
            Operation::Stop => "stop",
            Operation::Test => "test",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Operation::Opened => "Opened",
            Operation::Close => "Close",
            Operation::Start => "Start",
            Operation::Stop => "Stop",
            Operation::Test => "Test",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ParseEquipmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "opened" => Ok(Operation::Opened),
            "close" => Ok(Operation::Close),
            "start" => Ok(Operation::Start),
            "stop" => Ok(Operation::Stop),
            "test" => Ok(Operation::Test),
            _ => Err(ParseEquipmentError::UnknownOperation(s.to_string())),
        }
    }
}
