pub mod catalog;
pub mod types;

pub use catalog::{
    CatalogError, CatalogKey, CatalogResult, ConfigurationCatalog, EquipmentConfiguration,
    OperatingLimits,
};
pub use types::{EquipmentType, Operation, ParseEquipmentError};

pub mod prelude {
    pub use crate::catalog::*;
    pub use crate::types::*;
}
