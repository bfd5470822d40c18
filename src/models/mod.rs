//! Consultation record: entity, enums, derived predicates and the ingestion
//! boundary that turns external data into the canonical model.

pub mod consultation;
pub mod enums;
pub mod ingest;

pub use consultation::*;
pub use enums::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
