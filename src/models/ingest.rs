//! Ingestion boundary for consultations arriving from outside the core.
//!
//! API responses and legacy exports still use the secondary status
//! vocabulary. Parsing normalizes it into [`ConsultationStatus`], and the
//! record's invariants are checked before anything downstream sees it.

use thiserror::Error;

use super::consultation::{Consultation, InvariantViolation};
use super::enums::ConsultationStatus;
use super::ModelError;
use crate::config::EngineConfig;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Consultation {id} is inconsistent: {violation}")]
    Invariant {
        id: uuid::Uuid,
        violation: InvariantViolation,
    },
}

/// Normalize a bare status string, e.g. from a list endpoint or a filter.
pub fn normalize_status(raw: &str) -> Result<ConsultationStatus, IngestError> {
    Ok(raw.parse::<ConsultationStatus>()?)
}

/// Parse and normalize a consultation from a JSON document.
pub fn from_json(json: &str, config: &EngineConfig) -> Result<Consultation, IngestError> {
    let consultation: Consultation = serde_json::from_str(json)?;
    checked(consultation, config)
}

/// Parse and normalize a consultation from an already-decoded JSON value.
pub fn from_value(
    value: serde_json::Value,
    config: &EngineConfig,
) -> Result<Consultation, IngestError> {
    let consultation: Consultation = serde_json::from_value(value)?;
    checked(consultation, config)
}

fn checked(consultation: Consultation, config: &EngineConfig) -> Result<Consultation, IngestError> {
    consultation
        .check_invariants(config.min_rejection_reason_chars)
        .map_err(|violation| {
            tracing::warn!(
                consultation_id = %consultation.id,
                status = %consultation.status,
                %violation,
                "Refusing inconsistent consultation at ingestion"
            );
            IngestError::Invariant {
                id: consultation.id,
                violation,
            }
        })?;
    Ok(consultation)
}
