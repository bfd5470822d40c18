//! Typed failures of the lifecycle engine.
//!
//! `ValidationError` is recoverable: the clinician supplies the missing data
//! and retries. `IllegalTransition` means the caller asked for an event the
//! current state does not accept, which is a caller bug.

use thiserror::Error;

use super::event::EventKind;
use crate::models::ConsultationStatus;

/// A transition precondition that the payload or record does not meet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Le diagnostic est obligatoire")]
    MissingDiagnostic,

    #[error("Le traitement est obligatoire")]
    MissingTraitement,

    #[error("Une signature du médecin est obligatoire")]
    MissingSignature,

    #[error("Le résultat de l'analyse IA est vide")]
    MissingAiResult,

    #[error("Le motif de rejet doit contenir au moins {min} caractères ({actual} saisis)")]
    RejectionReasonTooShort { min: usize, actual: usize },
}

impl ValidationError {
    /// Name of the consultation field the UI should highlight.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingDiagnostic => "diagnostic",
            Self::MissingTraitement => "traitement",
            Self::MissingSignature => "signature_medecin",
            Self::MissingAiResult => "diagnostic_ia",
            Self::RejectionReasonTooShort { .. } => "commentaire_rejet",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Illegal transition: {event} is not allowed from {from}")]
    IllegalTransition {
        from: ConsultationStatus,
        event: EventKind,
    },
}
