//! In-progress modal input for validation and rejection.
//!
//! A draft holds what the physician has typed so far. It knows whether it is
//! ready to submit, and it turns into a [`LifecycleEvent`]. Cancelling a form
//! is `reset`, which restores the last-known values from the record.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::event::{ClinicalDecision, LifecycleEvent};
use crate::models::consultation::trimmed_chars;
use crate::models::{Consultation, SignatureRef};

// ═══════════════════════════════════════════════════════════
// ValidationDraft
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationDraft {
    pub diagnostic: String,
    pub traitement: String,
    pub recommandations: String,
    pub examen_complementaire: String,
    /// Signature uploaded in this session, if any.
    pub new_signature: Option<SignatureRef>,
}

impl ValidationDraft {
    /// Prefill from the record's current physician-authored fields.
    pub fn from_consultation(consultation: &Consultation) -> Self {
        Self {
            diagnostic: consultation.diagnostic.clone().unwrap_or_default(),
            traitement: consultation.traitement.clone().unwrap_or_default(),
            recommandations: consultation.recommandations.clone().unwrap_or_default(),
            examen_complementaire: consultation
                .examen_complementaire
                .clone()
                .unwrap_or_default(),
            new_signature: None,
        }
    }

    /// Discard local edits.
    pub fn reset(&mut self, consultation: &Consultation) {
        *self = Self::from_consultation(consultation);
    }

    /// Every precondition of `validate` this draft does not meet yet, in
    /// form order.
    pub fn missing_fields(&self, consultation: &Consultation) -> Vec<ValidationError> {
        let mut missing = Vec::new();
        if self.diagnostic.trim().is_empty() {
            missing.push(ValidationError::MissingDiagnostic);
        }
        if self.traitement.trim().is_empty() {
            missing.push(ValidationError::MissingTraitement);
        }
        let uploaded = self.new_signature.as_ref().is_some_and(|sig| !sig.is_blank());
        if !uploaded && !consultation.has_signature() {
            missing.push(ValidationError::MissingSignature);
        }
        missing
    }

    pub fn is_ready(&self, consultation: &Consultation) -> bool {
        self.missing_fields(consultation).is_empty()
    }

    pub fn into_validate_event(self) -> LifecycleEvent {
        let signature = self.new_signature.clone();
        LifecycleEvent::Validate {
            decision: self.into_decision(),
            signature,
        }
    }

    /// The "compléter" save: writes the fields, leaves the status alone.
    pub fn into_complete_event(self) -> LifecycleEvent {
        LifecycleEvent::Complete {
            decision: self.into_decision(),
        }
    }

    fn into_decision(self) -> ClinicalDecision {
        ClinicalDecision {
            diagnostic: self.diagnostic,
            traitement: self.traitement,
            recommandations: optional(self.recommandations),
            examen_complementaire: optional(self.examen_complementaire),
        }
    }
}

fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

// ═══════════════════════════════════════════════════════════
// RejectionDraft
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionDraft {
    pub reason: String,
}

impl RejectionDraft {
    pub fn is_ready(&self, min_chars: usize) -> bool {
        self.remaining_chars(min_chars) == 0
    }

    /// Characters still needed before the reason is long enough.
    pub fn remaining_chars(&self, min_chars: usize) -> usize {
        min_chars.saturating_sub(trimmed_chars(&self.reason))
    }

    pub fn clear(&mut self) {
        self.reason.clear();
    }

    pub fn into_event(self) -> LifecycleEvent {
        LifecycleEvent::Reject {
            reason: self.reason,
        }
    }
}
