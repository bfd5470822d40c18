//! The consultation entity and its derived predicates.
//!
//! Completeness, validation and phone presence are recomputed from the
//! record's fields on every call. Nothing here caches them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{ConsultationStatus, Urgency};

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// Opaque reference to a stored physician signature asset.
///
/// The core only ever checks that one is present; the bytes live with the
/// asset store collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureRef(String);

impl SignatureRef {
    /// Returns `None` for a blank reference.
    pub fn new(reference: impl Into<String>) -> Option<Self> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            None
        } else {
            Some(Self(reference))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adresse {
    pub rue: Option<String>,
    pub quartier: Option<String>,
    pub ville: Option<String>,
}

/// Patient identity fields. Free-form, presence checks only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientInfo {
    pub nom: String,
    pub prenom: Option<String>,
    pub age: Option<u32>,
    pub sexe: Option<String>,
    pub telephone: Option<String>,
    pub adresse: Adresse,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignesVitaux {
    pub tension_arterielle: Option<String>,
    pub temperature: Option<String>,
    pub frequence_cardiaque: Option<String>,
    pub frequence_respiratoire: Option<String>,
    pub saturation_oxygene: Option<String>,
    pub poids: Option<String>,
    pub taille: Option<String>,
    pub glycemie: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamenPhysique {
    pub general: Option<String>,
    pub cardiovasculaire: Option<String>,
    pub respiratoire: Option<String>,
    pub abdominal: Option<String>,
    pub neurologique: Option<String>,
    pub autres: Option<String>,
}

/// One patient encounter tracked from intake to physician sign-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consultation {
    pub id: Uuid,
    #[serde(default)]
    pub patient: PatientInfo,

    // Clinical
    #[serde(default)]
    pub motif: Option<String>,
    #[serde(default)]
    pub histoire: Option<String>,
    #[serde(default)]
    pub antecedents: Option<String>,
    #[serde(default)]
    pub signes_vitaux: SignesVitaux,
    #[serde(default)]
    pub examen_physique: ExamenPhysique,

    // Workflow
    pub status: ConsultationStatus,
    #[serde(default)]
    pub urgence: Urgency,
    #[serde(default)]
    pub diagnostic: Option<String>,
    #[serde(default)]
    pub traitement: Option<String>,
    #[serde(default)]
    pub recommandations: Option<String>,
    #[serde(default)]
    pub examen_complementaire: Option<String>,
    #[serde(default)]
    pub diagnostic_ia: Option<String>,
    #[serde(default)]
    pub commentaire_rejet: Option<String>,
    #[serde(default)]
    pub signature_medecin: Option<SignatureRef>,

    pub date_creation: DateTime<Utc>,
    #[serde(default)]
    pub date_validation: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_rejet: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_completee: Option<DateTime<Utc>>,
}

/// A record whose fields contradict its status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("validated consultation has no diagnostic")]
    ValidatedWithoutDiagnostic,
    #[error("validated consultation has no traitement")]
    ValidatedWithoutTraitement,
    #[error("validated consultation has no signature")]
    ValidatedWithoutSignature,
    #[error("rejected consultation comment is {actual} chars, minimum is {min}")]
    RejectedWithoutReason { min: usize, actual: usize },
}

// ═══════════════════════════════════════════════════════════
// Construction
// ═══════════════════════════════════════════════════════════

impl Consultation {
    /// New consultation waiting for triage.
    pub fn new(patient: PatientInfo, urgence: Urgency) -> Self {
        Self::with_status(patient, urgence, ConsultationStatus::EnAttente)
    }

    /// New consultation whose intake already kicked off automated analysis.
    pub fn new_in_analysis(patient: PatientInfo, urgence: Urgency) -> Self {
        Self::with_status(patient, urgence, ConsultationStatus::EnAnalyse)
    }

    fn with_status(patient: PatientInfo, urgence: Urgency, status: ConsultationStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient,
            motif: None,
            histoire: None,
            antecedents: None,
            signes_vitaux: SignesVitaux::default(),
            examen_physique: ExamenPhysique::default(),
            status,
            urgence,
            diagnostic: None,
            traitement: None,
            recommandations: None,
            examen_complementaire: None,
            diagnostic_ia: None,
            commentaire_rejet: None,
            signature_medecin: None,
            date_creation: Utc::now(),
            date_validation: None,
            date_rejet: None,
            date_completee: None,
        }
    }

    // ── Derived predicates ─────────────────────────────────

    /// Both diagnostic and traitement carry text after trimming.
    pub fn is_complete(&self) -> bool {
        is_filled(&self.diagnostic) && is_filled(&self.traitement)
    }

    pub fn is_validated(&self) -> bool {
        self.status == ConsultationStatus::ValideMedecin
    }

    pub fn has_phone(&self) -> bool {
        is_filled(&self.patient.telephone)
    }

    pub fn has_signature(&self) -> bool {
        self.signature_medecin
            .as_ref()
            .is_some_and(|sig| !sig.is_blank())
    }

    /// Check that the fields agree with the status.
    ///
    /// Records produced by the engine always pass; this guards records that
    /// arrive from outside (API payloads, legacy exports).
    pub fn check_invariants(
        &self,
        min_rejection_reason_chars: usize,
    ) -> Result<(), InvariantViolation> {
        match self.status {
            ConsultationStatus::ValideMedecin => {
                if !is_filled(&self.diagnostic) {
                    return Err(InvariantViolation::ValidatedWithoutDiagnostic);
                }
                if !is_filled(&self.traitement) {
                    return Err(InvariantViolation::ValidatedWithoutTraitement);
                }
                if !self.has_signature() {
                    return Err(InvariantViolation::ValidatedWithoutSignature);
                }
            }
            ConsultationStatus::RejeteMedecin => {
                let actual = trimmed_chars(self.commentaire_rejet.as_deref().unwrap_or(""));
                if actual < min_rejection_reason_chars {
                    return Err(InvariantViolation::RejectedWithoutReason {
                        min: min_rejection_reason_chars,
                        actual,
                    });
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Free-function form of [`Consultation::is_complete`].
pub fn is_complete(consultation: &Consultation) -> bool {
    consultation.is_complete()
}

/// Free-function form of [`Consultation::is_validated`].
pub fn is_validated(consultation: &Consultation) -> bool {
    consultation.is_validated()
}

// ═══════════════════════════════════════════════════════════
// Text helpers
// ═══════════════════════════════════════════════════════════

pub(crate) fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Length in characters (not bytes) after trimming.
pub(crate) fn trimmed_chars(value: &str) -> usize {
    value.trim().chars().count()
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
