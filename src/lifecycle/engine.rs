//! Consultation lifecycle state machine.
//!
//! ```text
//! en_attente ──start_analysis──▶ en_analyse ──analysis_complete──▶ analyse_terminee
//!                                    │ ▲                              │        │
//!                                    └─┘ rerun_analysis       validate│        │reject
//!                                                                     ▼        ▼
//!                                                          valide_medecin  rejete_medecin
//!                                                               │ ▲
//!                                                               └─┘ complete
//! ```
//!
//! Every transition is a pure function of the current record and the event:
//! the input is never mutated and the updated record is returned. Saving it
//! is the caller's job (see [`super::store`]).

use chrono::{DateTime, Utc};

use super::error::{LifecycleError, ValidationError};
use super::event::{ClinicalDecision, LifecycleEvent};
use crate::config::EngineConfig;
use crate::models::consultation::trimmed_chars;
use crate::models::{Consultation, ConsultationStatus, SignatureRef};

/// Applies lifecycle events to consultations.
#[derive(Debug, Clone, Default)]
pub struct LifecycleEngine {
    config: EngineConfig,
}

impl LifecycleEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply `event` to `consultation`, stamping timestamps with the current time.
    pub fn transition(
        &self,
        consultation: &Consultation,
        event: LifecycleEvent,
    ) -> Result<Consultation, LifecycleError> {
        self.transition_at(consultation, event, Utc::now())
    }

    /// Apply `event` to `consultation` using `now` for any timestamp it sets.
    pub fn transition_at(
        &self,
        consultation: &Consultation,
        event: LifecycleEvent,
        now: DateTime<Utc>,
    ) -> Result<Consultation, LifecycleError> {
        let from = consultation.status;
        let kind = event.kind();

        let result = self.apply(consultation, event, now);
        match &result {
            Ok(next) => tracing::info!(
                consultation_id = %consultation.id,
                %from,
                to = %next.status,
                event = %kind,
                "Consultation transition accepted"
            ),
            Err(LifecycleError::IllegalTransition { .. }) => tracing::warn!(
                consultation_id = %consultation.id,
                %from,
                event = %kind,
                "Illegal consultation transition requested"
            ),
            Err(LifecycleError::Validation(e)) => tracing::debug!(
                consultation_id = %consultation.id,
                %from,
                event = %kind,
                field = e.field(),
                "Consultation transition refused: {e}"
            ),
        }
        result
    }

    fn apply(
        &self,
        current: &Consultation,
        event: LifecycleEvent,
        now: DateTime<Utc>,
    ) -> Result<Consultation, LifecycleError> {
        use ConsultationStatus::*;

        let illegal = |event: &LifecycleEvent| LifecycleError::IllegalTransition {
            from: current.status,
            event: event.kind(),
        };

        match (current.status, event) {
            (EnAttente, LifecycleEvent::StartAnalysis) => {
                let mut next = current.clone();
                next.status = EnAnalyse;
                Ok(next)
            }

            (EnAnalyse, LifecycleEvent::AnalysisComplete { diagnostic_ia }) => {
                if diagnostic_ia.trim().is_empty() {
                    return Err(ValidationError::MissingAiResult.into());
                }
                let mut next = current.clone();
                next.status = AnalyseTerminee;
                next.diagnostic_ia = Some(diagnostic_ia);
                Ok(next)
            }

            (AnalyseTerminee, LifecycleEvent::Validate { decision, signature }) => {
                check_decision(&decision)?;
                let signature = resolve_signature(current, signature)?;

                let mut next = current.clone();
                write_decision(&mut next, decision);
                next.signature_medecin = Some(signature);
                next.status = ValideMedecin;
                next.date_validation = Some(now);
                Ok(next)
            }

            (AnalyseTerminee, LifecycleEvent::Reject { reason }) => {
                let min = self.config.min_rejection_reason_chars;
                let actual = trimmed_chars(&reason);
                if actual < min {
                    return Err(ValidationError::RejectionReasonTooShort { min, actual }.into());
                }
                let mut next = current.clone();
                next.status = RejeteMedecin;
                next.commentaire_rejet = Some(reason.trim().to_string());
                next.date_rejet = Some(now);
                Ok(next)
            }

            // Re-analysis only of an already-validated record.
            (EnAnalyse, event @ LifecycleEvent::RerunAnalysis) => {
                if current.is_validated() {
                    Ok(current.clone())
                } else {
                    Err(illegal(&event))
                }
            }

            (status, LifecycleEvent::Complete { decision }) if status != RejeteMedecin => {
                // A validated record must stay complete.
                if status == ValideMedecin {
                    check_decision(&decision)?;
                }
                let mut next = current.clone();
                write_decision(&mut next, decision);
                next.date_completee = Some(now);
                Ok(next)
            }

            (_, event) => Err(illegal(&event)),
        }
    }
}

fn check_decision(decision: &ClinicalDecision) -> Result<(), ValidationError> {
    if decision.diagnostic.trim().is_empty() {
        return Err(ValidationError::MissingDiagnostic);
    }
    if decision.traitement.trim().is_empty() {
        return Err(ValidationError::MissingTraitement);
    }
    Ok(())
}

/// A freshly uploaded signature wins; otherwise the stored one is reused.
fn resolve_signature(
    current: &Consultation,
    uploaded: Option<SignatureRef>,
) -> Result<SignatureRef, ValidationError> {
    match uploaded.and_then(|sig| SignatureRef::new(sig.as_str())) {
        Some(sig) => Ok(sig),
        None if current.has_signature() => current
            .signature_medecin
            .clone()
            .ok_or(ValidationError::MissingSignature),
        None => Err(ValidationError::MissingSignature),
    }
}

fn write_decision(next: &mut Consultation, decision: ClinicalDecision) {
    next.diagnostic = Some(decision.diagnostic);
    next.traitement = Some(decision.traitement);
    next.recommandations = non_blank(decision.recommandations);
    next.examen_complementaire = non_blank(decision.examen_complementaire);
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
