//! Consultation lifecycle core for an AI-assisted triage workflow.
//!
//! Consultations move from intake through automated analysis to physician
//! validation or rejection. This crate owns the state machine, the action
//! gating policy and the record predicates; rendering and persistence belong
//! to collaborators.

pub mod config;
pub mod lifecycle;
pub mod models;

pub use lifecycle::{gate, Action, ActionSet, LifecycleEngine, LifecycleError, LifecycleEvent};
pub use models::{is_complete, is_validated, Consultation, ConsultationStatus, Role};

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Honours `RUST_LOG`, falling back to [`config::default_log_filter`]. Safe
/// to call more than once; later calls are ignored.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} core v{}", config::APP_NAME, config::APP_VERSION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PatientInfo, SignatureRef, Urgency};

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }

    #[test]
    fn validate_then_read_back() {
        let engine = LifecycleEngine::default();
        let c = Consultation::new_in_analysis(
            PatientInfo {
                nom: "Cissé".into(),
                telephone: Some("+221 77 999 99 99".into()),
                ..Default::default()
            },
            Urgency::Elevee,
        );

        let c = engine
            .transition(
                &c,
                LifecycleEvent::AnalysisComplete {
                    diagnostic_ia: "Pneumopathie probable".into(),
                },
            )
            .unwrap();
        assert!(gate(&c, Role::Medecin).contains(Action::QuickValidate));

        let c = engine
            .transition(
                &c,
                LifecycleEvent::Validate {
                    decision: lifecycle::ClinicalDecision {
                        diagnostic: "Pneumopathie communautaire".into(),
                        traitement: "Amoxicilline 1g x3/j 7 jours".into(),
                        recommandations: Some("Contrôle à J3".into()),
                        examen_complementaire: Some("Radiographie thoracique".into()),
                    },
                    signature: SignatureRef::new("signatures/dr-diop.png"),
                },
            )
            .unwrap();

        assert!(is_validated(&c));
        assert!(is_complete(&c));
        assert!(c.has_signature());
        assert!(c.date_validation.is_some());

        let actions = gate(&c, Role::Medecin);
        for action in [Action::Messages, Action::Whatsapp, Action::Print, Action::ExportPdf] {
            assert!(actions.contains(action));
        }
        assert!(!actions.contains(Action::Edit));
    }
}
