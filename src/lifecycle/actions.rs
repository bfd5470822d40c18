//! Dispatch surface for consultation actions.
//!
//! The presentation layer implements [`ConsultationActions`], with one
//! method per [`Action`]. [`dispatch`] runs the gating policy first and
//! only calls the handler for an enabled action. The `match` over
//! `Action` is exhaustive, so a new action will not compile until it has a
//! method here.

use thiserror::Error;

use super::gating::{gate, Action};
use crate::models::{Consultation, Role};

/// One method per gated action. Implemented by the presentation layer.
pub trait ConsultationActions {
    type Error;

    fn edit(&mut self, consultation: &Consultation) -> Result<(), Self::Error>;
    fn open_messages(&mut self, consultation: &Consultation) -> Result<(), Self::Error>;
    fn send_whatsapp(&mut self, consultation: &Consultation) -> Result<(), Self::Error>;
    fn rerun_ai(&mut self, consultation: &Consultation) -> Result<(), Self::Error>;
    fn print(&mut self, consultation: &Consultation) -> Result<(), Self::Error>;
    fn export_pdf(&mut self, consultation: &Consultation) -> Result<(), Self::Error>;
    fn quick_validate(&mut self, consultation: &Consultation) -> Result<(), Self::Error>;
    fn quick_reject(&mut self, consultation: &Consultation) -> Result<(), Self::Error>;
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DispatchError<E> {
    #[error("Action {action} is not available for this consultation")]
    Disabled { action: Action },

    #[error("Action handler failed: {0}")]
    Handler(E),
}

/// Run `action` on `handler` if the gating policy currently allows it.
pub fn dispatch<H: ConsultationActions>(
    handler: &mut H,
    consultation: &Consultation,
    role: Role,
    action: Action,
) -> Result<(), DispatchError<H::Error>> {
    if !gate(consultation, role).contains(action) {
        tracing::warn!(
            consultation_id = %consultation.id,
            status = %consultation.status,
            %role,
            %action,
            "Dispatch of disabled action refused"
        );
        return Err(DispatchError::Disabled { action });
    }

    let result = match action {
        Action::Edit => handler.edit(consultation),
        Action::Messages => handler.open_messages(consultation),
        Action::Whatsapp => handler.send_whatsapp(consultation),
        Action::RerunAi => handler.rerun_ai(consultation),
        Action::Print => handler.print(consultation),
        Action::ExportPdf => handler.export_pdf(consultation),
        Action::QuickValidate => handler.quick_validate(consultation),
        Action::QuickReject => handler.quick_reject(consultation),
    };
    result.map_err(DispatchError::Handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConsultationStatus, PatientInfo, SignatureRef, Urgency};

    /// Records every call; fails on `print` to exercise error propagation.
    #[derive(Default)]
    struct RecordingActions {
        calls: Vec<Action>,
    }

    impl RecordingActions {
        fn record(&mut self, action: Action) -> Result<(), String> {
            self.calls.push(action);
            if action == Action::Print {
                Err("printer offline".into())
            } else {
                Ok(())
            }
        }
    }

    impl ConsultationActions for RecordingActions {
        type Error = String;

        fn edit(&mut self, _: &Consultation) -> Result<(), String> {
            self.record(Action::Edit)
        }
        fn open_messages(&mut self, _: &Consultation) -> Result<(), String> {
            self.record(Action::Messages)
        }
        fn send_whatsapp(&mut self, _: &Consultation) -> Result<(), String> {
            self.record(Action::Whatsapp)
        }
        fn rerun_ai(&mut self, _: &Consultation) -> Result<(), String> {
            self.record(Action::RerunAi)
        }
        fn print(&mut self, _: &Consultation) -> Result<(), String> {
            self.record(Action::Print)
        }
        fn export_pdf(&mut self, _: &Consultation) -> Result<(), String> {
            self.record(Action::ExportPdf)
        }
        fn quick_validate(&mut self, _: &Consultation) -> Result<(), String> {
            self.record(Action::QuickValidate)
        }
        fn quick_reject(&mut self, _: &Consultation) -> Result<(), String> {
            self.record(Action::QuickReject)
        }
    }

    fn validated() -> Consultation {
        let mut c = Consultation::new(
            PatientInfo {
                nom: "Gueye".into(),
                telephone: Some("780000000".into()),
                ..Default::default()
            },
            Urgency::Normale,
        );
        c.status = ConsultationStatus::ValideMedecin;
        c.diagnostic = Some("Otite".into());
        c.traitement = Some("Amoxicilline".into());
        c.signature_medecin = SignatureRef::new("sig/1");
        c
    }

    #[test]
    fn every_enabled_action_reaches_its_own_method() {
        let c = validated();
        let enabled = gate(&c, Role::Medecin);
        for action in enabled.iter().filter(|a| *a != Action::Print) {
            let mut handler = RecordingActions::default();
            dispatch(&mut handler, &c, Role::Medecin, action).unwrap();
            assert_eq!(handler.calls, vec![action]);
        }
    }

    #[test]
    fn disabled_action_never_reaches_handler() {
        let mut handler = RecordingActions::default();
        let err = dispatch(&mut handler, &validated(), Role::Medecin, Action::Edit).unwrap_err();
        assert_eq!(err, DispatchError::Disabled { action: Action::Edit });
        assert!(handler.calls.is_empty());
    }

    #[test]
    fn handler_error_is_propagated() {
        let mut handler = RecordingActions::default();
        let err = dispatch(&mut handler, &validated(), Role::Medecin, Action::Print).unwrap_err();
        assert_eq!(err, DispatchError::Handler("printer offline".to_string()));
    }

    #[test]
    fn quick_decisions_dispatch_on_analysed_record() {
        let mut c = validated();
        c.status = ConsultationStatus::AnalyseTerminee;
        let mut handler = RecordingActions::default();
        dispatch(&mut handler, &c, Role::Medecin, Action::QuickValidate).unwrap();
        dispatch(&mut handler, &c, Role::Medecin, Action::QuickReject).unwrap();
        assert!(dispatch(&mut handler, &c, Role::Medecin, Action::Whatsapp).is_err());
        assert_eq!(handler.calls, vec![Action::QuickValidate, Action::QuickReject]);
    }
}
