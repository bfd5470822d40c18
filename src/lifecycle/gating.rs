//! Action gating policy.
//!
//! Decides which UI actions are enabled for a consultation. The decision is
//! recomputed from the record's current fields every time; callers must not
//! cache it.
//!
//! Rules are evaluated independently, so several actions can be enabled at
//! once:
//! - `edit`: not validated
//! - `messages`: validated
//! - `whatsapp`: validated, complete, patient phone on file
//! - `rerun_ai`: in analysis and validated
//! - `print` / `export_pdf`: validated and complete
//! - `quick_validate` / `quick_reject`: analysis done

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{Consultation, ConsultationStatus, Role};

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// "Compléter": edit the physician-authored fields.
    Edit,
    Messages,
    Whatsapp,
    RerunAi,
    Print,
    ExportPdf,
    QuickValidate,
    QuickReject,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Messages => "messages",
            Self::Whatsapp => "whatsapp",
            Self::RerunAi => "rerun_ai",
            Self::Print => "print",
            Self::ExportPdf => "export_pdf",
            Self::QuickValidate => "quick_validate",
            Self::QuickReject => "quick_reject",
        }
    }

    pub fn all() -> &'static [Action] {
        &[
            Self::Edit,
            Self::Messages,
            Self::Whatsapp,
            Self::RerunAi,
            Self::Print,
            Self::ExportPdf,
            Self::QuickValidate,
            Self::QuickReject,
        ]
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The set of enabled actions. Ordered, so equal decisions compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionSet(BTreeSet<Action>);

impl ActionSet {
    pub fn contains(&self, action: Action) -> bool {
        self.0.contains(&action)
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn enable_if(&mut self, condition: bool, action: Action) {
        if condition {
            self.0.insert(action);
        }
    }
}

/// Everything the policy looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateInput {
    pub status: ConsultationStatus,
    pub is_complete: bool,
    pub is_validated: bool,
    pub has_phone: bool,
    pub role: Role,
}

impl GateInput {
    pub fn from_consultation(consultation: &Consultation, role: Role) -> Self {
        Self {
            status: consultation.status,
            is_complete: consultation.is_complete(),
            is_validated: consultation.is_validated(),
            has_phone: consultation.has_phone(),
            role,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Policy
// ═══════════════════════════════════════════════════════════

/// Evaluate the gating rules. The rules do not currently depend on `role`.
pub fn evaluate(input: &GateInput) -> ActionSet {
    let GateInput {
        status,
        is_complete,
        is_validated,
        has_phone,
        role: _,
    } = *input;
    let publishable = is_validated && is_complete;

    let mut actions = ActionSet::default();
    actions.enable_if(!is_validated, Action::Edit);
    actions.enable_if(is_validated, Action::Messages);
    actions.enable_if(publishable && has_phone, Action::Whatsapp);
    actions.enable_if(status == ConsultationStatus::EnAnalyse && is_validated, Action::RerunAi);
    actions.enable_if(publishable, Action::Print);
    actions.enable_if(publishable, Action::ExportPdf);
    actions.enable_if(status == ConsultationStatus::AnalyseTerminee, Action::QuickValidate);
    actions.enable_if(status == ConsultationStatus::AnalyseTerminee, Action::QuickReject);
    actions
}

/// Enabled actions for `consultation` as seen by `role`.
pub fn gate(consultation: &Consultation, role: Role) -> ActionSet {
    let input = GateInput::from_consultation(consultation, role);
    let actions = evaluate(&input);
    tracing::debug!(
        consultation_id = %consultation.id,
        status = %input.status,
        %role,
        enabled = ?actions.iter().map(|a| a.as_str()).collect::<Vec<_>>(),
        "Gated consultation actions"
    );
    actions
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
