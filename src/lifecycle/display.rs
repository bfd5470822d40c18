//! Status and urgency badges for the presentation layer.
//!
//! Table lookups over the canonical enums. Raw strings go through
//! [`crate::models::ingest::normalize_status`] first, so the legacy
//! vocabulary lands in the same five buckets.

use serde::Serialize;

use crate::models::ingest::normalize_status;
use crate::models::{ConsultationStatus, Urgency};

/// Design-system color token. The UI maps these to actual colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
    Neutral,
    Info,
    Warning,
    Success,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDisplay {
    pub color: ColorToken,
    pub label: &'static str,
}

impl StatusDisplay {
    pub fn for_status(status: ConsultationStatus) -> Self {
        let (color, label) = match status {
            ConsultationStatus::EnAttente => (ColorToken::Neutral, "En attente"),
            ConsultationStatus::EnAnalyse => (ColorToken::Info, "En analyse"),
            ConsultationStatus::AnalyseTerminee => (ColorToken::Warning, "Analyse terminée"),
            ConsultationStatus::ValideMedecin => (ColorToken::Success, "Validée"),
            ConsultationStatus::RejeteMedecin => (ColorToken::Danger, "Rejetée"),
        };
        Self { color, label }
    }

    /// `None` for strings outside both vocabularies.
    pub fn for_raw(raw: &str) -> Option<Self> {
        normalize_status(raw).ok().map(Self::for_status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UrgencyDisplay {
    pub color: ColorToken,
    pub label: &'static str,
}

impl UrgencyDisplay {
    pub fn for_urgency(urgency: Urgency) -> Self {
        let (color, label) = match urgency {
            Urgency::Faible => (ColorToken::Neutral, "Faible"),
            Urgency::Normale => (ColorToken::Info, "Normale"),
            Urgency::Elevee => (ColorToken::Warning, "Élevée"),
            Urgency::Critique => (ColorToken::Danger, "Critique"),
        };
        Self { color, label }
    }
}
