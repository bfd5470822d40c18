use serde::{Deserialize, Serialize};

use crate::models::SignatureRef;

/// Physician-authored clinical fields written by `validate` and `complete`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalDecision {
    pub diagnostic: String,
    pub traitement: String,
    pub recommandations: Option<String>,
    pub examen_complementaire: Option<String>,
}

/// An event submitted to the lifecycle engine, with its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    StartAnalysis,
    AnalysisComplete {
        diagnostic_ia: String,
    },
    Validate {
        #[serde(flatten)]
        decision: ClinicalDecision,
        /// Newly uploaded signature. `None` reuses the stored one.
        signature: Option<SignatureRef>,
    },
    Reject {
        reason: String,
    },
    RerunAnalysis,
    Complete {
        #[serde(flatten)]
        decision: ClinicalDecision,
    },
}

/// Payload-free discriminant of [`LifecycleEvent`], for errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    StartAnalysis,
    AnalysisComplete,
    Validate,
    Reject,
    RerunAnalysis,
    Complete,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartAnalysis => "start_analysis",
            Self::AnalysisComplete => "analysis_complete",
            Self::Validate => "validate",
            Self::Reject => "reject",
            Self::RerunAnalysis => "rerun_analysis",
            Self::Complete => "complete",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl LifecycleEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::StartAnalysis => EventKind::StartAnalysis,
            Self::AnalysisComplete { .. } => EventKind::AnalysisComplete,
            Self::Validate { .. } => EventKind::Validate,
            Self::Reject { .. } => EventKind::Reject,
            Self::RerunAnalysis => EventKind::RerunAnalysis,
            Self::Complete { .. } => EventKind::Complete,
        }
    }
}
