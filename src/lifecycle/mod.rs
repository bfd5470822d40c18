//! Consultation lifecycle engine.
//!
//! ## Architecture
//!
//! ```text
//! drafts ──event──▶ engine ──Consultation──▶ store (collaborator)
//!                     │
//!                     ▼
//!                  gating ──ActionSet──▶ actions (collaborator)
//! ```
//!
//! - `engine`: state machine over [`crate::models::ConsultationStatus`]
//! - `gating`: which UI actions are enabled right now
//! - `display`: status/urgency badges
//! - `drafts`: validation/rejection modal state
//! - `actions`: gated dispatch to the presentation layer
//! - `store`: async persistence seam

pub mod actions;
pub mod display;
pub mod drafts;
pub mod engine;
pub mod error;
pub mod event;
pub mod gating;
pub mod store;

pub use actions::{dispatch, ConsultationActions, DispatchError};
pub use display::{ColorToken, StatusDisplay, UrgencyDisplay};
pub use drafts::{RejectionDraft, ValidationDraft};
pub use engine::LifecycleEngine;
pub use error::{LifecycleError, ValidationError};
pub use event::{ClinicalDecision, EventKind, LifecycleEvent};
pub use gating::{evaluate, gate, Action, ActionSet, GateInput};
pub use store::{submit, ConsultationStore, SubmitError};
