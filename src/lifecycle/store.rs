//! Persistence seam.
//!
//! The core never stores anything itself. A transition is computed locally,
//! then handed once to the collaborator's [`ConsultationStore::save`]. Store
//! failures come back unmodified, and the core does not retry.

use std::future::Future;

use thiserror::Error;

use super::engine::LifecycleEngine;
use super::error::LifecycleError;
use super::event::LifecycleEvent;
use crate::models::Consultation;

/// Collaborator-owned persistence (backend API, local database, ...).
pub trait ConsultationStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist `consultation` and return the stored version.
    fn save(
        &self,
        consultation: Consultation,
    ) -> impl Future<Output = Result<Consultation, Self::Error>> + Send;
}

#[derive(Error, Debug)]
pub enum SubmitError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("Failed to save consultation: {0}")]
    Store(#[source] E),
}

/// Apply `event` locally, then save the result.
///
/// Nothing is saved when the transition is refused.
pub async fn submit<S: ConsultationStore>(
    engine: &LifecycleEngine,
    store: &S,
    consultation: &Consultation,
    event: LifecycleEvent,
) -> Result<Consultation, SubmitError<S::Error>> {
    let next = engine.transition(consultation, event)?;
    let id = next.id;
    store.save(next).await.map_err(|e| {
        tracing::error!(consultation_id = %id, "Consultation save failed: {e}");
        SubmitError::Store(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::Mutex;
    use uuid::Uuid;

    use crate::lifecycle::event::ClinicalDecision;
    use crate::lifecycle::ValidationError;
    use crate::models::{ConsultationStatus, PatientInfo, SignatureRef, Urgency};

    #[derive(Debug, Error)]
    #[error("backend unavailable")]
    struct Unavailable;

    /// In-memory store that can be switched to fail every save.
    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<HashMap<Uuid, Consultation>>,
        saves: AtomicUsize,
        fail: bool,
    }

    impl ConsultationStore for MemoryStore {
        type Error = Unavailable;

        async fn save(&self, consultation: Consultation) -> Result<Consultation, Unavailable> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Unavailable);
            }
            self.records
                .lock()
                .await
                .insert(consultation.id, consultation.clone());
            Ok(consultation)
        }
    }

    fn analysed() -> Consultation {
        let mut c = Consultation::new(
            PatientInfo {
                nom: "Mbaye".into(),
                ..Default::default()
            },
            Urgency::Critique,
        );
        c.status = ConsultationStatus::AnalyseTerminee;
        c
    }

    fn validate_event() -> LifecycleEvent {
        LifecycleEvent::Validate {
            decision: ClinicalDecision {
                diagnostic: "Crise d'asthme".into(),
                traitement: "Salbutamol".into(),
                recommandations: None,
                examen_complementaire: None,
            },
            signature: SignatureRef::new("sig/9"),
        }
    }

    #[tokio::test]
    async fn accepted_transition_is_saved_once() {
        let store = MemoryStore::default();
        let c = analysed();

        let saved = submit(&LifecycleEngine::default(), &store, &c, validate_event())
            .await
            .unwrap();

        assert!(saved.is_validated());
        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
        let records = store.records.lock().await;
        assert_eq!(records.get(&c.id), Some(&saved));
    }

    #[tokio::test]
    async fn refused_transition_is_not_saved() {
        let store = MemoryStore::default();
        let err = submit(
            &LifecycleEngine::default(),
            &store,
            &analysed(),
            LifecycleEvent::Reject { reason: "non".into() },
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            SubmitError::Lifecycle(LifecycleError::Validation(
                ValidationError::RejectionReasonTooShort { .. }
            ))
        ));
        assert_eq!(store.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn store_failure_propagates_without_retry() {
        let store = MemoryStore {
            fail: true,
            ..Default::default()
        };
        let err = submit(&LifecycleEngine::default(), &store, &analysed(), validate_event())
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Store(Unavailable)));
        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
    }
}
