//! Mock repository implementations for testing
//!
//! Provides an in-memory mock for the slot repository port, enabling
//! deterministic scheduling tests without database dependencies.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotbook_core::SlotRepository;
use slotbook_domain::{Result as DomainResult, SlotDraft, SlotRecordId, SlotbookError};

/// One row held by [`MockSlotRepository`].
#[derive(Debug, Clone)]
pub struct StoredSlot {
    pub id: SlotRecordId,
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub external_event_id: Option<String>,
}

/// In-memory mock for `SlotRepository`.
///
/// Enforces the same unique start constraint as the real repository and
/// supports targeted failure injection for storage and reconciliation.
#[derive(Default, Clone)]
pub struct MockSlotRepository {
    slots: Arc<Mutex<Vec<StoredSlot>>>,
    failing_creates: Arc<Mutex<HashSet<DateTime<Utc>>>>,
    fail_attach: Arc<AtomicBool>,
}

impl MockSlotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_slot` fail for slots starting at the given instant.
    pub fn with_create_failure(self, start: DateTime<Utc>) -> Self {
        self.failing_creates.lock().unwrap().insert(start);
        self
    }

    /// Make every `attach_external_id` call fail.
    pub fn with_attach_failures(self) -> Self {
        self.fail_attach.store(true, Ordering::SeqCst);
        self
    }

    /// Snapshot of every stored slot.
    pub fn stored(&self) -> Vec<StoredSlot> {
        self.slots.lock().unwrap().clone()
    }
}

#[async_trait]
impl SlotRepository for MockSlotRepository {
    async fn create_slot(&self, draft: &SlotDraft) -> DomainResult<SlotRecordId> {
        if self.failing_creates.lock().unwrap().contains(&draft.start) {
            return Err(SlotbookError::Database(
                "injected storage failure".to_string(),
            ));
        }

        let mut slots = self.slots.lock().unwrap();
        if slots.iter().any(|slot| slot.start == draft.start) {
            return Err(SlotbookError::DuplicateSlot(format!(
                "slot starting at {} already exists",
                draft.start.to_rfc3339()
            )));
        }

        let id = SlotRecordId::generate();
        slots.push(StoredSlot {
            id: id.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            start: draft.start,
            end: draft.end,
            external_event_id: None,
        });
        Ok(id)
    }

    async fn attach_external_id(
        &self,
        id: &SlotRecordId,
        external_event_id: &str,
    ) -> DomainResult<()> {
        if self.fail_attach.load(Ordering::SeqCst) {
            return Err(SlotbookError::Reconciliation(
                "injected reconciliation failure".to_string(),
            ));
        }

        let mut slots = self.slots.lock().unwrap();
        match slots.iter_mut().find(|slot| &slot.id == id) {
            Some(slot) => {
                slot.external_event_id = Some(external_event_id.to_string());
                Ok(())
            }
            None => Err(SlotbookError::NotFound(format!(
                "slot record {id} not found"
            ))),
        }
    }
}
