//! Port interfaces for slot scheduling
//!
//! These traits define the boundaries between the scheduling core and
//! infrastructure implementations (database, calendar provider).

use async_trait::async_trait;
use slotbook_domain::{EventDraft, Result, SlotDraft, SlotRecordId};

/// Trait for persisting appointment slots
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Store the local record of a slot, returning its generated id.
    ///
    /// Fails with `DuplicateSlot` when a record with the same start
    /// instant already exists.
    async fn create_slot(&self, draft: &SlotDraft) -> Result<SlotRecordId>;

    /// Record the external calendar event id on an existing slot.
    async fn attach_external_id(&self, id: &SlotRecordId, external_event_id: &str) -> Result<()>;
}

/// Trait for mirroring slots into an external calendar
#[async_trait]
pub trait CalendarSync: Send + Sync {
    /// Create a calendar event for the slot, returning the provider's
    /// event id.
    async fn create_event(&self, draft: &EventDraft) -> Result<String>;
}
