use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotbook_core::CalendarSync;
use slotbook_domain::{EventDraft, Result as DomainResult, SlotbookError};

/// In-memory mock for `CalendarSync`.
///
/// Records every created event and hands out sequential event ids.
/// Outage windows make event creation fail for slots starting inside
/// them, which is how sync failures are simulated deterministically.
#[derive(Default, Clone)]
pub struct MockCalendarSync {
    events: Arc<Mutex<Vec<EventDraft>>>,
    outages: Arc<Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>>,
}

impl MockCalendarSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail event creation for slots starting inside `[from, until)`.
    pub fn with_outage(self, from: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        self.outages.lock().unwrap().push((from, until));
        self
    }

    /// Snapshot of every event created so far.
    pub fn events(&self) -> Vec<EventDraft> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalendarSync for MockCalendarSync {
    async fn create_event(&self, draft: &EventDraft) -> DomainResult<String> {
        let unavailable = self
            .outages
            .lock()
            .unwrap()
            .iter()
            .any(|(from, until)| draft.start >= *from && draft.start < *until);
        if unavailable {
            return Err(SlotbookError::Provider(
                "calendar provider unavailable".to_string(),
            ));
        }

        let mut events = self.events.lock().unwrap();
        events.push(draft.clone());
        Ok(format!("evt-{}", events.len()))
    }
}
