//! Scheduling orchestrator
//!
//! Drives one booking request end to end: enumerate slots, persist each
//! one, mirror it to the calendar, then write the external event id back
//! onto the stored record.

use std::num::NonZeroUsize;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use slotbook_domain::{
    BookingRequest, BookingResult, EventDraft, Result, ScheduledSlot, SlotDraft, SlotOutcome,
    SlotTimes,
};
use tracing::{error, info, instrument, warn};

use crate::scheduling::ports::{CalendarSync, SlotRepository};
use crate::scheduling::slots::SlotWalk;

/// Orchestrates slot persistence and calendar mirroring.
///
/// A slot failure never aborts the request. Each slot lands in one of
/// three outcomes and the caller gets the full per-slot breakdown.
pub struct SchedulingService {
    repository: Arc<dyn SlotRepository>,
    calendar: Arc<dyn CalendarSync>,
}

impl SchedulingService {
    pub fn new(repository: Arc<dyn SlotRepository>, calendar: Arc<dyn CalendarSync>) -> Self {
        Self {
            repository,
            calendar,
        }
    }

    /// Process a booking request, handling slots strictly in order.
    ///
    /// Returns an error only when the request itself is invalid. Slots
    /// are not rolled back on later failures, so retrying a partially
    /// processed request reports the already stored slots as duplicates.
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn schedule(&self, request: &BookingRequest) -> Result<BookingResult> {
        request.validate()?;

        let mut slots = Vec::new();
        for times in SlotWalk::for_request(request) {
            let outcome = self.process_slot(request, times).await;
            slots.push(ScheduledSlot {
                slot: times,
                outcome,
            });
        }

        let result = BookingResult::new(slots);
        let summary = result.summary();
        info!(
            total = result.len(),
            created = summary.created,
            stored_only = summary.stored_only,
            failed = summary.failed,
            "booking request processed"
        );
        Ok(result)
    }

    /// Process a booking request with up to `max_in_flight` slots handled
    /// concurrently. The returned slots are re-sorted by start instant, so
    /// the outcome order matches [`SchedulingService::schedule`].
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn schedule_with_limit(
        &self,
        request: &BookingRequest,
        max_in_flight: NonZeroUsize,
    ) -> Result<BookingResult> {
        request.validate()?;

        let mut slots: Vec<ScheduledSlot> = stream::iter(SlotWalk::for_request(request))
            .map(|times| async move {
                let outcome = self.process_slot(request, times).await;
                ScheduledSlot {
                    slot: times,
                    outcome,
                }
            })
            .buffer_unordered(max_in_flight.get())
            .collect()
            .await;
        slots.sort_by_key(|entry| entry.slot.start);

        let result = BookingResult::new(slots);
        let summary = result.summary();
        info!(
            total = result.len(),
            created = summary.created,
            stored_only = summary.stored_only,
            failed = summary.failed,
            max_in_flight = max_in_flight.get(),
            "booking request processed"
        );
        Ok(result)
    }

    /// Persist one slot, mirror it to the calendar and reconcile the ids.
    async fn process_slot(&self, request: &BookingRequest, times: SlotTimes) -> SlotOutcome {
        let draft = SlotDraft {
            title: request.title.clone(),
            description: request.description.clone(),
            start: times.start,
            end: times.end,
        };
        let record_id = match self.repository.create_slot(&draft).await {
            Ok(id) => id,
            Err(err) => {
                error!(slot_start = %times.start, error = %err, "failed to store slot");
                return SlotOutcome::Failed {
                    reason: err.to_string(),
                };
            }
        };

        let event = EventDraft {
            title: request.title.clone(),
            description: request.description.clone(),
            start: times.start,
            end: times.end,
        };
        let external_event_id = match self.calendar.create_event(&event).await {
            Ok(id) => id,
            Err(err) => {
                // Keep the local record, the slot is bookable without a
                // calendar mirror.
                error!(slot_start = %times.start, error = %err, "failed to create calendar event");
                return SlotOutcome::StoredOnly {
                    reason: err.to_string(),
                };
            }
        };

        match self
            .repository
            .attach_external_id(&record_id, &external_event_id)
            .await
        {
            Ok(()) => SlotOutcome::Created {
                external_event_id,
                reconciled: true,
            },
            Err(err) => {
                warn!(
                    slot_start = %times.start,
                    record_id = %record_id,
                    error = %err,
                    "failed to record external event id"
                );
                SlotOutcome::Created {
                    external_event_id,
                    reconciled: false,
                }
            }
        }
    }
}
