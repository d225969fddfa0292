//! Booking domain types
//!
//! Data model for recurring slot bookings: the incoming request, the
//! generated slot instants, and the per-slot outcome of persistence and
//! calendar mirroring.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, SlotbookError};

// ============================================================================
// Booking Request
// ============================================================================

/// Recurring daily time window, half-open on the clock (`start` inclusive,
/// `end` exclusive as a slot end bound).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// A request to book identical appointment slots across a date range.
///
/// Dates are inclusive on both ends. Times are naive wall-clock values
/// interpreted as UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_start: NaiveTime,
    pub daily_end: NaiveTime,
    /// Slot length in minutes.
    pub slot_minutes: u32,
}

impl BookingRequest {
    /// Check the request invariants, returning the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(SlotbookError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(SlotbookError::Validation(
                "description must not be empty".to_string(),
            ));
        }
        if self.end_date < self.start_date {
            return Err(SlotbookError::Validation(format!(
                "end date {} precedes start date {}",
                self.end_date, self.start_date
            )));
        }
        if self.daily_start >= self.daily_end {
            return Err(SlotbookError::Validation(
                "daily window must start before it ends".to_string(),
            ));
        }
        if self.slot_minutes == 0 {
            return Err(SlotbookError::Validation(
                "slot duration must be at least one minute".to_string(),
            ));
        }
        Ok(())
    }

    /// The daily window this request repeats over.
    pub fn daily_window(&self) -> DailyWindow {
        DailyWindow {
            start: self.daily_start,
            end: self.daily_end,
        }
    }
}

// ============================================================================
// Slot Identity & Drafts
// ============================================================================

/// Opaque identifier of a stored slot record.
///
/// Generated by the repository at insert time, never derived from the slot
/// timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotRecordId(String);

impl SlotRecordId {
    /// Generate a new time-ordered identifier.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SlotRecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Start and end instants of a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTimes {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Payload for creating the local record of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDraft {
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Payload for creating the calendar event that mirrors one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

// ============================================================================
// Calendar Credentials
// ============================================================================

/// Per-request credentials for the calendar provider.
///
/// Carried explicitly through each scheduling call so concurrent requests
/// for different accounts never share token state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarCredentials {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

// ============================================================================
// Outcomes
// ============================================================================

/// What happened to one slot during scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SlotOutcome {
    /// Stored locally and mirrored to the calendar. `reconciled` is false
    /// when the external event id could not be written back to the record.
    Created {
        external_event_id: String,
        reconciled: bool,
    },
    /// Stored locally but the calendar event could not be created.
    StoredOnly { reason: String },
    /// Not stored at all.
    Failed { reason: String },
}

impl SlotOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }

    pub fn is_stored_only(&self) -> bool {
        matches!(self, Self::StoredOnly { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// One generated slot paired with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSlot {
    pub slot: SlotTimes,
    pub outcome: SlotOutcome,
}

/// Aggregate counts over the slots of one booking request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub created: usize,
    pub stored_only: usize,
    pub failed: usize,
    /// Created slots whose external event id was not written back.
    pub reconciliation_warnings: usize,
}

/// Result of one booking request, ordered by slot start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResult {
    pub slots: Vec<ScheduledSlot>,
}

impl BookingResult {
    pub fn new(slots: Vec<ScheduledSlot>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Count outcomes across all slots.
    pub fn summary(&self) -> BookingSummary {
        let mut summary = BookingSummary::default();
        for entry in &self.slots {
            match &entry.outcome {
                SlotOutcome::Created { reconciled, .. } => {
                    summary.created += 1;
                    if !reconciled {
                        summary.reconciliation_warnings += 1;
                    }
                }
                SlotOutcome::StoredOnly { .. } => summary.stored_only += 1,
                SlotOutcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

// ============================================================================
// Tests
// ============================================================================
