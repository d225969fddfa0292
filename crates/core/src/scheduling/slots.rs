//! Slot enumeration
//!
//! Pure slot arithmetic: cutting a daily window into fixed-length slots
//! and walking those slots across an inclusive date range.

use chrono::{Duration, NaiveDate, NaiveTime};
use slotbook_domain::{BookingRequest, DailyWindow, SlotTimes};

/// Cut one daily window into consecutive fixed-length slots.
///
/// Returns `(start, end)` wall-clock pairs. A slot is emitted only when it
/// fits entirely inside the window, so a partial tail is dropped. An empty
/// window or a zero duration yields no slots.
pub fn daily_slot_offsets(window: &DailyWindow, slot_minutes: u32) -> Vec<(NaiveTime, NaiveTime)> {
    // A zero-length slot would never advance the cursor.
    if slot_minutes == 0 || window.start >= window.end {
        return Vec::new();
    }

    let duration = Duration::minutes(i64::from(slot_minutes));
    let mut offsets = Vec::new();
    let mut cursor = window.start;
    loop {
        let (slot_end, rollover) = cursor.overflowing_add_signed(duration);
        if rollover != 0 || slot_end > window.end {
            break;
        }
        offsets.push((cursor, slot_end));
        cursor = slot_end;
    }
    offsets
}

/// Lazy walk over every slot of a booking request, ordered by date and
/// time of day.
///
/// Each day re-anchors at the window start, so slot times never drift
/// across days regardless of how the duration divides the window.
#[derive(Debug, Clone)]
pub struct SlotWalk {
    date: NaiveDate,
    end_date: NaiveDate,
    offsets: Vec<(NaiveTime, NaiveTime)>,
    index: usize,
    done: bool,
}

impl SlotWalk {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        window: &DailyWindow,
        slot_minutes: u32,
    ) -> Self {
        let offsets = daily_slot_offsets(window, slot_minutes);
        let done = offsets.is_empty() || start_date > end_date;
        Self {
            date: start_date,
            end_date,
            offsets,
            index: 0,
            done,
        }
    }

    pub fn for_request(request: &BookingRequest) -> Self {
        Self::new(
            request.start_date,
            request.end_date,
            &request.daily_window(),
            request.slot_minutes,
        )
    }
}

impl Iterator for SlotWalk {
    type Item = SlotTimes;

    fn next(&mut self) -> Option<SlotTimes> {
        if self.done {
            return None;
        }
        if self.index >= self.offsets.len() {
            match self.date.succ_opt() {
                Some(next) if next <= self.end_date => {
                    self.date = next;
                    self.index = 0;
                }
                _ => {
                    self.done = true;
                    return None;
                }
            }
        }
        let (start, end) = self.offsets[self.index];
        self.index += 1;
        Some(SlotTimes {
            start: self.date.and_time(start).and_utc(),
            end: self.date.and_time(end).and_utc(),
        })
    }
}
