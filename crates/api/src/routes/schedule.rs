//! Slot scheduling endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::Json;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use slotbook_core::SchedulingService;
use slotbook_domain::{
    BookingRequest, BookingSummary, CalendarCredentials, ScheduledSlot, SlotbookError,
};
use slotbook_infra::calendar::GoogleCalendarSync;

use crate::context::AppContext;
use crate::error::ApiResult;

/// Payload accepted by `POST /api/schedule`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: u32,
}

/// Response body for `POST /api/schedule`.
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub summary: BookingSummary,
    pub slots: Vec<ScheduledSlot>,
}

/// Generate slots for the requested window and sync them to Google Calendar.
///
/// The caller's calendar credentials arrive with the request: the access
/// token as a bearer header, an optional refresh token in `x-refresh-token`.
pub async fn schedule(
    State(context): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(payload): Json<ScheduleRequest>,
) -> ApiResult<Json<ScheduleResponse>> {
    let credentials = bearer_credentials(&headers)?;
    let request = parse_request(payload)?;

    let calendar = Arc::new(GoogleCalendarSync::new(credentials, &context.config.calendar)?);
    let service = SchedulingService::new(Arc::clone(&context.slots), calendar);

    let result = service.schedule(&request).await?;

    Ok(Json(ScheduleResponse { summary: result.summary(), slots: result.slots }))
}

fn bearer_credentials(headers: &HeaderMap) -> ApiResult<CalendarCredentials> {
    let access_token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| SlotbookError::Auth("missing bearer token".to_string()))?;

    let refresh_token = headers
        .get("x-refresh-token")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .filter(|token| !token.is_empty());

    Ok(CalendarCredentials { access_token, refresh_token })
}

fn parse_request(payload: ScheduleRequest) -> ApiResult<BookingRequest> {
    Ok(BookingRequest {
        title: payload.title,
        description: payload.description,
        start_date: parse_date(&payload.start_date, "startDate")?,
        end_date: parse_date(&payload.end_date, "endDate")?,
        daily_start: parse_time(&payload.start_time, "startTime")?,
        daily_end: parse_time(&payload.end_time, "endTime")?,
        slot_minutes: payload.duration,
    })
}

fn parse_date(value: &str, field: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        SlotbookError::Validation(format!("{field} must be a YYYY-MM-DD date, got '{value}'"))
            .into()
    })
}

fn parse_time(value: &str, field: &str) -> ApiResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| {
            SlotbookError::Validation(format!("{field} must be an HH:MM time, got '{value}'"))
                .into()
        })
}
