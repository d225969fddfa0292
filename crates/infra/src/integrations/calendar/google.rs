//! Google Calendar event synchronisation.
//!
//! Creates events through the Google Calendar v3 API with a Meet conference
//! attached. Event insertion is a single attempt, a blind retry could
//! duplicate calendar events. A rejected access token is refreshed once and
//! the insert retried with the fresh token.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slotbook_core::CalendarSync;
use slotbook_domain::{CalendarConfig, CalendarCredentials, EventDraft, Result, SlotbookError};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::errors::InfraError;

/// Production Google Calendar API base URL.
pub const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
/// Production Google OAuth2 token endpoint.
pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Google Calendar implementation of `CalendarSync`.
///
/// Holds the credentials of a single user for the duration of one booking
/// request. The access token is kept behind a lock so a mid-request refresh
/// is visible to the remaining slots.
pub struct GoogleCalendarSync {
    http: reqwest::Client,
    api_base: String,
    token_endpoint: String,
    client_id: String,
    client_secret: Option<String>,
    access_token: RwLock<String>,
    refresh_token: Option<String>,
}

impl GoogleCalendarSync {
    /// Create a sync client for one set of user credentials.
    pub fn new(credentials: CalendarCredentials, config: &CalendarConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .no_proxy()
            .build()
            .map_err(|e| SlotbookError::Internal(format!("failed to build HTTP client: {e}")))?;

        let api_base =
            config.api_base.clone().unwrap_or_else(|| GOOGLE_CALENDAR_API_BASE.to_string());
        let token_endpoint =
            config.token_endpoint.clone().unwrap_or_else(|| GOOGLE_TOKEN_ENDPOINT.to_string());

        Ok(Self {
            http,
            api_base,
            token_endpoint,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            access_token: RwLock::new(credentials.access_token),
            refresh_token: credentials.refresh_token,
        })
    }

    /// Insert one event, single attempt.
    async fn insert_event(&self, draft: &EventDraft, access_token: &str) -> Result<String> {
        let url = format!("{}/calendars/primary/events", self.api_base);
        let body = GoogleEventRequest::from_draft(draft);

        let response = self
            .http
            .post(&url)
            .query(&[("conferenceDataVersion", "1")])
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(to_domain_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SlotbookError::Auth("access token rejected by Google".to_string()));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SlotbookError::Provider(format!("Google API error ({status}): {text}")));
        }

        let event: GoogleEventResponse = response
            .json()
            .await
            .map_err(|e| SlotbookError::Provider(format!("invalid Google API response: {e}")))?;

        Ok(event.id)
    }

    /// Obtain a fresh access token via the refresh token grant.
    async fn refresh_access_token(&self) -> Result<String> {
        let refresh_token = self
            .refresh_token
            .clone()
            .ok_or_else(|| SlotbookError::Auth("no refresh token issued".to_string()))?;

        let mut params = vec![
            ("grant_type".to_string(), "refresh_token".to_string()),
            ("client_id".to_string(), self.client_id.clone()),
            ("refresh_token".to_string(), refresh_token),
        ];

        if let Some(secret) = &self.client_secret {
            params.push(("client_secret".to_string(), secret.clone()));
        }

        let response = self
            .http
            .post(&self.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(to_domain_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SlotbookError::Auth(format!("Token refresh failed ({status}): {text}")));
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .map_err(|e| SlotbookError::Auth(format!("invalid token response: {e}")))?;

        debug!(expires_in = refreshed.expires_in, "access token refreshed");

        let mut guard = self.access_token.write().await;
        *guard = refreshed.access_token.clone();

        Ok(refreshed.access_token)
    }
}

#[async_trait]
impl CalendarSync for GoogleCalendarSync {
    #[instrument(skip(self, draft), fields(event_start = %draft.start))]
    async fn create_event(&self, draft: &EventDraft) -> Result<String> {
        let token = self.access_token.read().await.clone();

        match self.insert_event(draft, &token).await {
            Err(SlotbookError::Auth(_)) if self.refresh_token.is_some() => {
                warn!("access token rejected, refreshing and retrying once");
                let fresh = self.refresh_access_token().await?;
                self.insert_event(draft, &fresh).await
            }
            other => other,
        }
    }
}

fn to_domain_error(err: reqwest::Error) -> SlotbookError {
    InfraError::from(err).into()
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
struct GoogleEventRequest {
    summary: String,
    description: String,
    start: GoogleEventTime,
    end: GoogleEventTime,
    #[serde(rename = "conferenceData")]
    conference_data: ConferenceData,
}

impl GoogleEventRequest {
    fn from_draft(draft: &EventDraft) -> Self {
        Self {
            summary: draft.title.clone(),
            description: draft.description.clone(),
            start: GoogleEventTime::from_instant(draft.start),
            end: GoogleEventTime::from_instant(draft.end),
            conference_data: ConferenceData {
                create_request: CreateConferenceRequest {
                    request_id: Uuid::new_v4().to_string(),
                    conference_solution_key: ConferenceSolutionKey {
                        kind: "hangoutsMeet".to_string(),
                    },
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct GoogleEventTime {
    #[serde(rename = "dateTime")]
    date_time: String,
    #[serde(rename = "timeZone")]
    time_zone: String,
}

impl GoogleEventTime {
    fn from_instant(instant: DateTime<Utc>) -> Self {
        Self { date_time: instant.to_rfc3339(), time_zone: "UTC".to_string() }
    }
}

#[derive(Debug, Serialize)]
struct ConferenceData {
    #[serde(rename = "createRequest")]
    create_request: CreateConferenceRequest,
}

#[derive(Debug, Serialize)]
struct CreateConferenceRequest {
    #[serde(rename = "requestId")]
    request_id: String,
    #[serde(rename = "conferenceSolutionKey")]
    conference_solution_key: ConferenceSolutionKey,
}

#[derive(Debug, Serialize)]
struct ConferenceSolutionKey {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct GoogleEventResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    expires_in: i64,
}

// =============================================================================
// Tests
// =============================================================================
