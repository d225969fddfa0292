//! Google Calendar integration
//!
//! Provides the OAuth2 authorization flow and event synchronisation for
//! Google Calendar.

pub mod google;
pub mod oauth;

pub use google::{GoogleCalendarSync, GOOGLE_CALENDAR_API_BASE, GOOGLE_TOKEN_ENDPOINT};
pub use oauth::{GoogleOAuthFlow, GoogleOAuthSettings, TokenSet};
