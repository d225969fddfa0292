//! OAuth2 authorization-code flow for Google Calendar.
//!
//! Builds the consent URL handed to the user's browser and exchanges the
//! redirect code for a token set. The returned tokens are held by the caller
//! and passed back with each booking request; nothing is persisted here.
//! Mid-request token refresh lives in [`super::google`].

use serde::{Deserialize, Serialize};
use slotbook_domain::{CalendarConfig, Result, SlotbookError};
use url::Url;

use super::google::GOOGLE_TOKEN_ENDPOINT;
use crate::http::HttpClient;

const GOOGLE_AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Configuration for the Google OAuth flow.
#[derive(Debug, Clone)]
pub struct GoogleOAuthSettings {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub scopes: Vec<String>,
    pub extra_authorize_params: Vec<(String, String)>,
}

impl GoogleOAuthSettings {
    /// Create Google OAuth settings with sensible defaults.
    ///
    /// Requests offline access with forced consent so that a refresh token
    /// is issued on every authorization.
    pub fn google(
        client_id: impl Into<String>,
        client_secret: Option<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
            redirect_uri: redirect_uri.into(),
            authorization_endpoint: GOOGLE_AUTHORIZATION_ENDPOINT.to_string(),
            token_endpoint: GOOGLE_TOKEN_ENDPOINT.to_string(),
            scopes: vec![
                "https://www.googleapis.com/auth/calendar".to_string(),
                "https://www.googleapis.com/auth/calendar.events".to_string(),
                "https://www.googleapis.com/auth/userinfo.email".to_string(),
                "openid".to_string(),
            ],
            extra_authorize_params: vec![
                ("access_type".to_string(), "offline".to_string()),
                ("prompt".to_string(), "consent".to_string()),
            ],
        }
    }

    /// Build settings from application configuration.
    pub fn from_config(config: &CalendarConfig) -> Self {
        let mut settings = Self::google(
            config.client_id.clone(),
            config.client_secret.clone(),
            config.redirect_uri.clone(),
        );
        if let Some(endpoint) = &config.token_endpoint {
            settings.token_endpoint = endpoint.clone();
        }
        settings
    }
}

/// Token set returned by the token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// OAuth flow for obtaining Google Calendar tokens.
pub struct GoogleOAuthFlow {
    settings: GoogleOAuthSettings,
    http: HttpClient,
}

impl GoogleOAuthFlow {
    /// Create a new flow from settings.
    pub fn new(settings: GoogleOAuthSettings) -> Result<Self> {
        Ok(Self { settings, http: HttpClient::new()? })
    }

    /// Consent URL to open in the user's browser.
    pub fn authorization_url(&self) -> Result<String> {
        let mut url = Url::parse(&self.settings.authorization_endpoint)
            .map_err(|err| SlotbookError::Config(format!("invalid OAuth endpoint URL: {err}")))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("client_id", &self.settings.client_id)
                .append_pair("redirect_uri", &self.settings.redirect_uri)
                .append_pair("response_type", "code")
                .append_pair("scope", &self.settings.scopes.join(" "));

            for (key, value) in &self.settings.extra_authorize_params {
                pairs.append_pair(key, value);
            }
        }

        Ok(url.to_string())
    }

    /// Exchange an authorization code for a token set.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenSet> {
        let mut params = vec![
            ("grant_type".to_string(), "authorization_code".to_string()),
            ("client_id".to_string(), self.settings.client_id.clone()),
            ("code".to_string(), code.to_string()),
            ("redirect_uri".to_string(), self.settings.redirect_uri.clone()),
        ];

        if let Some(secret) = &self.settings.client_secret {
            params.push(("client_secret".to_string(), secret.clone()));
        }

        let request =
            self.http.request(reqwest::Method::POST, &self.settings.token_endpoint).form(&params);
        let response = self.http.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SlotbookError::Auth(format!("Token exchange failed ({status}): {text}")));
        }

        response
            .json::<TokenSet>()
            .await
            .map_err(|err| SlotbookError::Auth(format!("invalid token response: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_settings() -> GoogleOAuthSettings {
        GoogleOAuthSettings::google(
            "client-id",
            Some("client-secret".to_string()),
            "http://localhost:8080/api/auth/google/callback",
        )
    }

    #[test]
    fn authorization_url_contains_expected_params() {
        let flow = GoogleOAuthFlow::new(test_settings()).expect("flow created");
        let url = flow.authorization_url().expect("url built");

        let parsed = Url::parse(&url).expect("valid url");
        let params: HashMap<String, String> = parsed.query_pairs().into_owned().collect();

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert_eq!(params["client_id"], "client-id");
        assert_eq!(params["redirect_uri"], "http://localhost:8080/api/auth/google/callback");
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["access_type"], "offline");
        assert_eq!(params["prompt"], "consent");
        assert!(params["scope"].contains("https://www.googleapis.com/auth/calendar"));
        assert!(params["scope"].contains("openid"));
    }

    #[tokio::test]
    async fn exchange_code_posts_form_and_parses_tokens() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "access-token",
                "refresh_token": "refresh-token",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut settings = test_settings();
        settings.token_endpoint = format!("{}/token", server.uri());
        let flow = GoogleOAuthFlow::new(settings).expect("flow created");

        let tokens = flow.exchange_code("auth-code").await.expect("tokens exchanged");
        assert_eq!(tokens.access_token, "access-token");
        assert_eq!(tokens.refresh_token, Some("refresh-token".to_string()));
        assert_eq!(tokens.expires_in, 3599);

        let requests = server.received_requests().await.unwrap();
        let form = String::from_utf8_lossy(&requests[0].body).to_string();
        assert!(form.contains("grant_type=authorization_code"));
        assert!(form.contains("code=auth-code"));
        assert!(form.contains("client_secret=client-secret"));
    }

    #[tokio::test]
    async fn rejected_code_surfaces_auth_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({ "error": "invalid_grant" })),
            )
            .mount(&server)
            .await;

        let mut settings = test_settings();
        settings.token_endpoint = format!("{}/token", server.uri());
        let flow = GoogleOAuthFlow::new(settings).expect("flow created");

        let err = flow.exchange_code("bad-code").await.expect_err("must fail");
        match err {
            SlotbookError::Auth(msg) => {
                assert!(msg.contains("Token exchange failed"), "unexpected message: {msg}")
            }
            other => panic!("expected Auth, got {other:?}"),
        }
    }
}
