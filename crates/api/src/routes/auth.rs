//! Google OAuth endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use slotbook_domain::SlotbookError;
use slotbook_infra::calendar::{GoogleOAuthFlow, GoogleOAuthSettings, TokenSet};

use crate::context::AppContext;
use crate::error::ApiResult;

/// Return the Google consent URL for the configured client.
pub async fn authorization_url(
    State(context): State<Arc<AppContext>>,
) -> ApiResult<Json<serde_json::Value>> {
    let flow = build_flow(&context)?;
    let url = flow.authorization_url()?;
    Ok(Json(json!({ "url": url })))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Exchange the redirect code for a token set.
///
/// The tokens are returned to the caller, who supplies the access token as a
/// bearer header on subsequent scheduling requests. Nothing is stored server
/// side.
pub async fn oauth_callback(
    State(context): State<Arc<AppContext>>,
    Query(params): Query<CallbackParams>,
) -> ApiResult<Json<TokenSet>> {
    if let Some(error) = params.error {
        return Err(SlotbookError::Auth(format!("authorization denied: {error}")).into());
    }

    let code = params
        .code
        .ok_or_else(|| SlotbookError::Validation("missing authorization code".to_string()))?;

    let flow = build_flow(&context)?;
    let tokens = flow.exchange_code(&code).await?;

    Ok(Json(tokens))
}

fn build_flow(context: &AppContext) -> ApiResult<GoogleOAuthFlow> {
    if context.config.calendar.client_id.is_empty() {
        return Err(SlotbookError::Config("Google client id is not configured".to_string()).into());
    }

    Ok(GoogleOAuthFlow::new(GoogleOAuthSettings::from_config(&context.config.calendar))?)
}
