//! Authentication HTTP handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

use super::{
    oauth::ExchangeError,
    session::SessionError,
    types::{AuthenticateParams, AuthenticateResponse, LoginCallbackParams, LoginUrlResponse},
};

/// Start Google OAuth login flow.
///
/// Returns a URL that the frontend should redirect the user to.
pub async fn login(State(state): State<AppState>) -> Json<LoginUrlResponse> {
    Json(LoginUrlResponse {
        url: state.provider.authorization_url(),
    })
}

/// Handle the provider redirect after consent.
///
/// Exchanges the authorization code for the user's email, checks it against
/// the allowlist and redirects to the frontend with a fresh session token.
pub async fn login_google(
    State(state): State<AppState>,
    params: Result<Query<LoginCallbackParams>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(params) = params.map_err(|rejection| {
        tracing::warn!("Unreadable login callback query: {}", rejection);
        ExchangeError::MissingCode
    })?;
    let code = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or(ExchangeError::MissingCode)?;

    let identity = state.provider.exchange_code(&code).await?;

    tracing::info!(
        "OAuth login attempt from: {} ({})",
        identity.email,
        identity.name.as_deref().unwrap_or("no name")
    );

    let allowlist = &state.config.allowed_emails;
    if !allowlist.contains(&identity.email) {
        tracing::warn!("Unauthorized login attempt from: {}", identity.email);
        return Err(ApiError::AllowlistRejection(allowlist.rejection_message()));
    }

    let token = state
        .sessions
        .issue(&identity.email)
        .map_err(|e| ApiError::Configuration(format!("Failed to sign session token: {}", e)))?;

    tracing::info!("Successful login for: {}", identity.email);

    let location = format!("{}/token/{}", state.config.frontend_url, token);
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Check a session token previously handed to the frontend.
pub async fn authenticate(
    State(state): State<AppState>,
    params: Result<Query<AuthenticateParams>, QueryRejection>,
) -> ApiResult<Json<AuthenticateResponse>> {
    let Query(params) = params.map_err(|rejection| {
        tracing::warn!("Unreadable authenticate query: {}", rejection);
        SessionError::Malformed
    })?;
    let token = params.token.ok_or(SessionError::Malformed)?;
    let claims = state.sessions.verify(&token)?;

    tracing::debug!("Session token accepted for: {}", claims.email);

    Ok(Json(AuthenticateResponse::accepted()))
}
