// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Browser sessions and the extractors that resolve them.
//!
//! Each browser session is identified by the bearer token handed out at
//! login and owns one `SessionState`. Sessions live in process memory and
//! never expire; logout removes them.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use pap_monitor_api::{SessionContext, SessionState};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse};

/// In-process map from session token to session state.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, SessionState>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the state of a session, replacing any previous state.
    pub fn insert(&mut self, token: String, state: SessionState) {
        self.sessions.insert(token, state);
    }

    /// Returns the state of a session; unknown tokens are anonymous.
    #[must_use]
    pub fn get(&self, token: &str) -> SessionState {
        self.sessions.get(token).cloned().unwrap_or_default()
    }

    /// Drops a session. Returns its last state if it existed.
    pub fn remove(&mut self, token: &str) -> Option<SessionState> {
        self.sessions.remove(token)
    }

    /// Number of open sessions.
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}

/// Reads the bearer token, if the request carries one.
fn bearer_token(parts: &Parts) -> Result<Option<String>, SessionError> {
    let Some(header) = parts.headers.get("Authorization") else {
        return Ok(None);
    };

    let value = header.to_str().map_err(|_| {
        warn!("Invalid Authorization header encoding");
        SessionError::InvalidAuthorizationHeader
    })?;

    let token = value.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Authorization header does not start with 'Bearer '");
        SessionError::InvalidAuthorizationHeader
    })?;

    Ok(Some(token.to_string()))
}

/// Extractor for the session of the calling browser, authenticated or not.
///
/// A missing or unknown token yields `SessionState::Anonymous`.
pub struct BrowserSession(pub SessionState);

impl FromRequestParts<AppState> for BrowserSession {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts)? else {
            return Ok(Self(SessionState::Anonymous));
        };

        let session: SessionState = state.sessions.lock().await.get(&token);
        Ok(Self(session))
    }
}

/// Extractor for authenticated sessions.
///
/// Carries the session token and the identity bound to it.
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if:
/// - Authorization header is missing
/// - Authorization header format is invalid
/// - The token does not belong to an authenticated session
pub struct AuthenticatedSession(pub String, pub SessionContext);

impl FromRequestParts<AppState> for AuthenticatedSession {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: String = bearer_token(parts)?.ok_or_else(|| {
            debug!("Missing Authorization header");
            SessionError::MissingAuthorizationHeader
        })?;

        let session: SessionState = state.sessions.lock().await.get(&token);
        let SessionState::Authenticated(context) = session else {
            warn!("Request with unknown session token");
            return Err(SessionError::UnknownSession);
        };

        debug!(username = %context.username, role = %context.role, "Session resolved");

        Ok(Self(token, context))
    }
}

/// Session extraction errors.
///
/// These errors are returned when session resolution fails and are
/// automatically converted to HTTP responses.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// The token is not bound to an authenticated session.
    UnknownSession,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: &str = match self {
            Self::MissingAuthorizationHeader => "Missing Authorization header",
            Self::InvalidAuthorizationHeader => {
                "Invalid Authorization header format. Expected: 'Bearer <token>'"
            }
            Self::UnknownSession => "Session is not authenticated",
        };

        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: message.to_string(),
        });
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
