// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session state for one browser session.
//!
//! A session starts `Anonymous`, becomes `Authenticated` on a successful
//! login and returns to `Anonymous` on logout. There is no expiry.

use pap_monitor_domain::Role;
use pap_monitor_persistence::Persistence;
use tracing::info;

use crate::auth::AuthenticationService;
use crate::error::ApiError;
use crate::request_response::{LoginRequest, LoginResponse};

/// The identity held by an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// The user's row ID.
    pub user_id: i64,
    /// The login name.
    pub username: String,
    /// The user's role and, for clinicians, their facility.
    pub role: Role,
}

/// Session state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No one is logged in.
    #[default]
    Anonymous,
    /// A user is logged in.
    Authenticated(SessionContext),
}

impl SessionState {
    /// Attempts to log in with the given credentials.
    ///
    /// On success the state becomes `Authenticated`. On failure it is left
    /// `Anonymous`, whatever it was before.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationFailed` if the credentials are rejected.
    pub fn login(
        &mut self,
        persistence: &mut Persistence,
        request: &LoginRequest,
    ) -> Result<LoginResponse, ApiError> {
        *self = Self::Anonymous;

        let context: SessionContext =
            AuthenticationService::authenticate(persistence, &request.username, &request.password)?;

        let response = LoginResponse {
            session_token: AuthenticationService::generate_session_token(),
            username: context.username.clone(),
            role: context.role.as_str().to_string(),
            facility_id: context.role.facility_id(),
        };

        *self = Self::Authenticated(context);
        Ok(response)
    }

    /// Clears the session.
    pub fn logout(&mut self) {
        if let Self::Authenticated(context) = self {
            info!(username = %context.username, "User logged out");
        }
        *self = Self::Anonymous;
    }

    /// Returns the authenticated context, if any.
    #[must_use]
    pub const fn context(&self) -> Option<&SessionContext> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(context) => Some(context),
        }
    }

    /// Returns the authenticated context.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationRequired` if the session is anonymous.
    pub const fn require_context(&self) -> Result<&SessionContext, ApiError> {
        match self {
            Self::Anonymous => Err(ApiError::AuthenticationRequired),
            Self::Authenticated(context) => Ok(context),
        }
    }
}
