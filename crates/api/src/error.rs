// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use pap_monitor_domain::DomainError;
use pap_monitor_persistence::PersistenceError;
use thiserror::Error;

use crate::request_response::{LOGIN_FAILED_MESSAGE, UPDATE_FAILED_PREFIX};

/// Authentication and authorization errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The credential lookup could not be completed.
    #[error("Login lookup failed: {message}")]
    StoreFailure {
        /// The underlying store error.
        message: String,
    },
}

/// API-level errors.
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Credentials did not match any user.
    #[error("{}", LOGIN_FAILED_MESSAGE)]
    AuthenticationFailed {
        /// Why the credentials were rejected. Logged, never shown.
        reason: String,
    },
    /// The operation needs an authenticated session.
    #[error("Authentication required")]
    AuthenticationRequired,
    /// The session's role may not perform this action.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The update write path failed.
    #[error("{prefix}{cause}", prefix = UPDATE_FAILED_PREFIX)]
    StoreWriteFailure {
        /// The underlying store error.
        cause: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
            AuthError::StoreFailure { message } => Self::Internal { message },
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidAge { .. } => ApiError::InvalidInput {
            field: String::from("age"),
            message: err.to_string(),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::InvalidStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message: err.to_string(),
        },
        DomainError::InvalidTestId(_) => ApiError::InvalidInput {
            field: String::from("test_id"),
            message: err.to_string(),
        },
        DomainError::DateFormatError(_) | DomainError::InconsistentRole { .. } => {
            ApiError::Internal {
                message: err.to_string(),
            }
        }
    }
}
