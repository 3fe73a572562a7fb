// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization services.

use pap_monitor_domain::Role;
use pap_monitor_persistence::{Persistence, UserData};
use tracing::{error, info, warn};

use crate::error::AuthError;
use crate::session::SessionContext;

/// Authentication service for credential checks and session tokens.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Authenticates a user with username and password.
    ///
    /// Both values are compared exactly as stored.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `username` - The login name
    /// * `password` - The password
    ///
    /// # Returns
    ///
    /// The context of the new session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if no user matches the
    /// credentials, and `AuthError::StoreFailure` if the lookup fails or the
    /// stored role is inconsistent with its facility.
    pub fn authenticate(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
    ) -> Result<SessionContext, AuthError> {
        let user: UserData = persistence
            .authenticate_user(username, password)
            .map_err(|e| {
                error!(username, error = %e, "Credential lookup failed");
                AuthError::StoreFailure {
                    message: e.to_string(),
                }
            })?
            .ok_or_else(|| {
                warn!(username, "Rejected login");
                AuthError::AuthenticationFailed {
                    reason: String::from("Invalid credentials"),
                }
            })?;

        let role: Role = Role::from_stored(&user.role, user.facility_id).map_err(|e| {
            error!(username, error = %e, "Stored user has an inconsistent role");
            AuthError::StoreFailure {
                message: e.to_string(),
            }
        })?;

        info!(username, role = %role, "User logged in");

        Ok(SessionContext {
            user_id: user.user_id,
            username: user.username,
            role,
        })
    }

    /// Generates a session token.
    ///
    /// Tokens identify a browser session; they are not a security boundary.
    #[must_use]
    pub fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if a session may register tests.
    ///
    /// Only clinicians register, and always at their own facility.
    ///
    /// # Returns
    ///
    /// The facility the test will be registered at.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not a clinician.
    pub fn authorize_register_test(session: &SessionContext) -> Result<i64, AuthError> {
        match session.role {
            Role::Clinician { facility_id } => Ok(facility_id),
            Role::Supervisor => Err(AuthError::Unauthorized {
                action: String::from("register_test"),
                required_role: String::from(Role::CLINICIAN),
            }),
        }
    }

    /// Checks if a session may view a facility's tests.
    ///
    /// # Returns
    ///
    /// The facility whose tests are visible.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not a clinician.
    pub fn authorize_view_facility(session: &SessionContext) -> Result<i64, AuthError> {
        match session.role {
            Role::Clinician { facility_id } => Ok(facility_id),
            Role::Supervisor => Err(AuthError::Unauthorized {
                action: String::from("view_facility"),
                required_role: String::from(Role::CLINICIAN),
            }),
        }
    }

    /// Checks if a session may update a test.
    ///
    /// Only supervisors may update tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not a supervisor.
    pub fn authorize_update_test(session: &SessionContext) -> Result<(), AuthError> {
        if session.role.is_supervisor() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("update_test"),
                required_role: String::from(Role::SUPERVISOR),
            })
        }
    }

    /// Checks if a session may list tests across all facilities.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not a supervisor.
    pub fn authorize_list_all_tests(session: &SessionContext) -> Result<(), AuthError> {
        if session.role.is_supervisor() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("list_all_tests"),
                required_role: String::from(Role::SUPERVISOR),
            })
        }
    }
}
