// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session gate and dashboard views for the PAP test monitor.
//!
//! Views are functions of `(session, store)` returning structured view
//! models. The rendering surface decides how to draw them.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod export;
mod handlers;
mod request_response;
mod session;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, AuthorizationService};
pub use error::{ApiError, AuthError, translate_domain_error};
pub use export::export_tests_csv;
pub use handlers::{
    clinician_dashboard, register_test, render_dashboard, supervisor_dashboard, update_test,
    whoami,
};
pub use request_response::{
    ClinicianDashboard, DashboardView, FacilityPapTestRecord, GLOBAL_FACILITY_LABEL,
    GLOBAL_MICRO_NETWORK_LABEL, LOGIN_FAILED_MESSAGE, LoginRequest, LoginResponse,
    PapTestRecord, REGISTERED_MESSAGE, RegisterTestRequest, RegisterTestResponse, Sidebar,
    SupervisorDashboard, UPDATE_FAILED_PREFIX, UPDATED_MESSAGE, UpdateTestRequest,
    UpdateTestResponse, WELCOME_PREFIX, WhoAmIResponse, welcome_message,
};
pub use session::{SessionContext, SessionState};
