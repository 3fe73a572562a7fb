// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard views and the actions they offer.
//!
//! Every view is a plain function over the session and the store, so it can
//! be driven without an interactive surface.

use pap_monitor_domain::{
    FacilityInfo, FacilityStatistics, NewPapTest, Role, TestStatus, validate_new_test,
    validate_test_id,
};
use pap_monitor_persistence::Persistence;
use std::str::FromStr;
use tracing::{error, info, warn};

use crate::auth::AuthorizationService;
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    ClinicianDashboard, DashboardView, FacilityPapTestRecord, GLOBAL_FACILITY_LABEL,
    GLOBAL_MICRO_NETWORK_LABEL, PapTestRecord, REGISTERED_MESSAGE, RegisterTestRequest,
    RegisterTestResponse, Sidebar, SupervisorDashboard, UPDATED_MESSAGE, UpdateTestRequest,
    UpdateTestResponse, WhoAmIResponse, welcome_message,
};
use crate::session::{SessionContext, SessionState};

/// Returns the current session's identity.
#[must_use]
pub fn whoami(session: &SessionContext) -> WhoAmIResponse {
    WhoAmIResponse {
        username: session.username.clone(),
        role: session.role.as_str().to_string(),
        facility_id: session.role.facility_id(),
        welcome: welcome_message(&session.username),
    }
}

/// Renders the view for a session.
///
/// Anonymous sessions get the login view; authenticated sessions get the
/// dashboard of their role. A failing read never escapes: it is logged and
/// rendered as a failure banner.
pub fn render_dashboard(state: &SessionState, persistence: &mut Persistence) -> DashboardView {
    let Some(session) = state.context() else {
        return DashboardView::Login;
    };

    let rendered: Result<DashboardView, ApiError> = match session.role {
        Role::Clinician { .. } => {
            clinician_dashboard(session, persistence).map(DashboardView::Clinician)
        }
        Role::Supervisor => {
            supervisor_dashboard(session, persistence).map(DashboardView::Supervisor)
        }
    };

    rendered.unwrap_or_else(|e| {
        error!(username = %session.username, error = %e, "Failed to render dashboard");
        DashboardView::Failure {
            message: e.to_string(),
        }
    })
}

/// Builds the clinician dashboard: facility sidebar with statistics and the
/// facility's tests.
///
/// # Errors
///
/// Returns an error if:
/// - The session is not a clinician
/// - The facility has no micro-network
/// - A read fails
pub fn clinician_dashboard(
    session: &SessionContext,
    persistence: &mut Persistence,
) -> Result<ClinicianDashboard, ApiError> {
    let facility_id: i64 = AuthorizationService::authorize_view_facility(session)?;

    let info: FacilityInfo = persistence
        .get_facility_info(facility_id)?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Facility {facility_id} has no micro-network"),
        })?;
    let statistics: FacilityStatistics = persistence.get_facility_statistics(facility_id)?;

    let tests: Vec<PapTestRecord> = persistence
        .list_tests_for_facility(facility_id)?
        .iter()
        .map(PapTestRecord::try_from)
        .collect::<Result<_, _>>()?;

    Ok(ClinicianDashboard {
        welcome: welcome_message(&session.username),
        sidebar: Sidebar {
            micro_network_name: info.micro_network_name,
            facility_name: info.facility_name,
            statistics: Some(statistics),
        },
        tests,
    })
}

/// Registers a test at the clinician's facility.
///
/// The new test starts pending with no result.
///
/// # Errors
///
/// Returns an error if:
/// - The session is not a clinician
/// - The age is outside 10..=100 or a date is malformed
/// - The insert fails
pub fn register_test(
    session: &SessionContext,
    persistence: &mut Persistence,
    request: &RegisterTestRequest,
) -> Result<RegisterTestResponse, ApiError> {
    let facility_id: i64 = AuthorizationService::authorize_register_test(session)?;

    let test: NewPapTest = validate_new_test(
        &request.patient_name,
        request.age,
        &request.sample_date,
        &request.delivery_date,
        facility_id,
    )
    .map_err(translate_domain_error)?;

    let test_id: i64 = persistence.register_test(&test)?;

    info!(username = %session.username, test_id, facility_id, "Test registered");

    Ok(RegisterTestResponse {
        test_id,
        message: String::from(REGISTERED_MESSAGE),
    })
}

/// Builds the supervisor dashboard: global placeholder sidebar and every
/// test with its facility name.
///
/// # Errors
///
/// Returns an error if the session is not a supervisor or a read fails.
pub fn supervisor_dashboard(
    session: &SessionContext,
    persistence: &mut Persistence,
) -> Result<SupervisorDashboard, ApiError> {
    AuthorizationService::authorize_list_all_tests(session)?;

    let tests: Vec<FacilityPapTestRecord> = persistence
        .list_all_tests()?
        .iter()
        .map(FacilityPapTestRecord::try_from)
        .collect::<Result<_, _>>()?;

    Ok(SupervisorDashboard {
        welcome: welcome_message(&session.username),
        sidebar: Sidebar {
            micro_network_name: String::from(GLOBAL_MICRO_NETWORK_LABEL),
            facility_name: String::from(GLOBAL_FACILITY_LABEL),
            statistics: None,
        },
        tests,
        status_options: TestStatus::ALL
            .iter()
            .map(|status| status.as_str().to_string())
            .collect(),
    })
}

/// Overwrites the status and result of a test.
///
/// An ID that matches no test still succeeds. The result is stored exactly
/// as sent; omitting it clears the result.
///
/// # Errors
///
/// Returns an error if:
/// - The session is not a supervisor
/// - The ID is not positive or the status is unknown
/// - The store rejects the write (`ApiError::StoreWriteFailure`)
pub fn update_test(
    session: &SessionContext,
    persistence: &mut Persistence,
    request: &UpdateTestRequest,
) -> Result<UpdateTestResponse, ApiError> {
    AuthorizationService::authorize_update_test(session)?;

    let test_id: i64 = validate_test_id(request.test_id).map_err(translate_domain_error)?;
    let status: TestStatus =
        TestStatus::from_str(&request.status).map_err(translate_domain_error)?;
    let rows_affected: usize = persistence
        .update_test(test_id, status, request.result.as_deref())
        .map_err(|e| {
            error!(test_id, error = %e, "Test update failed");
            ApiError::StoreWriteFailure {
                cause: e.to_string(),
            }
        })?;

    if rows_affected == 0 {
        warn!(username = %session.username, test_id, "Update reported success for unknown test");
    }

    Ok(UpdateTestResponse {
        test_id,
        rows_affected,
        message: String::from(UPDATED_MESSAGE),
    })
}
