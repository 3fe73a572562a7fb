// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use pap_monitor_domain::{
    FacilityPapTest, FacilityStatistics, PapTest, ResultClass, format_iso_date,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, translate_domain_error};

/// Shown when a login is rejected.
pub const LOGIN_FAILED_MESSAGE: &str = "Usuario o contraseña incorrectos";
/// Shown after a test is registered.
pub const REGISTERED_MESSAGE: &str = "Prueba registrada correctamente";
/// Shown after a test update.
pub const UPDATED_MESSAGE: &str = "Prueba actualizada correctamente";
/// Prefixed to the store error when an update fails.
pub const UPDATE_FAILED_PREFIX: &str = "Error al actualizar la prueba: ";
/// Greeting prefix for the logged-in user.
pub const WELCOME_PREFIX: &str = "Bienvenido";
/// Facility placeholder for global sessions.
pub const GLOBAL_FACILITY_LABEL: &str = "Acceso Global";
/// Micro-network placeholder for global sessions.
pub const GLOBAL_MICRO_NETWORK_LABEL: &str = "Todas las Microredes";

/// Builds the greeting for a user.
#[must_use]
pub fn welcome_message(username: &str) -> String {
    format!("{WELCOME_PREFIX}, {username}")
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The bearer token identifying this browser session.
    pub session_token: String,
    pub username: String,
    /// The stored role text.
    pub role: String,
    /// The clinician's facility; `None` for supervisors.
    pub facility_id: Option<i64>,
}

/// API response describing the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    pub username: String,
    pub role: String,
    pub facility_id: Option<i64>,
    /// The greeting shown on every page.
    pub welcome: String,
}

/// API request to register a test at the session's facility.
///
/// Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterTestRequest {
    pub patient_name: String,
    pub age: i64,
    pub sample_date: String,
    pub delivery_date: String,
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterTestResponse {
    /// The ID of the new test.
    pub test_id: i64,
    pub message: String,
}

/// API request to overwrite the status and result of a test.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateTestRequest {
    pub test_id: i64,
    /// One of `pendiente`, `en proceso`, `completado`.
    pub status: String,
    /// Free text, stored as sent. Omitting it clears the result.
    #[serde(default)]
    pub result: Option<String>,
}

/// API response for an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTestResponse {
    pub test_id: i64,
    /// 0 when the ID matched no test.
    pub rows_affected: usize,
    pub message: String,
}

/// One row of a test table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PapTestRecord {
    pub id: i64,
    pub patient_name: String,
    pub age: i32,
    pub sample_date: String,
    pub delivery_date: String,
    pub status: String,
    pub result: Option<String>,
    /// How the result counts toward the facility statistics.
    pub result_class: ResultClass,
}

impl TryFrom<&PapTest> for PapTestRecord {
    type Error = ApiError;

    fn try_from(test: &PapTest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: test.id,
            patient_name: test.patient_name.clone(),
            age: test.age,
            sample_date: format_iso_date(test.sample_date).map_err(translate_domain_error)?,
            delivery_date: format_iso_date(test.delivery_date).map_err(translate_domain_error)?,
            status: test.status.as_str().to_string(),
            result: test.result.clone(),
            result_class: test.result_class(),
        })
    }
}

/// One row of the global test table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityPapTestRecord {
    pub facility_name: String,
    #[serde(flatten)]
    pub test: PapTestRecord,
}

impl TryFrom<&FacilityPapTest> for FacilityPapTestRecord {
    type Error = ApiError;

    fn try_from(row: &FacilityPapTest) -> Result<Self, Self::Error> {
        Ok(Self {
            facility_name: row.facility_name.clone(),
            test: PapTestRecord::try_from(&row.test)?,
        })
    }
}

/// The information side panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sidebar {
    pub micro_network_name: String,
    pub facility_name: String,
    /// Present only for facility-scoped sessions.
    pub statistics: Option<FacilityStatistics>,
}

/// The clinician's dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicianDashboard {
    pub welcome: String,
    pub sidebar: Sidebar,
    /// The tests registered at the clinician's facility.
    pub tests: Vec<PapTestRecord>,
}

/// The supervisor's dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorDashboard {
    pub welcome: String,
    pub sidebar: Sidebar,
    /// Every test, with its facility name.
    pub tests: Vec<FacilityPapTestRecord>,
    /// Status values the update form accepts.
    pub status_options: Vec<String>,
}

/// What a session sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DashboardView {
    /// Anonymous sessions see the login form.
    Login,
    Clinician(ClinicianDashboard),
    Supervisor(SupervisorDashboard),
    /// A read failed; the session itself is unaffected.
    Failure { message: String },
}
