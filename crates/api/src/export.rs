// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV download of the test table a session can see.

use csv::Writer;
use pap_monitor_domain::Role;
use pap_monitor_persistence::Persistence;
use tracing::info;

use crate::error::ApiError;
use crate::request_response::{FacilityPapTestRecord, PapTestRecord};
use crate::session::SessionContext;

const TEST_HEADERS: [&str; 7] = [
    "ID",
    "Nombre",
    "Edad",
    "Fecha de Toma",
    "Fecha de Entrega",
    "Estado",
    "Resultado",
];

const FACILITY_HEADER: &str = "Establecimiento";

fn csv_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to write CSV: {err}"),
    }
}

fn test_fields(test: &PapTestRecord) -> [String; 7] {
    [
        test.id.to_string(),
        test.patient_name.clone(),
        test.age.to_string(),
        test.sample_date.clone(),
        test.delivery_date.clone(),
        test.status.clone(),
        test.result.clone().unwrap_or_default(),
    ]
}

/// Exports the caller's test table as CSV.
///
/// Clinicians get their facility's tests. Supervisors get every test with
/// the facility name as the second column.
///
/// # Errors
///
/// Returns an error if a read fails or the CSV cannot be written.
pub fn export_tests_csv(
    session: &SessionContext,
    persistence: &mut Persistence,
) -> Result<String, ApiError> {
    let mut writer: Writer<Vec<u8>> = Writer::from_writer(Vec::new());
    let rows: usize = match session.role {
        Role::Clinician { facility_id } => {
            writer.write_record(TEST_HEADERS).map_err(csv_error)?;
            let tests = persistence.list_tests_for_facility(facility_id)?;
            for test in &tests {
                writer
                    .write_record(test_fields(&PapTestRecord::try_from(test)?))
                    .map_err(csv_error)?;
            }
            tests.len()
        }
        Role::Supervisor => {
            let mut headers: Vec<&str> = Vec::from(TEST_HEADERS);
            headers.insert(1, FACILITY_HEADER);
            writer.write_record(&headers).map_err(csv_error)?;
            let tests = persistence.list_all_tests()?;
            for row in &tests {
                let record: FacilityPapTestRecord = FacilityPapTestRecord::try_from(row)?;
                let mut fields: Vec<String> = Vec::from(test_fields(&record.test));
                fields.insert(1, record.facility_name);
                writer.write_record(&fields).map_err(csv_error)?;
            }
            tests.len()
        }
    };

    let bytes: Vec<u8> = writer.into_inner().map_err(csv_error)?;
    info!(username = %session.username, rows, "Exported tests");
    String::from_utf8(bytes).map_err(csv_error)
}
