// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared test fixtures.

use diesel::{Connection, RunQueryDsl, SqliteConnection};
use pap_monitor_persistence::Persistence;
use std::path::{Path, PathBuf};

use crate::auth::AuthenticationService;
use crate::request_response::RegisterTestRequest;
use crate::session::SessionContext;

/// Creates an in-memory store with the reference data loaded.
pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.seed_reference_data().unwrap();
    persistence
}

/// Logs in as the clinician of the first facility.
pub fn clinician_session(persistence: &mut Persistence) -> SessionContext {
    AuthenticationService::authenticate(persistence, "obstetra1", "12345").unwrap()
}

/// Logs in as the clinician of the second facility.
pub fn other_clinician_session(persistence: &mut Persistence) -> SessionContext {
    AuthenticationService::authenticate(persistence, "obstetra2", "12345").unwrap()
}

/// Logs in as the supervisor.
pub fn supervisor_session(persistence: &mut Persistence) -> SessionContext {
    AuthenticationService::authenticate(persistence, "jefe", "admin123").unwrap()
}

pub fn create_register_request(patient_name: &str) -> RegisterTestRequest {
    RegisterTestRequest {
        patient_name: String::from(patient_name),
        age: 34,
        sample_date: String::from("2024-01-10"),
        delivery_date: String::from("2024-01-20"),
    }
}

/// Runs `test` against a seeded store backed by a temporary file.
///
/// The file lets `execute_on_second_connection` change the store underneath
/// the open `Persistence`.
pub fn with_file_store<F: FnOnce(&mut Persistence, &Path)>(label: &str, test: F) {
    let nanos: u128 = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    let path: PathBuf = std::env::temp_dir().join(format!("pap_api_{label}_{nanos}.db"));

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        persistence.seed_reference_data().unwrap();
        test(&mut persistence, &path);
    }

    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}

/// Executes raw SQL on a separate connection to the store file.
pub fn execute_on_second_connection(path: &Path, sql: &str) {
    let mut conn = SqliteConnection::establish(path.to_str().unwrap()).unwrap();
    diesel::sql_query(sql).execute(&mut conn).unwrap();
}
