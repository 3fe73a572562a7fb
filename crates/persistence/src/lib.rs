// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the PAP test monitor.
//!
//! This crate owns all persistent state: the four reference and record
//! tables, the reference data loader, and every read and write the views
//! perform. It is built on Diesel over `SQLite`.
//!
//! ## Schema
//!
//! - `microredes`: micro-networks
//! - `establecimientos`: facilities, each linked to a micro-network
//! - `usuarios`: logins with a stored role and optional facility
//! - `pruebas_pap`: PAP test records
//!
//! Table and column names are a durable contract with existing database
//! files. The embedded migration creates them with `IF NOT EXISTS`.
//!
//! ## Testing
//!
//! - `Persistence::new_in_memory()` gives each test an isolated database
//! - Foreign key enforcement is on for every connection

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use pap_monitor_domain::{
    FacilityInfo, FacilityPapTest, FacilityStatistics, NewPapTest, PapTest, TestStatus,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{SeedReport, UserData};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Persistence adapter over a single `SQLite` connection.
///
/// One instance is shared by every session of the process.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_pap_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if it does not exist. Missing tables are created;
    /// existing ones are left untouched.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        backend::sqlite::enable_wal_mode(&mut conn)?;

        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Reference Data
    // ========================================================================

    /// Inserts any missing reference rows (micro-networks, facilities, users).
    ///
    /// Safe to call on every start.
    ///
    /// # Errors
    ///
    /// Returns an error if the loader fails; no partial rows are committed.
    pub fn seed_reference_data(&mut self) -> Result<SeedReport, PersistenceError> {
        mutations::seed::seed_reference_data(&mut self.conn)
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Looks up the user with exactly this username and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn authenticate_user(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::find_user_by_credentials(&mut self.conn, username, password)
    }

    /// Retrieves a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    #[cfg(test)]
    pub(crate) fn get_user_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_username(&mut self.conn, username)
    }

    /// Counts all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_users(&mut self.conn)
    }

    // ========================================================================
    // Facilities
    // ========================================================================

    /// Resolves a facility to its name and micro-network name.
    ///
    /// Returns `Ok(None)` if the facility is unknown or has no micro-network.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_facility_info(
        &mut self,
        facility_id: i64,
    ) -> Result<Option<FacilityInfo>, PersistenceError> {
        queries::facilities::get_facility_info(&mut self.conn, facility_id)
    }

    /// Looks up a facility ID by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    #[cfg(test)]
    pub(crate) fn get_facility_id_by_name(&mut self, name: &str) -> Result<Option<i64>, PersistenceError> {
        queries::facilities::get_facility_id_by_name(&mut self.conn, name)
    }

    /// Lists all facilities.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    #[cfg(test)]
    pub(crate) fn list_facilities(
        &mut self,
    ) -> Result<Vec<data_models::FacilityData>, PersistenceError> {
        queries::facilities::list_facilities(&mut self.conn)
    }

    /// Counts all micro-networks.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_micro_networks(&mut self) -> Result<i64, PersistenceError> {
        queries::facilities::count_micro_networks(&mut self.conn)
    }

    /// Counts all facilities.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_facilities(&mut self) -> Result<i64, PersistenceError> {
        queries::facilities::count_facilities(&mut self.conn)
    }

    // ========================================================================
    // PAP Tests
    // ========================================================================

    /// Computes total, positive, negative and no-result counts for a facility.
    ///
    /// # Errors
    ///
    /// Returns an error if a count query fails.
    pub fn get_facility_statistics(
        &mut self,
        facility_id: i64,
    ) -> Result<FacilityStatistics, PersistenceError> {
        queries::pap_tests::get_facility_statistics(&mut self.conn, facility_id)
    }

    /// Registers a new pending test and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn register_test(&mut self, test: &NewPapTest) -> Result<i64, PersistenceError> {
        mutations::pap_tests::register_test(&mut self.conn, test)
    }

    /// Overwrites status and result of a test and returns the rows affected.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_test(
        &mut self,
        test_id: i64,
        status: TestStatus,
        result: Option<&str>,
    ) -> Result<usize, PersistenceError> {
        mutations::pap_tests::update_test(&mut self.conn, test_id, status, result)
    }

    /// Retrieves a test by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed.
    pub fn get_pap_test(&mut self, test_id: i64) -> Result<Option<PapTest>, PersistenceError> {
        queries::pap_tests::get_pap_test(&mut self.conn, test_id)
    }

    /// Lists the tests of one facility.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub fn list_tests_for_facility(
        &mut self,
        facility_id: i64,
    ) -> Result<Vec<PapTest>, PersistenceError> {
        queries::pap_tests::list_tests_for_facility(&mut self.conn, facility_id)
    }

    /// Lists every test with its facility name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub fn list_all_tests(&mut self) -> Result<Vec<FacilityPapTest>, PersistenceError> {
        queries::pap_tests::list_all_tests(&mut self.conn)
    }

    /// Counts all tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_pap_tests(&mut self) -> Result<i64, PersistenceError> {
        queries::pap_tests::count_pap_tests(&mut self.conn)
    }
}
