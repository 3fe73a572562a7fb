// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod pap_test_tests;

use pap_monitor_domain::{NewPapTest, PatientAge};
use time::{Date, Month};

use crate::Persistence;

/// Creates an in-memory database with the reference data loaded.
pub fn create_seeded_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.seed_reference_data().unwrap();
    persistence
}

/// Builds a valid test registration for the given facility.
pub fn create_test_registration(patient_name: &str, facility_id: i64) -> NewPapTest {
    NewPapTest {
        patient_name: String::from(patient_name),
        age: PatientAge::new(34).unwrap(),
        sample_date: Date::from_calendar_date(2024, Month::January, 10).unwrap(),
        delivery_date: Date::from_calendar_date(2024, Month::January, 20).unwrap(),
        facility_id,
    }
}
