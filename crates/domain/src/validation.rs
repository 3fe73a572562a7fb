// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::pap_test::NewPapTest;
use crate::types::{PatientAge, parse_iso_date};

/// Validates registration form input and builds a `NewPapTest`.
///
/// Only the constraints of the form widgets are enforced: the age range and
/// well-formed dates. The patient name is taken as entered.
///
/// # Errors
///
/// Returns an error if the age is out of range or a date cannot be parsed.
pub fn validate_new_test(
    patient_name: &str,
    age: i64,
    sample_date: &str,
    delivery_date: &str,
    facility_id: i64,
) -> Result<NewPapTest, DomainError> {
    let age: PatientAge = PatientAge::new(age)?;
    let sample_date = parse_iso_date(sample_date)?;
    let delivery_date = parse_iso_date(delivery_date)?;

    Ok(NewPapTest {
        patient_name: patient_name.to_string(),
        age,
        sample_date,
        delivery_date,
        facility_id,
    })
}

/// Validates the test ID entered in the update form.
///
/// # Errors
///
/// Returns `DomainError::InvalidTestId` if the ID is not positive.
pub const fn validate_test_id(test_id: i64) -> Result<i64, DomainError> {
    if test_id < 1 {
        return Err(DomainError::InvalidTestId(test_id));
    }
    Ok(test_id)
}
