// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, FACILITIES, MICRO_NETWORKS, USERS, validate_new_test, validate_test_id};

#[test]
fn test_validate_new_test_accepts_form_input() {
    let test = validate_new_test("Maria Lopez", 34, "2024-01-10", "2024-01-20", 1).unwrap();
    assert_eq!(test.patient_name, "Maria Lopez");
    assert_eq!(test.age.value(), 34);
    assert_eq!(test.facility_id, 1);
    assert!(test.sample_date < test.delivery_date);
}

#[test]
fn test_validate_new_test_rejects_out_of_range_age() {
    let result = validate_new_test("Ana", 120, "2024-01-10", "2024-01-20", 1);
    assert!(matches!(result, Err(DomainError::InvalidAge { age: 120, .. })));
}

#[test]
fn test_validate_new_test_rejects_malformed_dates() {
    let result = validate_new_test("Ana", 30, "2024-01-10", "yesterday", 1);
    assert!(matches!(result, Err(DomainError::DateParseError { .. })));
}

#[test]
fn test_reference_data_is_consistent() {
    assert_eq!(MICRO_NETWORKS.len(), 7);
    assert_eq!(FACILITIES.len(), 10);
    assert_eq!(USERS.len(), 11);

    for facility in FACILITIES {
        assert!(MICRO_NETWORKS.contains(&facility.micro_network));
    }

    let supervisors: Vec<_> = USERS.iter().filter(|u| u.facility.is_none()).collect();
    assert_eq!(supervisors.len(), 1);
    assert_eq!(supervisors[0].role, "jefe");

    for user in USERS.iter().filter(|u| u.facility.is_some()) {
        assert_eq!(user.role, "obstetra");
        assert!(FACILITIES.iter().any(|f| Some(f.name) == user.facility));
    }
}

#[test]
fn test_validate_test_id() {
    assert_eq!(validate_test_id(1), Ok(1));
    assert_eq!(validate_test_id(0), Err(DomainError::InvalidTestId(0)));
    assert_eq!(validate_test_id(-4), Err(DomainError::InvalidTestId(-4)));
}
