// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pap_monitor_domain::{PapTest, ResultClass, TestStatus};
use time::{Date, Month};

use crate::error::PersistenceError;

#[test]
fn test_register_test_starts_pending_without_result() {
    let mut persistence = super::create_seeded_persistence();

    let id: i64 = persistence
        .register_test(&super::create_test_registration("Maria Lopez", 1))
        .unwrap();

    let test: PapTest = persistence.get_pap_test(id).unwrap().unwrap();

    assert_eq!(test.patient_name, "Maria Lopez");
    assert_eq!(test.age, 34);
    assert_eq!(
        test.sample_date,
        Date::from_calendar_date(2024, Month::January, 10).unwrap()
    );
    assert_eq!(
        test.delivery_date,
        Date::from_calendar_date(2024, Month::January, 20).unwrap()
    );
    assert_eq!(test.facility_id, 1);
    assert_eq!(test.status, TestStatus::Pending);
    assert_eq!(test.result, None);

    assert_eq!(persistence.get_facility_statistics(1).unwrap().total, 1);
}

#[test]
fn test_register_test_assigns_increasing_ids() {
    let mut persistence = super::create_seeded_persistence();

    let first = persistence
        .register_test(&super::create_test_registration("Uno", 1))
        .unwrap();
    let second = persistence
        .register_test(&super::create_test_registration("Dos", 1))
        .unwrap();

    assert!(second > first);
}

#[test]
fn test_register_test_with_unknown_facility_fails() {
    let mut persistence = super::create_seeded_persistence();

    let result: Result<i64, PersistenceError> =
        persistence.register_test(&super::create_test_registration("Nadie", 999));

    assert!(result.is_err(), "Foreign key should reject facility 999");
    assert_eq!(persistence.count_pap_tests().unwrap(), 0);
}

#[test]
fn test_update_overwrites_status_and_result_only() {
    let mut persistence = super::create_seeded_persistence();

    let id = persistence
        .register_test(&super::create_test_registration("Maria Lopez", 1))
        .unwrap();
    let before = persistence.get_pap_test(id).unwrap().unwrap();

    let rows = persistence
        .update_test(id, TestStatus::Completed, Some("negativo"))
        .unwrap();
    assert_eq!(rows, 1);

    let after = persistence.get_pap_test(id).unwrap().unwrap();
    assert_eq!(after.status, TestStatus::Completed);
    assert_eq!(after.result.as_deref(), Some("negativo"));
    assert_eq!(after.result_class(), ResultClass::Negative);
    assert_eq!(after.patient_name, before.patient_name);
    assert_eq!(after.age, before.age);
    assert_eq!(after.sample_date, before.sample_date);
    assert_eq!(after.delivery_date, before.delivery_date);
    assert_eq!(after.facility_id, before.facility_id);
}

#[test]
fn test_update_can_clear_result() {
    let mut persistence = super::create_seeded_persistence();

    let id = persistence
        .register_test(&super::create_test_registration("Maria Lopez", 1))
        .unwrap();
    persistence
        .update_test(id, TestStatus::Completed, Some("positivo"))
        .unwrap();
    persistence
        .update_test(id, TestStatus::InProgress, None)
        .unwrap();

    let test = persistence.get_pap_test(id).unwrap().unwrap();
    assert_eq!(test.status, TestStatus::InProgress);
    assert_eq!(test.result, None);
    assert_eq!(test.result_class(), ResultClass::Missing);
}

#[test]
fn test_update_unknown_id_is_a_no_op() {
    let mut persistence = super::create_seeded_persistence();

    let rows = persistence
        .update_test(999, TestStatus::Completed, Some("positivo"))
        .unwrap();

    assert_eq!(rows, 0);
    assert_eq!(persistence.count_pap_tests().unwrap(), 0);
}

#[test]
fn test_list_tests_for_facility_is_scoped() {
    let mut persistence = super::create_seeded_persistence();

    persistence
        .register_test(&super::create_test_registration("En Uno", 1))
        .unwrap();
    persistence
        .register_test(&super::create_test_registration("En Dos", 2))
        .unwrap();

    let tests = persistence.list_tests_for_facility(1).unwrap();

    assert_eq!(tests.len(), 1);
    assert_eq!(tests[0].patient_name, "En Uno");
    assert!(persistence.list_tests_for_facility(3).unwrap().is_empty());
}

#[test]
fn test_list_all_tests_spans_facilities() {
    let mut persistence = super::create_seeded_persistence();

    persistence
        .register_test(&super::create_test_registration("En Uno", 1))
        .unwrap();
    persistence
        .register_test(&super::create_test_registration("En Dos", 2))
        .unwrap();

    let tests = persistence.list_all_tests().unwrap();

    assert_eq!(tests.len(), 2);
    assert_eq!(tests[0].test.patient_name, "En Uno");
    assert_eq!(tests[1].test.patient_name, "En Dos");
    assert_ne!(tests[0].facility_name, tests[1].facility_name);
}

#[test]
fn test_get_unknown_test_is_none() {
    let mut persistence = super::create_seeded_persistence();
    assert!(persistence.get_pap_test(42).unwrap().is_none());
}
