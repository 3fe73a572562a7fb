// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod reference_data;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use pap_test::{
    FacilityInfo, FacilityPapTest, FacilityStatistics, NEGATIVE_RESULT, NewPapTest, POSITIVE_RESULT,
    PapTest, ResultClass,
};
pub use reference_data::{FACILITIES, FacilitySeed, MICRO_NETWORKS, USERS, UserSeed};
pub use types::{PatientAge, Role, TestStatus, format_iso_date, parse_iso_date};
pub use validation::{validate_new_test, validate_test_id};
