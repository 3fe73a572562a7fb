// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Storage format for sample and delivery dates.
const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the text is not a valid calendar date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), ISO_DATE).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `DomainError::DateFormatError` if the date cannot be rendered.
pub fn format_iso_date(date: Date) -> Result<String, DomainError> {
    date.format(ISO_DATE)
        .map_err(|e| DomainError::DateFormatError(e.to_string()))
}

/// The role held by an authenticated user.
///
/// A clinician always works within exactly one facility; a supervisor has
/// global scope and no facility. The variant carries the facility so the
/// two cases cannot be confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Role {
    /// Registers tests and sees the records of a single facility.
    Clinician {
        /// The facility this clinician belongs to.
        facility_id: i64,
    },
    /// Sees every record and may amend status and result.
    Supervisor,
}

impl Role {
    /// Stored role text for clinicians.
    pub const CLINICIAN: &'static str = "obstetra";
    /// Stored role text for supervisors.
    pub const SUPERVISOR: &'static str = "jefe";

    /// Builds a role from the stored `rol` text and facility assignment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InconsistentRole` if the role text is unknown,
    /// a clinician has no facility, or a supervisor has one.
    pub fn from_stored(role: &str, facility_id: Option<i64>) -> Result<Self, DomainError> {
        match (role, facility_id) {
            (Self::CLINICIAN, Some(facility_id)) => Ok(Self::Clinician { facility_id }),
            (Self::SUPERVISOR, None) => Ok(Self::Supervisor),
            _ => Err(DomainError::InconsistentRole {
                role: role.to_string(),
                facility_id,
            }),
        }
    }

    /// Returns the stored role text.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clinician { .. } => Self::CLINICIAN,
            Self::Supervisor => Self::SUPERVISOR,
        }
    }

    /// Returns the facility this role is scoped to, if any.
    #[must_use]
    pub const fn facility_id(&self) -> Option<i64> {
        match self {
            Self::Clinician { facility_id } => Some(*facility_id),
            Self::Supervisor => None,
        }
    }

    #[must_use]
    pub const fn is_supervisor(&self) -> bool {
        matches!(self, Self::Supervisor)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Processing state of a PAP test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TestStatus {
    /// Sample taken, nothing processed yet.
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    /// Sample at the laboratory.
    #[serde(rename = "en proceso")]
    InProgress,
    /// Result available.
    #[serde(rename = "completado")]
    Completed,
}

impl TestStatus {
    /// All states in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Converts this status to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::InProgress => "en proceso",
            Self::Completed => "completado",
        }
    }
}

impl FromStr for TestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" => Ok(Self::Pending),
            "en proceso" => Ok(Self::InProgress),
            "completado" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A patient age accepted for registration.
///
/// The store itself does not constrain `edad`, so the range is enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PatientAge(u8);

impl PatientAge {
    /// Youngest accepted age (inclusive).
    pub const MIN: u8 = 10;
    /// Oldest accepted age (inclusive).
    pub const MAX: u8 = 100;

    /// Creates a validated patient age.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAge` if the value is outside `MIN..=MAX`.
    pub fn new(age: i64) -> Result<Self, DomainError> {
        u8::try_from(age)
            .ok()
            .filter(|a| (Self::MIN..=Self::MAX).contains(a))
            .map(Self)
            .ok_or(DomainError::InvalidAge {
                age,
                min: Self::MIN,
                max: Self::MAX,
            })
    }

    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}
