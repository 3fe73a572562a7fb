// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Patient age is outside the accepted range.
    InvalidAge {
        /// The rejected age.
        age: i64,
        /// Inclusive lower bound.
        min: u8,
        /// Inclusive upper bound.
        max: u8,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to render a date as text.
    DateFormatError(String),
    /// Status text is not one of the known test states.
    InvalidStatus(String),
    /// Stored role and facility assignment do not form a valid role.
    InconsistentRole {
        /// The stored role text.
        role: String,
        /// The stored facility assignment.
        facility_id: Option<i64>,
    },
    /// Test identifier must be positive.
    InvalidTestId(i64),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAge { age, min, max } => {
                write!(f, "Invalid age: {age}. Must be between {min} and {max}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateFormatError(msg) => write!(f, "Failed to format date: {msg}"),
            Self::InvalidStatus(status) => write!(
                f,
                "Invalid status '{status}'. Must be one of: pendiente, en proceso, completado"
            ),
            Self::InconsistentRole { role, facility_id } => match facility_id {
                Some(id) => write!(f, "Role '{role}' is not valid with facility {id}"),
                None => write!(f, "Role '{role}' is not valid without a facility"),
            },
            Self::InvalidTestId(id) => {
                write!(f, "Invalid test ID: {id}. Must be greater than 0")
            }
        }
    }
}

impl std::error::Error for DomainError {}
