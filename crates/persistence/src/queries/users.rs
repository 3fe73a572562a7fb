// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::UserData;
use crate::diesel_schema::usuarios;
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = usuarios)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct UserRow {
    id: i64,
    username: Option<String>,
    rol: Option<String>,
    establecimiento_id: Option<i64>,
}

impl From<UserRow> for UserData {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.id,
            username: row.username.unwrap_or_default(),
            role: row.rol.unwrap_or_default(),
            facility_id: row.establecimiento_id,
        }
    }
}

/// Looks up the user matching both username and password.
///
/// Comparison is exact and case-sensitive. Returns the first match.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no user matches.
pub fn find_user_by_credentials(
    conn: &mut SqliteConnection,
    username: &str,
    password: &str,
) -> Result<Option<UserData>, PersistenceError> {
    debug!("Looking up user by credentials: {}", username);

    let row: Option<UserRow> = usuarios::table
        .filter(usuarios::username.eq(username))
        .filter(usuarios::password.eq(password))
        .select(UserRow::as_select())
        .order_by(usuarios::id.asc())
        .first(conn)
        .optional()?;

    Ok(row.map(UserData::from))
}

/// Retrieves a user by username.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[cfg(test)]
pub fn get_user_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<UserData>, PersistenceError> {
    debug!("Looking up user by username: {}", username);

    let row: Option<UserRow> = usuarios::table
        .filter(usuarios::username.eq(username))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(UserData::from))
}

/// Returns true if a user with this username exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn user_exists(conn: &mut SqliteConnection, username: &str) -> Result<bool, PersistenceError> {
    let found: Option<i64> = usuarios::table
        .filter(usuarios::username.eq(username))
        .select(usuarios::id)
        .first(conn)
        .optional()?;
    Ok(found.is_some())
}

/// Counts all users.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_users(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(usuarios::table.count().get_result(conn)?)
}
