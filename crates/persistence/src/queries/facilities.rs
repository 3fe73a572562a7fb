// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Facility and micro-network queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use pap_monitor_domain::FacilityInfo;
use tracing::debug;

#[cfg(test)]
use crate::data_models::FacilityData;
use crate::diesel_schema::{establecimientos, microredes};
use crate::error::PersistenceError;

/// Resolves a facility to its name and its micro-network's name.
///
/// This is an inner join: a facility without a micro-network link yields
/// `Ok(None)`, the same as an unknown facility.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_facility_info(
    conn: &mut SqliteConnection,
    facility_id: i64,
) -> Result<Option<FacilityInfo>, PersistenceError> {
    debug!(facility_id, "Looking up facility info");

    let row: Option<(Option<String>, Option<String>)> = establecimientos::table
        .inner_join(
            microredes::table.on(establecimientos::microred_id.eq(microredes::id.nullable())),
        )
        .filter(establecimientos::id.eq(facility_id))
        .select((establecimientos::nombre, microredes::nombre))
        .first(conn)
        .optional()?;

    Ok(row.map(|(facility_name, micro_network_name)| FacilityInfo {
        facility_name: facility_name.unwrap_or_default(),
        micro_network_name: micro_network_name.unwrap_or_default(),
    }))
}

/// Looks up a micro-network ID by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_micro_network_id_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<i64>, PersistenceError> {
    Ok(microredes::table
        .filter(microredes::nombre.eq(name))
        .select(microredes::id)
        .first(conn)
        .optional()?)
}

/// Looks up a facility ID by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_facility_id_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<i64>, PersistenceError> {
    Ok(establecimientos::table
        .filter(establecimientos::nombre.eq(name))
        .select(establecimientos::id)
        .first(conn)
        .optional()?)
}

/// Lists all facilities ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[cfg(test)]
pub fn list_facilities(conn: &mut SqliteConnection) -> Result<Vec<FacilityData>, PersistenceError> {
    debug!("Listing all facilities");

    let rows: Vec<(i64, Option<String>, Option<i64>)> = establecimientos::table
        .select((
            establecimientos::id,
            establecimientos::nombre,
            establecimientos::microred_id,
        ))
        .order_by(establecimientos::id.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(facility_id, name, micro_network_id)| FacilityData {
            facility_id,
            name: name.unwrap_or_default(),
            micro_network_id,
        })
        .collect())
}

/// Counts all micro-networks.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_micro_networks(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(microredes::table.count().get_result(conn)?)
}

/// Counts all facilities.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_facilities(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(establecimientos::table.count().get_result(conn)?)
}
