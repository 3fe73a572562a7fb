// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data loader.
//!
//! Runs on every start. Each row is looked up by its unique name first and
//! only inserted when absent, so repeated runs leave the tables unchanged.

use diesel::SqliteConnection;
use diesel::prelude::*;
use pap_monitor_domain::{FACILITIES, MICRO_NETWORKS, USERS};
use tracing::{debug, info, warn};

use crate::data_models::SeedReport;
use crate::diesel_schema::{establecimientos, microredes, usuarios};
use crate::error::PersistenceError;
use crate::queries::facilities::{get_facility_id_by_name, get_micro_network_id_by_name};
use crate::queries::users::user_exists;

/// Inserts any missing micro-networks, facilities and users.
///
/// Runs in a single transaction.
///
/// # Errors
///
/// Returns an error if any lookup or insert fails; nothing is committed.
pub fn seed_reference_data(conn: &mut SqliteConnection) -> Result<SeedReport, PersistenceError> {
    conn.transaction::<SeedReport, PersistenceError, _>(|conn| {
        let mut report: SeedReport = SeedReport::default();

        for name in MICRO_NETWORKS {
            if get_micro_network_id_by_name(conn, name)?.is_none() {
                diesel::insert_into(microredes::table)
                    .values(microredes::nombre.eq(name))
                    .execute(conn)?;
                debug!(micro_network = name, "Inserted micro-network");
                report.micro_networks_inserted += 1;
            }
        }

        for facility in FACILITIES {
            let Some(micro_network_id) =
                get_micro_network_id_by_name(conn, facility.micro_network)?
            else {
                warn!(
                    facility = facility.name,
                    micro_network = facility.micro_network,
                    "Skipping facility: micro-network not found"
                );
                report.skipped += 1;
                continue;
            };

            if get_facility_id_by_name(conn, facility.name)?.is_none() {
                diesel::insert_into(establecimientos::table)
                    .values((
                        establecimientos::nombre.eq(facility.name),
                        establecimientos::microred_id.eq(micro_network_id),
                    ))
                    .execute(conn)?;
                debug!(facility = facility.name, "Inserted facility");
                report.facilities_inserted += 1;
            }
        }

        for user in USERS {
            let facility_id: Option<i64> = match user.facility {
                Some(name) => {
                    let Some(id) = get_facility_id_by_name(conn, name)? else {
                        warn!(
                            username = user.username,
                            facility = name,
                            "Skipping user: facility not found"
                        );
                        report.skipped += 1;
                        continue;
                    };
                    Some(id)
                }
                None => None,
            };

            if !user_exists(conn, user.username)? {
                diesel::insert_into(usuarios::table)
                    .values((
                        usuarios::username.eq(user.username),
                        usuarios::password.eq(user.password),
                        usuarios::rol.eq(user.role),
                        usuarios::establecimiento_id.eq(facility_id),
                    ))
                    .execute(conn)?;
                debug!(username = user.username, "Inserted user");
                report.users_inserted += 1;
            }
        }

        info!(
            micro_networks = report.micro_networks_inserted,
            facilities = report.facilities_inserted,
            users = report.users_inserted,
            skipped = report.skipped,
            "Reference data loaded"
        );

        Ok(report)
    })
}
