// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A user row as stored.
///
/// The role is kept as stored text; the API layer turns the
/// (`role`, `facility_id`) pair into a `Role`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub user_id: i64,
    pub username: String,
    pub role: String,
    pub facility_id: Option<i64>,
}

/// A facility and its micro-network link.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilityData {
    pub facility_id: i64,
    pub name: String,
    pub micro_network_id: Option<i64>,
}

/// Rows inserted by one run of the reference data loader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub micro_networks_inserted: usize,
    pub facilities_inserted: usize,
    pub users_inserted: usize,
    /// Seed rows skipped because a referenced row could not be resolved.
    pub skipped: usize,
}

impl SeedReport {
    /// Returns true if nothing was inserted.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.micro_networks_inserted == 0 && self.facilities_inserted == 0 && self.users_inserted == 0
    }
}
