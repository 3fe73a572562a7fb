// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference rows loaded into every store at start-up.

use crate::types::Role;

/// Micro-networks, by name.
pub const MICRO_NETWORKS: [&str; 7] = [
    "Acora",
    "Capachica",
    "Jose Antonio Encinas",
    "Laraqueri",
    "Mañazo",
    "Metropolitano",
    "Simon Bolivar",
];

/// A facility and the micro-network it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacilitySeed {
    pub name: &'static str,
    pub micro_network: &'static str,
}

const fn facility(name: &'static str, micro_network: &'static str) -> FacilitySeed {
    FacilitySeed {
        name,
        micro_network,
    }
}

pub const FACILITIES: [FacilitySeed; 10] = [
    facility("Establecimiento A", "Acora"),
    facility("Establecimiento B", "Acora"),
    facility("Establecimiento C", "Capachica"),
    facility("Establecimiento D", "Capachica"),
    facility("Establecimiento E", "Jose Antonio Encinas"),
    facility("Establecimiento F", "Jose Antonio Encinas"),
    facility("Establecimiento G", "Laraqueri"),
    facility("Establecimiento H", "Mañazo"),
    facility("Establecimiento I", "Metropolitano"),
    facility("Establecimiento J", "Simon Bolivar"),
];

/// A seeded login.
///
/// `facility` is `None` only for the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSeed {
    pub username: &'static str,
    pub password: &'static str,
    pub role: &'static str,
    pub facility: Option<&'static str>,
}

const fn clinician(username: &'static str, facility: &'static str) -> UserSeed {
    UserSeed {
        username,
        password: "12345",
        role: Role::CLINICIAN,
        facility: Some(facility),
    }
}

pub const USERS: [UserSeed; 11] = [
    clinician("obstetra1", "Establecimiento A"),
    clinician("obstetra2", "Establecimiento B"),
    clinician("obstetra3", "Establecimiento C"),
    clinician("obstetra4", "Establecimiento D"),
    clinician("obstetra5", "Establecimiento E"),
    clinician("obstetra6", "Establecimiento F"),
    clinician("obstetra7", "Establecimiento G"),
    clinician("obstetra8", "Establecimiento H"),
    clinician("obstetra9", "Establecimiento I"),
    clinician("obstetra10", "Establecimiento J"),
    UserSeed {
        username: "jefe",
        password: "admin123",
        role: Role::SUPERVISOR,
        facility: None,
    },
];
