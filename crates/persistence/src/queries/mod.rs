// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `users`: Credential lookup and user listing
//! - `facilities`: Facility and micro-network lookups
//! - `pap_tests`: Test listings and per-facility statistics

pub mod facilities;
pub mod users;
