// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `seed`: Idempotent reference data loader
//! - `pap_tests`: Test registration and status/result updates

pub mod seed;
