// WTV - wtv-validator
// Module: Prelude
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for wtv-validator
//!
//! Re-exports the foundation prelude plus the error macros, so the modules of
//! this crate share one import line.

pub use wtv_error::validation_error;
pub use wtv_foundation::prelude::*;
