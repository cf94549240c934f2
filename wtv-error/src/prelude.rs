// WTV - wtv-error
// Module: WTV Error Prelude
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for wtv-error
//!
//! Re-exports the error types and helpers the other crates of the workspace
//! import together.

pub use crate::{
    codes,
    kinds::{self, format_type_list},
    Diagnostic,
    DiagnosticEntry,
    Error,
    ErrorCategory,
    Result,
    ResultExt,
};
