// WTV - wtv-error
// Module: WTV Error Handling
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WTV error handling library
//!
//! This library provides the error value shared by every crate of the
//! validator workspace, the numeric error codes, and the located
//! [`Diagnostic`] that a failed validation or a runtime trap is reported as.
//!
//! # Error Categories
//!
//! ## Validation Errors (4000-4099)
//! - Operand type mismatches
//! - Local, global, function, table, type, memory and segment indices
//! - Branch depths, control frame structure
//! - Declaration limits
//!
//! ## Runtime Errors (2000-2099)
//! - Table access out of bounds (traps)
//! - Runtime operand stack underflow and type errors
//!
//! # Usage
//!
//! ```
//! use wtv_error::{codes, kinds, Diagnostic, Error, ErrorCategory};
//!
//! let error = Error::new(
//!     ErrorCategory::Validation,
//!     codes::INVALID_LOCAL_INDEX,
//!     "local variable out of range (max 2)",
//! );
//! assert!(error.is_validation_error());
//!
//! let diagnostic = Diagnostic::at(0x25, error).with_callback("OnLocalSetExpr");
//! assert_eq!(
//!     diagnostic.to_string(),
//!     "0000025: error: local variable out of range (max 2)\n\
//!      0000025: error: OnLocalSetExpr callback failed"
//! );
//!
//! let trap = kinds::table_access_out_of_bounds("table.set", 2, 1);
//! assert_eq!(
//!     Diagnostic::trap(trap).to_string(),
//!     "out of bounds table access: table.set at 2 >= max value 1"
//! );
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)] // Rule 2
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

extern crate alloc;

/// Error codes for wtv
pub mod codes;
/// Error and error handling types
pub mod errors;
/// Error kind constructors
pub mod kinds;

pub mod context;
pub mod diagnostic;
pub mod prelude;

#[macro_use]
pub mod macros;

pub use context::ResultExt;
pub use diagnostic::{Diagnostic, DiagnosticEntry};
pub use errors::{Error, ErrorCategory};

/// A specialized `Result` type for WTV operations.
pub type Result<T> = core::result::Result<T, Error>;

#[doc(hidden)]
pub mod __private {
    pub use alloc::format;
}
