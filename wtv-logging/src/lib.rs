//! # WTV Logging
//!
//! Logging infrastructure for the WTV WebAssembly validator.
//!
//! The module validator reports per-function outcomes as [`LogOperation`]s.
//! A host installs a handler on a [`LogRegistry`] to receive them; with the
//! `std` feature they are also forwarded to the `log` facade under the
//! `wtv::validation` target.
//!
//! ```
//! use wtv_logging::{LogLevel, LogOperation, LogRegistry};
//!
//! let mut registry = LogRegistry::new().with_min_level(LogLevel::Info);
//! registry.register_log_handler(|op| assert_eq!(op.function_index, Some(0)));
//! registry.handle_log(&LogOperation::for_function(LogLevel::Info, 0, "accepted"));
//! ```

// WTV - wtv-logging
// Module: Logging Infrastructure
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![forbid(unsafe_code)] // Rule 2
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub use wtv_error::{Error, Result};

/// Log handler registry.
pub mod handler;

/// Log level definitions for categorizing message severity.
pub mod level;

/// Log operation records.
pub mod operation;

pub use handler::{LogHandler, LogRegistry};
pub use level::{LogLevel, ParseLogLevelError};
pub use operation::LogOperation;
