// WTV - wtv-foundation
// Module: Type Vocabulary
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Foundation types for the WTV WebAssembly validator.
//!
//! The value-type vocabulary, function signatures, table/memory/global
//! declarations, and the runtime [`Value`] used by the table model.
//!
//! ```
//! use wtv_foundation::{FuncType, ValueType};
//!
//! let ty = FuncType::new([], [ValueType::I32]);
//! assert_eq!(ty.to_string(), "[] -> [i32]");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)] // Rule 2
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]

extern crate alloc;

pub mod prelude;
pub mod types;
pub mod values;

pub use types::{
    BlockType, FuncType, GlobalType, Limits, MemoryType, RefType, TableType, TypeIdx, ValueType,
    MAX_MEMORY_PAGES,
};
pub use values::Value;
pub use wtv_error::{Error, Result};
