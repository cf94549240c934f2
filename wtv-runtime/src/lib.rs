// WTV - wtv-runtime
// Module: Table Runtime
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Bounds-checked WebAssembly tables.
//!
//! Models the runtime side of the table instructions: every access checks
//! the index against the table's current size and traps when it is out of
//! range. Indices arrive as `i32` operands and are reinterpreted as
//! unsigned, so `-1` reports as `4294967295`.
//!
//! ```
//! use wtv_foundation::{Limits, RefType, TableType, Value};
//! use wtv_runtime::{TableOp, TableStore};
//!
//! let mut store = TableStore::new();
//! let table = store.add_table(TableType::new(RefType::FuncRef, Limits::new(1, Some(1)))).unwrap();
//! let trap = store
//!     .invoke(&TableOp::TableSet(table), [Value::I32(2), Value::FuncRef(Some(0))])
//!     .unwrap_err();
//! assert_eq!(trap.to_string(), "out of bounds table access: table.set at 2 >= max value 1");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]

extern crate alloc;

pub mod instruction_traits;
pub mod prelude;
pub mod store;
pub mod table;
pub mod table_ops;

pub use instruction_traits::PureInstruction;
pub use store::TableStore;
pub use table::{Table, MAX_TABLE_SIZE};
pub use table_ops::{TableContext, TableOp};
pub use wtv_error::{Diagnostic, Error, Result};
