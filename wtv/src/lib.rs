// WTV - wtv
// Module: WTV Facade
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly function body validation.
//!
//! This crate ties the WTV workspace together:
//!
//! - [`validator`]: stack-polymorphic type checking of function bodies,
//!   reporting located diagnostics
//! - [`runtime`]: bounds-checked tables and the table instructions
//! - [`logging`]: host log handlers for per-function outcomes
//! - [`error`] and [`foundation`]: the shared error and type vocabulary
//!
//! ```
//! use wtv::prelude::*;
//!
//! let mut module = Module::new();
//! let ty = module.add_type(FuncType::new([], [ValueType::I32]));
//! module.add_function(FunctionBody::new(ty).with_code(0x20, [Instruction::End]));
//!
//! let diagnostic = validate_module(&module).unwrap_err();
//! assert_eq!(
//!     diagnostic.lines(),
//!     [
//!         "0000020: error: type mismatch in implicit return, expected [i32] but got []",
//!         "0000020: error: EndFunctionBody callback failed",
//!     ]
//! );
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]

pub mod execution;
pub mod prelude;

pub use wtv_error as error;
pub use wtv_foundation as foundation;
pub use wtv_logging as logging;
pub use wtv_runtime as runtime;
pub use wtv_validator as validator;

pub use wtv_error::{Diagnostic, Error, Result};
pub use wtv_validator::{validate_module, Module, ValidationConfig};
