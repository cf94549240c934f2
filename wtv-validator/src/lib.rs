// WTV - wtv-validator
// Module: WebAssembly Function Body Validation
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Stack-polymorphic WebAssembly validator.
//!
//! Validates decoded function bodies instruction by instruction against an
//! abstract operand stack and a stack of control frames. Failures are
//! reported as located [`Diagnostic`]s:
//!
//! ```
//! use wtv_foundation::{FuncType, ValueType};
//! use wtv_validator::{validate_module, FunctionBody, Instruction, Module};
//!
//! let mut module = Module::new();
//! let ty = module.add_type(FuncType::new([], [ValueType::I32]));
//! module.add_function(
//!     FunctionBody::new(ty)
//!         .with_locals(1, ValueType::I32)
//!         .with_locals(1, ValueType::F32)
//!         .with_code(0x19, [Instruction::LocalSet(0), Instruction::End]),
//! );
//!
//! let diagnostic = validate_module(&module).unwrap_err();
//! assert_eq!(
//!     diagnostic.to_string(),
//!     "0000019: error: type mismatch in local.set, expected [i32] but got []\n\
//!      0000019: error: OnLocalSetExpr callback failed"
//! );
//! ```
//!
//! Bodies share nothing but the read-only [`Module`], so independent
//! functions can be validated concurrently; see
//! [`ValidationConfig::parallel`].

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)] // Rule 2
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_possible_truncation)]

extern crate alloc;

pub mod config;
pub mod instructions;
pub mod locals;
pub mod module;
pub mod module_validator;
pub mod numeric;
pub mod prelude;
pub mod stack;
pub mod validator;

pub use config::ValidationConfig;
pub use instructions::{Instruction, LoadOp, MemArg, StoreOp};
pub use locals::LocalSpace;
pub use module::{ElementMode, ElementSegment, FunctionBody, Located, Module};
pub use module_validator::{
    validate_module, validate_module_with_config, ModuleValidator, ValidationReport, Verdict,
};
pub use numeric::{NumericClass, NumericOp};
pub use stack::{ControlFrame, FrameKind, Operand, OperandStack};
pub use validator::{validate_function, FunctionValidator};
pub use wtv_error::{Diagnostic, Error, Result};
