// WTV - wtv
// Module: Prelude
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for wtv
//!
//! Everything needed to build a module, validate it, and exercise its
//! tables, in one import.

pub use wtv_foundation::prelude::*;
pub use wtv_logging::{LogLevel, LogOperation, LogRegistry};
pub use wtv_runtime::{PureInstruction, Table, TableContext, TableOp, TableStore};
pub use wtv_validator::{
    validate_function, validate_module, validate_module_with_config, ElementMode,
    ElementSegment, FunctionBody, Instruction, LoadOp, MemArg, Module, ModuleValidator,
    NumericOp, StoreOp, ValidationConfig, ValidationReport, Verdict,
};

pub use crate::execution::{execute_table_instruction, table_op};
