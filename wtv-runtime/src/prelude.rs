// WTV - wtv-runtime
// Module: Prelude
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for wtv-runtime

pub use wtv_foundation::prelude::*;

pub use crate::{
    instruction_traits::PureInstruction,
    store::TableStore,
    table::Table,
    table_ops::{TableContext, TableOp},
};
