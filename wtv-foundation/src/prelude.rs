// WTV - wtv-foundation
// Module: Prelude
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for wtv-foundation
//!
//! Common imports for the crates that build on the type vocabulary.

pub use alloc::{
    borrow::Cow,
    boxed::Box,
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};
pub use core::fmt;

pub use wtv_error::prelude::*;

pub use crate::{
    types::{
        BlockType, FuncType, GlobalType, Limits, MemoryType, RefType, TableType, TypeIdx,
        ValueType, MAX_MEMORY_PAGES,
    },
    values::Value,
};
