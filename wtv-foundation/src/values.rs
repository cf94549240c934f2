// WTV - wtv-foundation
// Module: Runtime Values
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly value representations
//!
//! This module provides datatypes for representing WebAssembly values at
//! runtime. Only the table model executes instructions, so the values here
//! are what flows through a table operation's operand stack.

use core::fmt;

use wtv_error::{Error, Result};

use crate::types::{RefType, ValueType};

/// Represents a WebAssembly runtime value
#[derive(Debug, Clone, Copy)]
pub enum Value {
    /// 32-bit integer
    I32(i32),
    /// 64-bit integer
    I64(i64),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
    /// Function reference, `None` is the null reference
    FuncRef(Option<u32>),
    /// External reference, `None` is the null reference
    ExternRef(Option<u32>),
}

// NaN payloads compare equal to each other so traces stay reproducible.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::F64(a), Value::F64(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::FuncRef(a), Value::FuncRef(b)) => a == b,
            (Value::ExternRef(a), Value::ExternRef(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    /// Creates a default value for the given WebAssembly value type.
    ///
    /// Zero for numeric types, the null reference for reference types.
    #[must_use]
    pub const fn default_for_type(ty: ValueType) -> Self {
        match ty {
            ValueType::I32 => Value::I32(0),
            ValueType::I64 => Value::I64(0),
            ValueType::F32 => Value::F32(0.0),
            ValueType::F64 => Value::F64(0.0),
            ValueType::FuncRef => Value::FuncRef(None),
            ValueType::ExternRef => Value::ExternRef(None),
        }
    }

    /// The null reference of a table element type
    #[must_use]
    pub const fn null_for(ty: RefType) -> Self {
        match ty {
            RefType::FuncRef => Value::FuncRef(None),
            RefType::ExternRef => Value::ExternRef(None),
        }
    }

    /// Returns the type of this value
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Value::I32(_) => ValueType::I32,
            Value::I64(_) => ValueType::I64,
            Value::F32(_) => ValueType::F32,
            Value::F64(_) => ValueType::F64,
            Value::FuncRef(_) => ValueType::FuncRef,
            Value::ExternRef(_) => ValueType::ExternRef,
        }
    }

    /// Checks if the value matches the given type
    #[must_use]
    pub fn matches_type(&self, ty: ValueType) -> bool {
        self.value_type() == ty
    }

    /// Whether this is a null reference
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::FuncRef(None) | Value::ExternRef(None))
    }

    /// Extract an `i32`
    pub fn as_i32(&self) -> Result<i32> {
        match self {
            Value::I32(v) => Ok(*v),
            other => Err(Error::invalid_type(alloc::format!(
                "expected i32, found {}",
                other.value_type()
            ))),
        }
    }

    /// Extract an `i32` reinterpreted as unsigned, the form table indices
    /// and lengths take
    pub fn as_u32(&self) -> Result<u32> {
        self.as_i32().map(|v| v as u32)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I32(v) => write!(f, "i32:{v}"),
            Value::I64(v) => write!(f, "i64:{v}"),
            Value::F32(v) => write!(f, "f32:{v}"),
            Value::F64(v) => write!(f, "f64:{v}"),
            Value::FuncRef(Some(idx)) => write!(f, "funcref:{idx}"),
            Value::ExternRef(Some(idx)) => write!(f, "externref:{idx}"),
            Value::FuncRef(None) | Value::ExternRef(None) => {
                write!(f, "{}:null", self.value_type())
            }
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::I32(v as i32)
    }
}
