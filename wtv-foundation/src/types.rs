// WTV - wtv-foundation
// Module: WebAssembly Type Vocabulary
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly type definitions.
//!
//! Value types, function signatures and the declarations a module makes
//! about its tables, memories and globals. All of these are decoded once per
//! module and never change afterwards.

use alloc::vec::Vec;
use core::fmt;

use wtv_error::{codes, kinds, Error, ErrorCategory, Result};

/// Index into the type section
pub type TypeIdx = u32;

/// WebAssembly value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    /// 32-bit integer
    #[default]
    I32,
    /// 64-bit integer
    I64,
    /// 32-bit floating point
    F32,
    /// 64-bit floating point
    F64,
    /// Function reference
    FuncRef,
    /// External reference
    ExternRef,
}

impl ValueType {
    /// Create a value type from its binary encoding
    pub fn from_binary(byte: u8) -> Result<Self> {
        match byte {
            0x7F => Ok(ValueType::I32),
            0x7E => Ok(ValueType::I64),
            0x7D => Ok(ValueType::F32),
            0x7C => Ok(ValueType::F64),
            0x70 => Ok(ValueType::FuncRef),
            0x6F => Ok(ValueType::ExternRef),
            _ => Err(Error::new(
                ErrorCategory::Validation,
                codes::VALIDATION_ERROR,
                alloc::format!("invalid value type byte: 0x{byte:02x}"),
            )),
        }
    }

    /// Convert to the WebAssembly binary format value
    #[must_use]
    pub const fn to_binary(self) -> u8 {
        match self {
            ValueType::I32 => 0x7F,
            ValueType::I64 => 0x7E,
            ValueType::F32 => 0x7D,
            ValueType::F64 => 0x7C,
            ValueType::FuncRef => 0x70,
            ValueType::ExternRef => 0x6F,
        }
    }

    /// Text-format name, as used in diagnostics
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
            ValueType::FuncRef => "funcref",
            ValueType::ExternRef => "externref",
        }
    }

    /// Whether this is a numeric type
    #[must_use]
    pub const fn is_num(self) -> bool {
        matches!(self, Self::I32 | Self::I64 | Self::F32 | Self::F64)
    }

    /// Whether this is a reference type
    #[must_use]
    pub const fn is_ref(self) -> bool {
        matches!(self, Self::FuncRef | Self::ExternRef)
    }

    /// The reference type this value type denotes, if any
    #[must_use]
    pub const fn as_ref_type(self) -> Option<RefType> {
        match self {
            Self::FuncRef => Some(RefType::FuncRef),
            Self::ExternRef => Some(RefType::ExternRef),
            Self::I32 | Self::I64 | Self::F32 | Self::F64 => None,
        }
    }

    /// Size of a value of this type in linear memory, in bytes
    ///
    /// Reference types have no memory representation.
    #[must_use]
    pub const fn size_in_bytes(self) -> Option<u32> {
        match self {
            Self::I32 | Self::F32 => Some(4),
            Self::I64 | Self::F64 => Some(8),
            Self::FuncRef | Self::ExternRef => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference types allowed as table elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefType {
    /// Function reference type
    #[default]
    FuncRef,
    /// External reference type
    ExternRef,
}

impl RefType {
    /// The corresponding value type
    #[must_use]
    pub const fn to_value_type(self) -> ValueType {
        match self {
            RefType::FuncRef => ValueType::FuncRef,
            RefType::ExternRef => ValueType::ExternRef,
        }
    }
}

impl From<RefType> for ValueType {
    fn from(ty: RefType) -> Self {
        ty.to_value_type()
    }
}

impl TryFrom<ValueType> for RefType {
    type Error = Error;

    fn try_from(ty: ValueType) -> Result<Self> {
        ty.as_ref_type().ok_or_else(|| {
            Error::validation(
                codes::INVALID_ELEMENT_TYPE,
                alloc::format!("{ty} is not a reference type"),
            )
        })
    }
}

impl fmt::Display for RefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_value_type(), f)
    }
}

/// A function signature: parameter types to result types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FuncType {
    /// Parameter types, in order
    pub params:  Vec<ValueType>,
    /// Result types, in order
    pub results: Vec<ValueType>,
}

impl FuncType {
    /// Creates a new `FuncType` with the given parameter and result types.
    pub fn new(
        params: impl IntoIterator<Item = ValueType>,
        results: impl IntoIterator<Item = ValueType>,
    ) -> Self {
        Self {
            params:  params.into_iter().collect(),
            results: results.into_iter().collect(),
        }
    }
}

impl fmt::Display for FuncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            kinds::format_type_list(&self.params),
            kinds::format_type_list(&self.results)
        )
    }
}

/// Size limits of a table or memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Limits {
    /// Initial size
    pub min: u32,
    /// Optional maximum size
    pub max: Option<u32>,
}

impl Limits {
    /// Create limits
    #[must_use]
    pub const fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Check that the minimum does not exceed the maximum
    pub fn validate(&self) -> Result<()> {
        match self.max {
            Some(max) if self.min > max => Err(Error::validation(
                codes::INVALID_LIMITS,
                "size minimum must not be greater than maximum",
            )),
            _ => Ok(()),
        }
    }
}

/// Table declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TableType {
    /// The type of elements stored in the table
    pub element_type: RefType,
    /// The size limits of the table
    pub limits:       Limits,
}

impl TableType {
    /// Creates a new `TableType` with a specific element type and limits.
    #[must_use]
    pub const fn new(element_type: RefType, limits: Limits) -> Self {
        Self {
            element_type,
            limits,
        }
    }
}

/// Maximum number of 64 KiB pages of a 32-bit memory
pub const MAX_MEMORY_PAGES: u32 = 65536;

/// Memory declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MemoryType {
    /// Size limits in pages
    pub limits: Limits,
}

impl MemoryType {
    /// Create a memory type
    #[must_use]
    pub const fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// Check the page limits against the 32-bit address space
    pub fn validate(&self) -> Result<()> {
        if self.limits.min > MAX_MEMORY_PAGES {
            return Err(Error::validation(
                codes::INVALID_LIMITS,
                alloc::format!(
                    "initial pages ({}) must be <= ({MAX_MEMORY_PAGES})",
                    self.limits.min
                ),
            ));
        }
        if let Some(max) = self.limits.max {
            if max > MAX_MEMORY_PAGES {
                return Err(Error::validation(
                    codes::INVALID_LIMITS,
                    alloc::format!("max pages ({max}) must be <= ({MAX_MEMORY_PAGES})"),
                ));
            }
        }
        self.limits.validate()
    }
}

/// Global declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlobalType {
    /// Type of the global's value
    pub value_type: ValueType,
    /// Whether `global.set` is allowed
    pub mutable:    bool,
}

impl GlobalType {
    /// Create a global type
    #[must_use]
    pub const fn new(value_type: ValueType, mutable: bool) -> Self {
        Self {
            value_type,
            mutable,
        }
    }
}

/// Signature of a structured control instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockType {
    /// No parameters, no results
    #[default]
    Empty,
    /// No parameters, a single result
    Value(ValueType),
    /// Parameters and results of a function type in the type section
    TypeIndex(TypeIdx),
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_value_type_binary_roundtrip() {
        for ty in [
            ValueType::I32,
            ValueType::I64,
            ValueType::F32,
            ValueType::F64,
            ValueType::FuncRef,
            ValueType::ExternRef,
        ] {
            assert_eq!(ValueType::from_binary(ty.to_binary()).unwrap(), ty);
        }
        assert!(ValueType::from_binary(0x40).is_err());
    }

    #[test]
    fn test_value_type_names() {
        assert_eq!(ValueType::I32.to_string(), "i32");
        assert_eq!(ValueType::FuncRef.to_string(), "funcref");
        assert_eq!(RefType::ExternRef.to_string(), "externref");
    }

    #[test]
    fn test_ref_type_conversion() {
        assert_eq!(ValueType::from(RefType::FuncRef), ValueType::FuncRef);
        assert_eq!(RefType::try_from(ValueType::ExternRef).unwrap(), RefType::ExternRef);
        assert!(RefType::try_from(ValueType::I64).is_err());
    }

    #[test]
    fn test_func_type_display_and_equality() {
        let a = FuncType::new([ValueType::I32, ValueType::F32], [ValueType::I64]);
        let b = FuncType::new([ValueType::I32, ValueType::F32], [ValueType::I64]);
        let c = FuncType::new([ValueType::F32, ValueType::I32], [ValueType::I64]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), "[i32, f32] -> [i64]");
    }

    #[test]
    fn test_limits_validation() {
        assert!(Limits::new(1, Some(1)).validate().is_ok());
        assert!(Limits::new(0, None).validate().is_ok());
        assert_eq!(
            Limits::new(2, Some(1)).validate().unwrap_err().message(),
            "size minimum must not be greater than maximum"
        );
    }

    #[test]
    fn test_memory_page_limits() {
        assert!(MemoryType::new(Limits::new(1, Some(MAX_MEMORY_PAGES))).validate().is_ok());
        assert_eq!(
            MemoryType::new(Limits::new(65537, None)).validate().unwrap_err().message(),
            "initial pages (65537) must be <= (65536)"
        );
    }
}
