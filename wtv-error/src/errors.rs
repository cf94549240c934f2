// WTV - wtv-error
// Module: WTV Error Types
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

use alloc::borrow::Cow;
use core::fmt;

use crate::codes;

/// `Error` categories for WTV operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Static validation errors (the module is rejected)
    Validation  = 5,
    /// Type errors outside of validation (runtime operand types)
    Type        = 6,
    /// Runtime errors (general)
    Runtime     = 7,
    /// Resource errors (tables, segments missing from a store)
    Resource    = 3,
    /// Capacity errors (configured limits)
    Capacity    = 12,
    /// WebAssembly traps
    RuntimeTrap = 13,
}

/// WTV `Error` type
///
/// A categorized error with a numeric code and a message. The message is the
/// exact text reported to users; diagnostics render it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Error {
    /// `Error` category
    pub category: ErrorCategory,
    /// `Error` code
    pub code:     u16,
    /// `Error` message
    pub message:  Cow<'static, str>,
}

impl Error {
    /// Operand stack underflow at runtime
    pub const STACK_UNDERFLOW: Self =
        Self::new_static(ErrorCategory::Runtime, codes::STACK_UNDERFLOW, "Stack underflow");

    /// Create a new error.
    pub fn new(category: ErrorCategory, code: u16, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    /// Create a new error from a static message, usable in constants.
    #[must_use]
    pub const fn new_static(category: ErrorCategory, code: u16, message: &'static str) -> Self {
        Self {
            category,
            code,
            message: Cow::Borrowed(message),
        }
    }

    /// Create a validation error with the given code
    pub fn validation(code: u16, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCategory::Validation, code, message)
    }

    /// Create a runtime trap error with the given code
    pub fn trap(code: u16, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCategory::RuntimeTrap, code, message)
    }

    /// Create a runtime type error
    pub fn invalid_type(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCategory::Type, codes::INVALID_TYPE, message)
    }

    /// Create a capacity error
    pub fn capacity(code: u16, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCategory::Capacity, code, message)
    }

    /// The message text without category or code decoration
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a validation error
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self.category, ErrorCategory::Validation | ErrorCategory::Capacity)
    }

    /// Check if this is a runtime trap
    #[must_use]
    pub fn is_trap(&self) -> bool {
        self.category == ErrorCategory::RuntimeTrap
    }

    /// Check if this is a type error
    #[must_use]
    pub fn is_type_error(&self) -> bool {
        self.category == ErrorCategory::Type
    }

    /// Check if this is a resource error
    #[must_use]
    pub fn is_resource_error(&self) -> bool {
        self.category == ErrorCategory::Resource
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}][E{:04X}] {}", self.category, self.code, self.message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
