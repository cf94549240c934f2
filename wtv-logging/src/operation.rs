// WTV - wtv-logging
// Module: Log Operations
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! A single log record emitted while validating a module.

use alloc::string::String;

use crate::level::LogLevel;

/// Log operation produced by the validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOperation {
    /// Log level
    pub level:          LogLevel,
    /// Log message
    pub message:        String,
    /// Index of the function the message is about, if any
    pub function_index: Option<u32>,
}

impl LogOperation {
    /// Create a new log operation
    #[must_use]
    pub const fn new(level: LogLevel, message: String) -> Self {
        Self {
            level,
            message,
            function_index: None,
        }
    }

    /// Create a new log operation about one function
    pub fn for_function(level: LogLevel, function_index: u32, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            function_index: Some(function_index),
        }
    }
}
