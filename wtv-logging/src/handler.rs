// WTV - wtv-logging
// Module: Log Handler Registry
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Host log handler registry.
//!
//! A [`LogRegistry`] holds at most one host handler and a minimum level.
//! Operations below the minimum are dropped. With the `log` feature every
//! accepted operation is also forwarded to the `log` facade.

use alloc::boxed::Box;
use core::fmt;

use crate::{level::LogLevel, operation::LogOperation};

/// Function type for handling log operations
pub type LogHandler = Box<dyn Fn(&LogOperation) + Send + Sync>;

/// Registry routing validator log operations to the host
pub struct LogRegistry {
    handler:   Option<LogHandler>,
    min_level: LogLevel,
}

impl LogRegistry {
    /// Registry without a handler, accepting every level
    #[must_use]
    pub fn new() -> Self {
        Self {
            handler:   None,
            min_level: LogLevel::Trace,
        }
    }

    /// Set the minimum level an operation needs to be delivered
    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Register a log handler, replacing any previous one
    pub fn register_log_handler<F>(&mut self, handler: F)
    where
        F: Fn(&LogOperation) + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
    }

    /// Check if a log handler is registered
    #[must_use]
    pub fn has_log_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Minimum delivered level
    #[must_use]
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Whether an operation of `level` would be delivered
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Handle a log operation
    pub fn handle_log(&self, operation: &LogOperation) {
        if !self.enabled(operation.level) {
            return;
        }

        #[cfg(feature = "log")]
        match operation.function_index {
            Some(index) => log::log!(
                target: "wtv::validation",
                operation.level.to_log_level(),
                "func[{index}]: {}",
                operation.message
            ),
            None => log::log!(
                target: "wtv::validation",
                operation.level.to_log_level(),
                "{}",
                operation.message
            ),
        }

        if let Some(handler) = &self.handler {
            handler(operation);
        }
    }
}

impl Default for LogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRegistry")
            .field("has_handler", &self.has_log_handler())
            .field("min_level", &self.min_level)
            .finish()
    }
}
