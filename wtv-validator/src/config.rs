// WTV - wtv-validator
// Module: Validation Configuration
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Limits and switches for a validation run.

/// Default maximum operand stack depth per function
pub const DEFAULT_MAX_OPERAND_STACK: usize = 65_536;
/// Default maximum control frame nesting per function
pub const DEFAULT_MAX_CONTROL_DEPTH: usize = 1_024;
/// Default maximum number of local slots (parameters included)
pub const DEFAULT_MAX_LOCALS: u32 = 50_000;

/// Configuration of a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Maximum operand stack depth per function
    pub max_operand_stack: usize,
    /// Maximum control frame nesting, the function frame included
    pub max_control_depth: usize,
    /// Maximum number of local slots per function
    pub max_locals:        u32,
    /// Validate function bodies on scoped threads (requires `std`)
    pub parallel:          bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_operand_stack: DEFAULT_MAX_OPERAND_STACK,
            max_control_depth: DEFAULT_MAX_CONTROL_DEPTH,
            max_locals:        DEFAULT_MAX_LOCALS,
            parallel:          false,
        }
    }
}

impl ValidationConfig {
    /// Create a configuration with default limits
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum operand stack depth
    #[must_use]
    pub const fn with_max_operand_stack(mut self, max: usize) -> Self {
        self.max_operand_stack = max;
        self
    }

    /// Set the maximum control nesting depth
    #[must_use]
    pub const fn with_max_control_depth(mut self, max: usize) -> Self {
        self.max_control_depth = max;
        self
    }

    /// Set the maximum number of local slots
    #[must_use]
    pub const fn with_max_locals(mut self, max: u32) -> Self {
        self.max_locals = max;
        self
    }

    /// Enable or disable parallel function validation
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
