// WTV - wtv-error
// Module: Located Diagnostics
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Located diagnostics.
//!
//! A [`Diagnostic`] is the user-facing form of an [`Error`]: the low-level
//! check that failed, the byte offset of the instruction it failed on, and
//! the chain of callbacks that propagated the failure. Rendering reproduces
//! the layered report of a binary reader driving a validator:
//!
//! ```text
//! 0000025: error: type mismatch in local.set, expected [i32] but got []
//! 0000025: error: OnLocalSetExpr callback failed
//! ```
//!
//! Runtime traps carry no offset and no callbacks and render as the bare
//! trap message.

use alloc::{
    borrow::Cow,
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use crate::Error;

/// One rendered stage of a diagnostic chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEntry {
    /// Name of the stage: `check` for the failing check, otherwise the
    /// callback that propagated the failure
    pub stage:   Cow<'static, str>,
    /// Message reported by that stage
    pub message: String,
}

/// A located, chained error report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    offset:    Option<u64>,
    error:     Error,
    callbacks: Vec<Cow<'static, str>>,
}

impl Diagnostic {
    /// Diagnostic for an error detected at the given byte offset
    #[must_use]
    pub fn at(offset: u64, error: Error) -> Self {
        Self {
            offset: Some(offset),
            error,
            callbacks: Vec::new(),
        }
    }

    /// Diagnostic for an error with no instruction location (declarations)
    #[must_use]
    pub fn unlocated(error: Error) -> Self {
        Self {
            offset: None,
            error,
            callbacks: Vec::new(),
        }
    }

    /// Diagnostic for a runtime trap
    #[must_use]
    pub fn trap(error: Error) -> Self {
        Self::unlocated(error)
    }

    /// Append the name of a callback that propagated this failure
    #[must_use]
    pub fn with_callback(mut self, callback: impl Into<Cow<'static, str>>) -> Self {
        self.callbacks.push(callback.into());
        self
    }

    /// Byte offset of the failing instruction, if any
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// The underlying error
    #[must_use]
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// The primary message
    #[must_use]
    pub fn message(&self) -> &str {
        self.error.message()
    }

    /// Names of the callbacks the failure went through, innermost first
    pub fn callbacks(&self) -> impl Iterator<Item = &str> {
        self.callbacks.iter().map(AsRef::as_ref)
    }

    /// The ordered (stage, message) chain, failing check first
    #[must_use]
    pub fn entries(&self) -> Vec<DiagnosticEntry> {
        let mut entries = Vec::with_capacity(1 + self.callbacks.len());
        entries.push(DiagnosticEntry {
            stage:   Cow::Borrowed("check"),
            message: self.error.message().to_string(),
        });
        for callback in &self.callbacks {
            entries.push(DiagnosticEntry {
                stage:   callback.clone(),
                message: format!("{callback} callback failed"),
            });
        }
        entries
    }

    /// Rendered report lines
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|entry| match self.offset {
                Some(offset) => format!("{offset:07x}: error: {}", entry.message),
                None if self.error.is_trap() => entry.message,
                None => format!("error: {}", entry.message),
            })
            .collect()
    }
}

impl From<Error> for Diagnostic {
    fn from(error: Error) -> Self {
        Self::unlocated(error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines().iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Diagnostic {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
