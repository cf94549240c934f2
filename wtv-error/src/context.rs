// WTV - wtv-error
// Module: WTV Error Context
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error context utilities.
//!
//! Lifts a low-level [`Error`] into a located [`Diagnostic`] as it crosses
//! the per-instruction callback boundary.

use alloc::borrow::Cow;

use crate::{Diagnostic, Error};

/// Extension trait attaching location and callback context to results
pub trait ResultExt<T> {
    /// Convert an error into a diagnostic located at `offset` and failed by
    /// `callback`
    fn at_callback(
        self,
        offset: u64,
        callback: impl Into<Cow<'static, str>>,
    ) -> core::result::Result<T, Diagnostic>;

    /// Convert an error into an unlocated runtime trap diagnostic
    fn as_trap(self) -> core::result::Result<T, Diagnostic>;
}

impl<T> ResultExt<T> for core::result::Result<T, Error> {
    fn at_callback(
        self,
        offset: u64,
        callback: impl Into<Cow<'static, str>>,
    ) -> core::result::Result<T, Diagnostic> {
        self.map_err(|error| Diagnostic::at(offset, error).with_callback(callback))
    }

    fn as_trap(self) -> core::result::Result<T, Diagnostic> {
        self.map_err(Diagnostic::trap)
    }
}
