// WTV - wtv-error
// Module: Error Macros
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Formatting macros for errors whose message is built at runtime.

/// Create a validation error with a formatted message
///
/// # Examples
///
/// ```
/// use wtv_error::{codes, validation_error};
///
/// let error = validation_error!(codes::CONTROL_FRAME_MISMATCH, "unexpected {}", "else");
/// assert_eq!(error.message(), "unexpected else");
/// ```
#[macro_export]
macro_rules! validation_error {
    ($code:expr, $($arg:tt)*) => {
        $crate::Error::validation($code, $crate::__private::format!($($arg)*))
    };
}

