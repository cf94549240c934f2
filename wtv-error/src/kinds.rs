//! Constructors for the errors the validator and the table runtime report.
//!
//! Every function here fixes the exact wording of one diagnostic, so the
//! text stays identical wherever the condition is detected.

use alloc::{format, string::String};
use core::fmt::{Display, Write};

use crate::{codes, Error, ErrorCategory};

/// Render a list of types as `[a, b, c]`.
pub fn format_type_list<T: Display>(types: impl IntoIterator<Item = T>) -> String {
    let mut out = String::from("[");
    for (i, ty) in types.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{ty}");
    }
    out.push(']');
    out
}

/// `type mismatch in <desc>, expected [..] but got [..]`
pub fn type_mismatch<E: Display, G: Display>(
    desc: &str,
    expected: impl IntoIterator<Item = E>,
    got: impl IntoIterator<Item = G>,
) -> Error {
    Error::validation(
        codes::TYPE_MISMATCH,
        format!(
            "type mismatch in {desc}, expected {} but got {}",
            format_type_list(expected),
            format_type_list(got)
        ),
    )
}

/// `local variable out of range (max N)`, N being the number of local slots
#[must_use]
pub fn local_out_of_range(max: u32) -> Error {
    Error::validation(
        codes::INVALID_LOCAL_INDEX,
        format!("local variable out of range (max {max})"),
    )
}

/// `<space> variable out of range: I (max N)`
#[must_use]
pub fn index_out_of_range(space: &str, index: u32, max: u32) -> Error {
    Error::validation(
        codes::INVALID_INDEX,
        format!("{space} variable out of range: {index} (max {max})"),
    )
}

/// `invalid depth: D (max M)`
#[must_use]
pub fn invalid_depth(depth: u32, max: usize) -> Error {
    Error::validation(
        codes::INVALID_BRANCH_DEPTH,
        format!("invalid depth: {depth} (max {max})"),
    )
}

/// `can't global.set on immutable global at index I.`
#[must_use]
pub fn immutable_global(index: u32) -> Error {
    Error::validation(
        codes::IMMUTABLE_GLOBAL,
        format!("can't global.set on immutable global at index {index}."),
    )
}

/// `alignment must not be larger than natural alignment (N)`
#[must_use]
pub fn invalid_alignment(natural: u32) -> Error {
    Error::validation(
        codes::INVALID_ALIGNMENT,
        format!("alignment must not be larger than natural alignment ({natural})"),
    )
}

/// Control structure mismatch, e.g. `else expected if`
pub fn control_frame_mismatch(message: impl Into<String>) -> Error {
    Error::validation(codes::CONTROL_FRAME_MISMATCH, message.into())
}

/// Capacity limit crossed during validation
#[must_use]
pub fn limit_exceeded(code: u16, what: &str, max: usize) -> Error {
    Error::capacity(code, format!("{what} (max {max})"))
}

/// `out of bounds table access: <op> at <index> >= max value <size>`
///
/// `index` is the raw operand reinterpreted as unsigned.
#[must_use]
pub fn table_access_out_of_bounds(op: &str, index: u32, size: u32) -> Error {
    Error::trap(
        codes::TABLE_ACCESS_OUT_OF_BOUNDS,
        format!("out of bounds table access: {op} at {index} >= max value {size}"),
    )
}

/// `out of bounds table access: <op> out of bounds` for range operations
#[must_use]
pub fn table_range_out_of_bounds(op: &str) -> Error {
    Error::trap(
        codes::TABLE_ACCESS_OUT_OF_BOUNDS,
        format!("out of bounds table access: {op} out of bounds"),
    )
}

/// Table missing from a runtime store
#[must_use]
pub fn table_not_found(index: u32) -> Error {
    Error::new(
        ErrorCategory::Resource,
        codes::TABLE_NOT_FOUND,
        format!("unknown table {index}"),
    )
}

/// Element segment missing from a runtime store
#[must_use]
pub fn element_segment_not_found(index: u32) -> Error {
    Error::new(
        ErrorCategory::Resource,
        codes::ELEMENT_SEGMENT_NOT_FOUND,
        format!("unknown elem segment {index}"),
    )
}
