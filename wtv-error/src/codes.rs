// WTV - wtv-error
// Module: WTV Error Codes
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for wtv

// Runtime error codes (2000-2099)
/// Runtime operand stack underflow
pub const STACK_UNDERFLOW: u16 = 2000;
/// Runtime operand has the wrong type
pub const INVALID_TYPE: u16 = 2001;
/// Table element access out of bounds (trap)
pub const TABLE_ACCESS_OUT_OF_BOUNDS: u16 = 2002;
/// Table does not exist in the store
pub const TABLE_NOT_FOUND: u16 = 2003;
/// Element segment does not exist in the store
pub const ELEMENT_SEGMENT_NOT_FOUND: u16 = 2004;
/// Value stored into a table does not match its element type
pub const TABLE_TYPE_MISMATCH: u16 = 2005;

// Validation error codes (4000-4099)
/// Generic validation failure
pub const VALIDATION_ERROR: u16 = 4000;
/// Operand types do not match the instruction signature
pub const TYPE_MISMATCH: u16 = 4001;
/// Local index out of range
pub const INVALID_LOCAL_INDEX: u16 = 4002;
/// Function, global, table, type, memory or segment index out of range
pub const INVALID_INDEX: u16 = 4003;
/// Branch depth exceeds the enclosing control frames
pub const INVALID_BRANCH_DEPTH: u16 = 4004;
/// `global.set` on an immutable global
pub const IMMUTABLE_GLOBAL: u16 = 4005;
/// Memory access alignment larger than natural alignment
pub const INVALID_ALIGNMENT: u16 = 4006;
/// Table or memory limits are malformed
pub const INVALID_LIMITS: u16 = 4007;
/// `else` or `end` does not match the open control frame
pub const CONTROL_FRAME_MISMATCH: u16 = 4008;
/// Function body ended without closing every frame, or continued after it
pub const UNBALANCED_FUNCTION_BODY: u16 = 4009;
/// Operand stack grew past the configured limit
pub const OPERAND_STACK_OVERFLOW: u16 = 4010;
/// Control frames nested past the configured limit
pub const CONTROL_STACK_OVERFLOW: u16 = 4011;
/// Declared locals exceed the configured limit
pub const TOO_MANY_LOCALS: u16 = 4012;
/// Table element type is not a reference type
pub const INVALID_ELEMENT_TYPE: u16 = 4013;
