// WTV - wtv-validator
// Module: Operand Stack and Control Frames
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Abstract operand stack and control frame tracker.
//!
//! The stack holds operand *types*, not values. Every structured control
//! instruction opens a [`ControlFrame`] that records the stack height at
//! entry; operands below that height belong to enclosing frames and can
//! never be popped from inside. Once a frame turns unreachable its part of
//! the stack is discarded and pops at the frame height produce
//! [`Operand::Unknown`], which matches any expected type.

use crate::{
    config::{DEFAULT_MAX_CONTROL_DEPTH, DEFAULT_MAX_OPERAND_STACK},
    prelude::*,
};

/// One entry of the abstract operand stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// An operand of a known type
    Concrete(ValueType),
    /// An operand produced by stack-polymorphic (unreachable) code
    Unknown,
}

impl Operand {
    /// Whether this operand can stand where `expected` is required
    #[must_use]
    pub fn matches(self, expected: ValueType) -> bool {
        match self {
            Operand::Concrete(ty) => ty == expected,
            Operand::Unknown => true,
        }
    }

    /// The concrete type, if known
    #[must_use]
    pub const fn value_type(self) -> Option<ValueType> {
        match self {
            Operand::Concrete(ty) => Some(ty),
            Operand::Unknown => None,
        }
    }
}

impl From<ValueType> for Operand {
    fn from(ty: ValueType) -> Self {
        Operand::Concrete(ty)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Concrete(ty) => fmt::Display::fmt(ty, f),
            Operand::Unknown => f.write_str("any"),
        }
    }
}

/// Kind of control structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// The function body itself
    Function,
    /// Block control structure
    Block,
    /// Loop control structure
    Loop,
    /// If control structure, before any `else`
    If,
    /// Else branch of an if
    Else,
}

impl FrameKind {
    /// Text-format keyword of the construct
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            FrameKind::Function => "function",
            FrameKind::Block => "block",
            FrameKind::Loop => "loop",
            FrameKind::If => "if",
            FrameKind::Else => "else",
        }
    }
}

/// Control frame for tracking control flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlFrame {
    /// Type of control structure
    pub kind:        FrameKind,
    /// Types the construct consumes on entry
    pub params:      Vec<ValueType>,
    /// Types the construct leaves on exit
    pub results:     Vec<ValueType>,
    /// Stack height when entering frame
    pub height:      usize,
    /// Whether the rest of this frame is unreachable
    pub unreachable: bool,
}

impl ControlFrame {
    /// Types a branch to this frame must supply
    ///
    /// A branch to a loop jumps back to its start and so carries the loop's
    /// parameters. Every other construct is exited forward.
    #[must_use]
    pub fn label_types(&self) -> &[ValueType] {
        match self.kind {
            FrameKind::Loop => &self.params,
            FrameKind::Function | FrameKind::Block | FrameKind::If | FrameKind::Else => {
                &self.results
            }
        }
    }
}

/// Operand stack plus control frame stack of one function body
#[derive(Debug, Clone)]
pub struct OperandStack {
    operands:     Vec<Operand>,
    frames:       Vec<ControlFrame>,
    max_operands: usize,
    max_frames:   usize,
}

impl Default for OperandStack {
    fn default() -> Self {
        Self::new()
    }
}

impl OperandStack {
    /// Empty stack with the default limits
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_OPERAND_STACK, DEFAULT_MAX_CONTROL_DEPTH)
    }

    /// Empty stack with explicit limits
    #[must_use]
    pub fn with_limits(max_operands: usize, max_frames: usize) -> Self {
        Self {
            operands: Vec::new(),
            frames: Vec::new(),
            max_operands,
            max_frames,
        }
    }

    /// Total number of operands, across all frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.operands.len()
    }

    /// Whether no operand is on the stack
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }

    /// Number of open control frames
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The innermost open frame
    pub fn current_frame(&self) -> Result<&ControlFrame> {
        self.frames.last().ok_or_else(no_open_frame)
    }

    /// Whether the innermost frame is unreachable
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        self.frames.last().is_some_and(|frame| frame.unreachable)
    }

    /// Operands above the innermost frame's height
    #[must_use]
    pub fn available(&self) -> usize {
        self.operands.len() - self.floor()
    }

    fn floor(&self) -> usize {
        self.frames.last().map_or(0, |frame| frame.height)
    }

    /// Push an operand of a known type
    pub fn push(&mut self, ty: ValueType) -> Result<()> {
        self.push_operand(Operand::Concrete(ty))
    }

    /// Push an operand
    pub fn push_operand(&mut self, operand: Operand) -> Result<()> {
        self.reserve(1)?;
        self.operands.push(operand);
        Ok(())
    }

    /// Push a sequence of types, first element deepest
    pub fn push_all(&mut self, types: &[ValueType]) -> Result<()> {
        self.reserve(types.len())?;
        self.operands.extend(types.iter().copied().map(Operand::Concrete));
        Ok(())
    }

    fn reserve(&self, additional: usize) -> Result<()> {
        if self.operands.len() + additional > self.max_operands {
            return Err(kinds::limit_exceeded(
                codes::OPERAND_STACK_OVERFLOW,
                "operand stack overflow",
                self.max_operands,
            ));
        }
        Ok(())
    }

    /// The operand `depth` entries below the top, if it belongs to the
    /// innermost frame
    #[must_use]
    pub fn peek_operand(&self, depth: usize) -> Option<Operand> {
        let available = self.available();
        (depth < available).then(|| self.operands[self.operands.len() - 1 - depth])
    }

    /// The top `count` operands of the innermost frame, fewer if the frame
    /// holds fewer
    fn window(&self, count: usize) -> &[Operand] {
        let start = self.operands.len().saturating_sub(count).max(self.floor());
        &self.operands[start..]
    }

    fn mismatch(&self, expected: &[ValueType], desc: &str) -> Error {
        kinds::type_mismatch(desc, expected, self.window(expected.len().max(1)))
    }

    /// Check that the top of the stack matches `expected` without popping
    ///
    /// `expected` is listed bottom-most first. In an unreachable frame,
    /// missing operands below the top count as [`Operand::Unknown`].
    pub fn peek_sequence(&self, expected: &[ValueType], desc: &str) -> Result<()> {
        let floor = self.floor();
        let unreachable = self.is_unreachable();
        let frame_operands = &self.operands[floor..];

        for (i, ty) in expected.iter().rev().enumerate() {
            let ok = match frame_operands.len().checked_sub(i + 1) {
                Some(pos) => frame_operands[pos].matches(*ty),
                None => unreachable,
            };
            if !ok {
                return Err(self.mismatch(expected, desc));
            }
        }
        Ok(())
    }

    /// Check the top of the stack against `expected` and pop it
    pub fn pop_sequence(&mut self, expected: &[ValueType], desc: &str) -> Result<()> {
        self.peek_sequence(expected, desc)?;
        let count = expected.len().min(self.available());
        self.operands.truncate(self.operands.len() - count);
        Ok(())
    }

    /// Pop one operand of the expected type
    pub fn pop(&mut self, expected: ValueType, desc: &str) -> Result<Operand> {
        self.peek_sequence(&[expected], desc)?;
        Ok(self.take_top())
    }

    /// Pop one operand of any type
    pub fn pop_any(&mut self, desc: &str) -> Result<Operand> {
        if self.available() == 0 && !self.is_unreachable() {
            return Err(kinds::type_mismatch(desc, ["any"], core::iter::empty::<Operand>()));
        }
        Ok(self.take_top())
    }

    /// Pop one operand of a reference type
    pub fn pop_reference(&mut self, desc: &str) -> Result<Operand> {
        match self.peek_operand(0) {
            Some(Operand::Concrete(ty)) if ty.is_ref() => Ok(self.take_top()),
            Some(Operand::Unknown) => Ok(self.take_top()),
            None if self.is_unreachable() => Ok(Operand::Unknown),
            Some(Operand::Concrete(_)) | None => {
                Err(kinds::type_mismatch(desc, ["reference"], self.window(1)))
            }
        }
    }

    /// Pop the top operand of the innermost frame, `Unknown` at its floor
    fn take_top(&mut self) -> Operand {
        if self.available() == 0 {
            return Operand::Unknown;
        }
        self.operands.pop().unwrap_or(Operand::Unknown)
    }

    /// Drop the innermost frame's operands and make the rest of it
    /// stack-polymorphic
    pub fn mark_unreachable(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.unreachable = true;
            self.operands.truncate(frame.height);
        }
    }

    /// Open a control frame and push its parameters
    pub fn push_frame(
        &mut self,
        kind: FrameKind,
        params: Vec<ValueType>,
        results: Vec<ValueType>,
    ) -> Result<()> {
        if self.frames.len() >= self.max_frames {
            return Err(kinds::limit_exceeded(
                codes::CONTROL_STACK_OVERFLOW,
                "control stack overflow",
                self.max_frames,
            ));
        }
        let height = self.operands.len();
        self.push_all(&params)?;
        log::trace!(
            "push {} frame at height {height}: {} -> {}",
            kind.name(),
            format_type_list(&params),
            format_type_list(&results)
        );
        self.frames.push(ControlFrame {
            kind,
            params,
            results,
            height,
            unreachable: false,
        });
        Ok(())
    }

    /// Close the innermost frame
    ///
    /// The operands above the frame's height must be exactly its results.
    /// The caller pushes the results into the enclosing frame.
    pub fn pop_frame(&mut self, desc: &str) -> Result<ControlFrame> {
        let frame = self.current_frame()?;
        let above = &self.operands[frame.height..];
        let results = &frame.results;

        let shape_ok = match above.len().cmp(&results.len()) {
            core::cmp::Ordering::Greater => false,
            core::cmp::Ordering::Less => frame.unreachable,
            core::cmp::Ordering::Equal => true,
        };
        let types_ok = above
            .iter()
            .rev()
            .zip(results.iter().rev())
            .all(|(operand, ty)| operand.matches(*ty));
        if !(shape_ok && types_ok) {
            return Err(kinds::type_mismatch(desc, results, above));
        }

        let height = frame.height;
        self.operands.truncate(height);
        let frame = self.frames.pop().ok_or_else(no_open_frame)?;
        log::trace!("pop {} frame at height {height}", frame.kind.name());
        Ok(frame)
    }

    /// Label types of the frame `depth` levels out from the innermost one
    pub fn label_types(&self, depth: u32) -> Result<Vec<ValueType>> {
        let open = self.frames.len();
        usize::try_from(depth)
            .ok()
            .filter(|&depth| depth < open)
            .map(|depth| self.frames[open - 1 - depth].label_types().to_vec())
            .ok_or_else(|| kinds::invalid_depth(depth, open.saturating_sub(1)))
    }
}

fn no_open_frame() -> Error {
    kinds::control_frame_mismatch("unexpected instruction after end of function")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function_stack(results: &[ValueType]) -> OperandStack {
        let mut stack = OperandStack::new();
        stack.push_frame(FrameKind::Function, vec![], results.to_vec()).unwrap();
        stack
    }

    #[test]
    fn test_pop_on_empty_frame_reports_empty_got() {
        let mut stack = function_stack(&[]);
        let err = stack.pop(ValueType::I32, "local.set").unwrap_err();
        assert_eq!(err.message(), "type mismatch in local.set, expected [i32] but got []");
    }

    #[test]
    fn test_pop_sequence_reports_whole_expected_and_window() {
        let mut stack = function_stack(&[]);
        stack.push(ValueType::I32).unwrap();
        stack.push(ValueType::ExternRef).unwrap();
        let err = stack
            .pop_sequence(&[ValueType::I32, ValueType::FuncRef], "table.set")
            .unwrap_err();
        assert_eq!(
            err.message(),
            "type mismatch in table.set, expected [i32, funcref] but got [i32, externref]"
        );
        // Failed checks leave the stack untouched
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_window_is_shorter_when_stack_is_short() {
        let mut stack = function_stack(&[]);
        stack.push(ValueType::F32).unwrap();
        let err = stack.pop_sequence(&[ValueType::I32, ValueType::I32], "i32.add").unwrap_err();
        assert_eq!(err.message(), "type mismatch in i32.add, expected [i32, i32] but got [f32]");
    }

    #[test]
    fn test_window_stops_at_frame_height() {
        let mut stack = function_stack(&[]);
        stack.push(ValueType::I64).unwrap();
        stack.push_frame(FrameKind::Block, vec![], vec![]).unwrap();
        let err = stack.pop(ValueType::I64, "drop").unwrap_err();
        assert_eq!(err.message(), "type mismatch in drop, expected [i64] but got []");
    }

    #[test]
    fn test_unreachable_frame_yields_unknown() {
        let mut stack = function_stack(&[ValueType::I32]);
        stack.push(ValueType::F64).unwrap();
        stack.mark_unreachable();
        assert_eq!(stack.len(), 0);
        assert_eq!(stack.pop(ValueType::I32, "i32.eqz").unwrap(), Operand::Unknown);
        assert_eq!(stack.pop_any("drop").unwrap(), Operand::Unknown);
        assert_eq!(stack.len(), 0);
        stack.pop_frame("implicit return").unwrap();
    }

    #[test]
    fn test_unreachable_still_checks_concrete_operands() {
        let mut stack = function_stack(&[]);
        stack.mark_unreachable();
        stack.push(ValueType::F32).unwrap();
        let err = stack.pop_sequence(&[ValueType::I32, ValueType::I32], "i32.add").unwrap_err();
        assert_eq!(err.message(), "type mismatch in i32.add, expected [i32, i32] but got [f32]");
    }

    #[test]
    fn test_pop_frame_requires_exact_results() {
        let mut stack = function_stack(&[ValueType::I32]);
        stack.push(ValueType::I32).unwrap();
        stack.push(ValueType::I32).unwrap();
        let err = stack.pop_frame("implicit return").unwrap_err();
        assert_eq!(
            err.message(),
            "type mismatch in implicit return, expected [i32] but got [i32, i32]"
        );

        let mut stack = function_stack(&[ValueType::I32]);
        let err = stack.pop_frame("implicit return").unwrap_err();
        assert_eq!(err.message(), "type mismatch in implicit return, expected [i32] but got []");
    }

    #[test]
    fn test_pop_frame_in_unreachable_accepts_partial_results() {
        let mut stack = function_stack(&[ValueType::I32, ValueType::I64]);
        stack.mark_unreachable();
        stack.push(ValueType::I64).unwrap();
        let frame = stack.pop_frame("implicit return").unwrap();
        assert_eq!(frame.kind, FrameKind::Function);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_push_frame_pushes_params() {
        let mut stack = function_stack(&[]);
        stack
            .push_frame(FrameKind::Loop, vec![ValueType::I32], vec![ValueType::F32])
            .unwrap();
        assert_eq!(stack.available(), 1);
        assert_eq!(stack.label_types(0).unwrap(), [ValueType::I32]);
        assert!(stack.label_types(1).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_label_depth() {
        let mut stack = function_stack(&[]);
        stack.push_frame(FrameKind::Block, vec![], vec![]).unwrap();
        assert_eq!(stack.label_types(3).unwrap_err().message(), "invalid depth: 3 (max 1)");
    }

    #[test]
    fn test_pop_reference() {
        let mut stack = function_stack(&[]);
        stack.push(ValueType::ExternRef).unwrap();
        assert_eq!(
            stack.pop_reference("ref.is_null").unwrap(),
            Operand::Concrete(ValueType::ExternRef)
        );
        stack.push(ValueType::I32).unwrap();
        assert_eq!(
            stack.pop_reference("ref.is_null").unwrap_err().message(),
            "type mismatch in ref.is_null, expected [reference] but got [i32]"
        );
    }

    #[test]
    fn test_pop_any_on_empty() {
        let mut stack = function_stack(&[]);
        assert_eq!(
            stack.pop_any("drop").unwrap_err().message(),
            "type mismatch in drop, expected [any] but got []"
        );
    }

    #[test]
    fn test_limits() {
        let mut stack = OperandStack::with_limits(1, 1);
        stack.push_frame(FrameKind::Function, vec![], vec![]).unwrap();
        stack.push(ValueType::I32).unwrap();
        assert_eq!(
            stack.push(ValueType::I32).unwrap_err().message(),
            "operand stack overflow (max 1)"
        );
        assert_eq!(
            stack.push_frame(FrameKind::Block, vec![], vec![]).unwrap_err().message(),
            "control stack overflow (max 1)"
        );
    }

    #[test]
    fn test_operand_display() {
        assert_eq!(format_type_list([Operand::Unknown, ValueType::I32.into()]), "[any, i32]");
    }
}
