// WTV - wtv-validator
// Module: Function Body Validator
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Type checking of one function body.
//!
//! [`FunctionValidator`] is fed one decoded instruction at a time and applies
//! that instruction's stack effect to an [`OperandStack`]. The first
//! violation is returned as a [`Diagnostic`] located at the instruction and
//! chained to the reader callback that dispatched it.

use crate::{
    config::ValidationConfig,
    instructions::Instruction,
    locals::LocalSpace,
    module::{FunctionBody, Module},
    prelude::*,
    stack::{FrameKind, Operand, OperandStack},
};

/// Callback reported for the final `end` of a function body
pub const END_FUNCTION_BODY: &str = "EndFunctionBody";

/// Validator state for one function body
#[derive(Debug, Clone)]
pub struct FunctionValidator<'m> {
    module:  &'m Module,
    results: Vec<ValueType>,
    locals:  LocalSpace,
    stack:   OperandStack,
}

impl<'m> FunctionValidator<'m> {
    /// Start validating a body of type `func_type` declaring `locals`
    ///
    /// # Errors
    ///
    /// Fails if the local declarations exceed the configured limit.
    pub fn new(
        module: &'m Module,
        func_type: &FuncType,
        locals: &[(u32, ValueType)],
        config: &ValidationConfig,
    ) -> Result<Self> {
        let locals = LocalSpace::new(&func_type.params, locals, config.max_locals)?;
        let mut stack =
            OperandStack::with_limits(config.max_operand_stack, config.max_control_depth);
        stack.push_frame(FrameKind::Function, Vec::new(), func_type.results.clone())?;
        Ok(Self {
            module,
            results: func_type.results.clone(),
            locals,
            stack,
        })
    }

    /// Whether the final `end` has been validated
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.stack.depth() == 0
    }

    /// The abstract operand stack
    #[must_use]
    pub fn stack(&self) -> &OperandStack {
        &self.stack
    }

    /// The function's local index space
    #[must_use]
    pub fn locals(&self) -> &LocalSpace {
        &self.locals
    }

    /// Validate the instruction found at `offset`
    pub fn validate(
        &mut self,
        offset: u64,
        instruction: &Instruction,
    ) -> core::result::Result<(), Diagnostic> {
        let callback = if *instruction == Instruction::End && self.stack.depth() == 1 {
            END_FUNCTION_BODY
        } else {
            instruction.callback()
        };
        self.check(instruction).at_callback(offset, callback)
    }

    /// Confirm the body was closed by its final `end`
    pub fn finish(&self, end_offset: u64) -> core::result::Result<(), Diagnostic> {
        if self.is_finished() {
            return Ok(());
        }
        Err(Diagnostic::at(
            end_offset,
            kinds::control_frame_mismatch("function body must end with END opcode"),
        ))
    }

    /// Apply the stack effect of one instruction
    pub fn check(&mut self, instruction: &Instruction) -> Result<()> {
        let module = self.module;
        let stack = &mut self.stack;
        stack.current_frame()?;

        match instruction {
            Instruction::Unreachable => stack.mark_unreachable(),
            Instruction::Nop => {}
            Instruction::Block(bt) => {
                let (params, results) = block_signature(module, *bt)?;
                stack.pop_sequence(&params, "block")?;
                stack.push_frame(FrameKind::Block, params, results)?;
            }
            Instruction::Loop(bt) => {
                let (params, results) = block_signature(module, *bt)?;
                stack.pop_sequence(&params, "loop")?;
                stack.push_frame(FrameKind::Loop, params, results)?;
            }
            Instruction::If(bt) => {
                let (params, results) = block_signature(module, *bt)?;
                stack.pop(ValueType::I32, "if")?;
                stack.pop_sequence(&params, "if")?;
                stack.push_frame(FrameKind::If, params, results)?;
            }
            Instruction::Else => {
                if stack.current_frame()?.kind != FrameKind::If {
                    return Err(kinds::control_frame_mismatch("else expected if"));
                }
                let frame = stack.pop_frame("if true branch")?;
                stack.push_frame(FrameKind::Else, frame.params, frame.results)?;
            }
            Instruction::End => self.end()?,
            Instruction::Br(depth) => {
                let types = stack.label_types(*depth)?;
                stack.pop_sequence(&types, "br")?;
                stack.mark_unreachable();
            }
            Instruction::BrIf(depth) => {
                stack.pop(ValueType::I32, "br_if")?;
                let types = stack.label_types(*depth)?;
                stack.pop_sequence(&types, "br_if")?;
                stack.push_all(&types)?;
            }
            Instruction::BrTable { labels, default } => {
                stack.pop(ValueType::I32, "br_table")?;
                let default_types = stack.label_types(*default)?;
                for label in labels {
                    let types = stack.label_types(*label)?;
                    if types.len() != default_types.len() {
                        return Err(validation_error!(
                            codes::TYPE_MISMATCH,
                            "br_table labels have inconsistent types: expected {}, got {}",
                            format_type_list(&default_types),
                            format_type_list(&types)
                        ));
                    }
                    stack.peek_sequence(&types, "br_table")?;
                }
                stack.peek_sequence(&default_types, "br_table")?;
                stack.mark_unreachable();
            }
            Instruction::Return => {
                stack.pop_sequence(&self.results, "return")?;
                stack.mark_unreachable();
            }
            Instruction::Call(index) => {
                let ty = module.function_type(*index)?;
                stack.pop_sequence(&ty.params, "call")?;
                stack.push_all(&ty.results)?;
            }
            Instruction::CallIndirect { type_index, table } => {
                if module.table(*table)?.element_type != RefType::FuncRef {
                    return Err(validation_error!(
                        codes::TYPE_MISMATCH,
                        "type mismatch: call_indirect must reference table of funcref type"
                    ));
                }
                let ty = module.func_type(*type_index)?;
                let mut expected = ty.params.clone();
                expected.push(ValueType::I32);
                stack.pop_sequence(&expected, "call_indirect")?;
                stack.push_all(&ty.results)?;
            }
            Instruction::Drop => {
                stack.pop_any("drop")?;
            }
            Instruction::Select => {
                stack.pop(ValueType::I32, "select")?;
                let known = (0..2).find_map(|depth| stack.peek_operand(depth)?.value_type());
                match known {
                    Some(ty) if ty.is_ref() => {
                        return Err(validation_error!(
                            codes::TYPE_MISMATCH,
                            "type mismatch in select, expected numeric operands but got [{ty}]"
                        ));
                    }
                    Some(ty) => {
                        stack.pop_sequence(&[ty, ty], "select")?;
                        stack.push(ty)?;
                    }
                    None => {
                        stack.pop_any("select")?;
                        stack.pop_any("select")?;
                        stack.push_operand(Operand::Unknown)?;
                    }
                }
            }
            Instruction::SelectTyped(ty) => {
                stack.pop_sequence(&[*ty, *ty, ValueType::I32], "select")?;
                stack.push(*ty)?;
            }
            Instruction::LocalGet(index) => {
                let ty = self.locals.type_of(*index)?;
                stack.push(ty)?;
            }
            Instruction::LocalSet(index) => {
                let ty = self.locals.type_of(*index)?;
                stack.pop(ty, "local.set")?;
            }
            Instruction::LocalTee(index) => {
                let ty = self.locals.type_of(*index)?;
                stack.pop(ty, "local.tee")?;
                stack.push(ty)?;
            }
            Instruction::GlobalGet(index) => {
                let global = module.global(*index)?;
                stack.push(global.value_type)?;
            }
            Instruction::GlobalSet(index) => {
                let global = module.global(*index)?;
                if !global.mutable {
                    return Err(kinds::immutable_global(*index));
                }
                stack.pop(global.value_type, "global.set")?;
            }
            Instruction::TableGet(index) => {
                let element = module.table(*index)?.element_type.to_value_type();
                stack.pop(ValueType::I32, "table.get")?;
                stack.push(element)?;
            }
            Instruction::TableSet(index) => {
                let element = module.table(*index)?.element_type.to_value_type();
                stack.pop_sequence(&[ValueType::I32, element], "table.set")?;
            }
            Instruction::TableSize(index) => {
                module.table(*index)?;
                stack.push(ValueType::I32)?;
            }
            Instruction::TableGrow(index) => {
                let element = module.table(*index)?.element_type.to_value_type();
                stack.pop_sequence(&[element, ValueType::I32], "table.grow")?;
                stack.push(ValueType::I32)?;
            }
            Instruction::TableFill(index) => {
                let element = module.table(*index)?.element_type.to_value_type();
                stack.pop_sequence(&[ValueType::I32, element, ValueType::I32], "table.fill")?;
            }
            Instruction::TableCopy { dst, src } => {
                let dst = module.table(*dst)?.element_type;
                let src = module.table(*src)?.element_type;
                if dst != src {
                    return Err(kinds::type_mismatch("table.copy", [dst], [src]));
                }
                stack.pop_sequence(&[ValueType::I32; 3], "table.copy")?;
            }
            Instruction::TableInit { table, elem } => {
                let table = module.table(*table)?.element_type;
                let segment = module.element(*elem)?.element_type;
                if table != segment {
                    return Err(kinds::type_mismatch("table.init", [table], [segment]));
                }
                stack.pop_sequence(&[ValueType::I32; 3], "table.init")?;
            }
            Instruction::ElemDrop(index) => {
                module.element(*index)?;
            }
            Instruction::RefNull(ty) => stack.push(ty.to_value_type())?,
            Instruction::RefIsNull => {
                stack.pop_reference("ref.is_null")?;
                stack.push(ValueType::I32)?;
            }
            Instruction::RefFunc(index) => {
                module.function_type(*index)?;
                stack.push(ValueType::FuncRef)?;
            }
            Instruction::Load(op, memarg) => {
                check_memory_access(module, op.access_width(), memarg.align)?;
                stack.pop(ValueType::I32, op.name())?;
                stack.push(op.value_type())?;
            }
            Instruction::Store(op, memarg) => {
                check_memory_access(module, op.access_width(), memarg.align)?;
                stack.pop_sequence(&[ValueType::I32, op.value_type()], op.name())?;
            }
            Instruction::MemorySize => {
                module.memory(0)?;
                stack.push(ValueType::I32)?;
            }
            Instruction::MemoryGrow => {
                module.memory(0)?;
                stack.pop(ValueType::I32, "memory.grow")?;
                stack.push(ValueType::I32)?;
            }
            Instruction::I32Const(_) => stack.push(ValueType::I32)?,
            Instruction::I64Const(_) => stack.push(ValueType::I64)?,
            Instruction::F32Const(_) => stack.push(ValueType::F32)?,
            Instruction::F64Const(_) => stack.push(ValueType::F64)?,
            Instruction::Numeric(op) => {
                stack.pop_sequence(op.params(), op.name())?;
                stack.push(op.result())?;
            }
        }
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        let stack = &mut self.stack;
        let frame = match stack.current_frame()?.kind {
            FrameKind::Function => {
                stack.pop_frame("implicit return")?;
                return Ok(());
            }
            FrameKind::Block => stack.pop_frame("block")?,
            FrameKind::Loop => stack.pop_frame("loop")?,
            FrameKind::Else => stack.pop_frame("if false branch")?,
            FrameKind::If => {
                // A missing else passes the params through unchanged.
                let frame = stack.pop_frame("if true branch")?;
                stack.push_frame(FrameKind::Else, frame.params, frame.results)?;
                stack.pop_frame("if false branch")?
            }
        };
        stack.push_all(&frame.results)
    }
}

fn block_signature(module: &Module, bt: BlockType) -> Result<(Vec<ValueType>, Vec<ValueType>)> {
    match bt {
        BlockType::Empty => Ok((Vec::new(), Vec::new())),
        BlockType::Value(ty) => Ok((Vec::new(), vec![ty])),
        BlockType::TypeIndex(index) => {
            let ty = module.func_type(index)?;
            Ok((ty.params.clone(), ty.results.clone()))
        }
    }
}

fn check_memory_access(module: &Module, width: u32, align: u32) -> Result<()> {
    module.memory(0)?;
    if align > width.trailing_zeros() {
        return Err(kinds::invalid_alignment(width));
    }
    Ok(())
}

/// Validate one function body of `module`
///
/// # Errors
///
/// Returns the diagnostic of the first violated rule.
pub fn validate_function(
    module: &Module,
    body: &FunctionBody,
    config: &ValidationConfig,
) -> core::result::Result<(), Diagnostic> {
    let func_type = module
        .func_type(body.type_index)
        .map_err(|error| Diagnostic::unlocated(error).with_callback("OnFunction"))?;
    let mut validator = FunctionValidator::new(module, func_type, &body.locals, config)
        .map_err(|error| Diagnostic::unlocated(error).with_callback("OnLocalDeclCount"))?;

    log::debug!("validating body of type {func_type}, {} instructions", body.body.len());

    for located in &body.body {
        validator.validate(located.offset, &located.instruction).inspect_err(|diagnostic| {
            log::debug!("rejected at {:#x}: {}", located.offset, diagnostic.message());
        })?;
    }
    validator.finish(body.end_offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::NumericOp;

    fn module_with(results: &[ValueType]) -> (Module, FuncType) {
        let mut module = Module::new();
        let ty = FuncType::new([], results.iter().copied());
        module.add_type(ty.clone());
        (module, ty)
    }

    fn run(module: &Module, ty: &FuncType, code: &[Instruction]) -> Result<()> {
        let mut validator = FunctionValidator::new(module, ty, &[], &ValidationConfig::default())?;
        for instruction in code {
            validator.check(instruction)?;
        }
        Ok(())
    }

    #[test]
    fn test_block_results_flow_to_parent() {
        let (module, ty) = module_with(&[ValueType::I32]);
        run(
            &module,
            &ty,
            &[
                Instruction::Block(BlockType::Value(ValueType::I32)),
                Instruction::I32Const(1),
                Instruction::End,
                Instruction::End,
            ],
        )
        .unwrap();
    }

    #[test]
    fn test_if_without_else_needs_matching_params() {
        let (module, ty) = module_with(&[]);
        let err = run(
            &module,
            &ty,
            &[
                Instruction::I32Const(0),
                Instruction::If(BlockType::Value(ValueType::I32)),
                Instruction::I32Const(1),
                Instruction::End,
            ],
        )
        .unwrap_err();
        assert_eq!(err.message(), "type mismatch in if false branch, expected [i32] but got []");
    }

    #[test]
    fn test_else_outside_if() {
        let (module, ty) = module_with(&[]);
        let err = run(&module, &ty, &[Instruction::Block(BlockType::Empty), Instruction::Else])
            .unwrap_err();
        assert_eq!(err.message(), "else expected if");
    }

    #[test]
    fn test_unreachable_makes_stack_polymorphic() {
        let (module, ty) = module_with(&[ValueType::F64]);
        run(
            &module,
            &ty,
            &[
                Instruction::Unreachable,
                Instruction::Numeric(NumericOp::I32Add),
                Instruction::Drop,
                Instruction::End,
            ],
        )
        .unwrap();
    }

    #[test]
    fn test_br_to_loop_uses_params() {
        let mut module = Module::new();
        let ty = FuncType::default();
        module.add_type(ty.clone());
        let loop_ty = module.add_type(FuncType::new([ValueType::I64], []));
        run(
            &module,
            &ty,
            &[
                Instruction::I64Const(0),
                Instruction::Loop(BlockType::TypeIndex(loop_ty)),
                Instruction::Drop,
                Instruction::I64Const(1),
                Instruction::Br(0),
                Instruction::End,
                Instruction::End,
            ],
        )
        .unwrap();
    }

    #[test]
    fn test_instruction_after_final_end() {
        let (module, ty) = module_with(&[]);
        let err = run(&module, &ty, &[Instruction::End, Instruction::Nop]).unwrap_err();
        assert_eq!(err.message(), "unexpected instruction after end of function");
    }

    #[test]
    fn test_final_end_uses_end_function_body_callback() {
        let (module, ty) = module_with(&[ValueType::I32]);
        let mut validator =
            FunctionValidator::new(&module, &ty, &[], &ValidationConfig::default()).unwrap();
        let diagnostic = validator.validate(0x1f, &Instruction::End).unwrap_err();
        assert_eq!(diagnostic.callbacks().collect::<Vec<_>>(), [END_FUNCTION_BODY]);
    }

    #[test]
    fn test_missing_final_end() {
        let (module, _) = module_with(&[]);
        let body = FunctionBody::new(0).with_code(0x10, [Instruction::Nop]);
        let diagnostic =
            validate_function(&module, &body, &ValidationConfig::default()).unwrap_err();
        assert_eq!(diagnostic.to_string(), "0000011: error: function body must end with END opcode");
    }
}
