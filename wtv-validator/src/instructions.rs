// WTV - wtv-validator
// Module: Instruction Set
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Decoded instructions, as handed over by a binary reader.
//!
//! Each instruction knows its text-format name, which is the `desc` of its
//! type mismatch messages, and the name of the reader callback that
//! propagates its failures.

use wtv_foundation::{BlockType, RefType, ValueType};

use crate::numeric::NumericOp;

/// Index of a function in the function index space
pub type FuncIdx = u32;
/// Index of a global
pub type GlobalIdx = u32;
/// Index of a table
pub type TableIdx = u32;
/// Index of an element segment
pub type ElemIdx = u32;
/// Relative branch depth
pub type LabelIdx = u32;

/// Memory immediate of loads and stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MemArg {
    /// Alignment as a power of two exponent
    pub align:  u32,
    /// Constant address offset
    pub offset: u64,
}

impl MemArg {
    /// Create a memory immediate
    #[must_use]
    pub const fn new(align: u32, offset: u64) -> Self {
        Self { align, offset }
    }
}

/// Load instruction variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum LoadOp {
    I32Load,
    I64Load,
    F32Load,
    F64Load,
    I32Load8S,
    I32Load8U,
    I32Load16S,
    I32Load16U,
    I64Load8S,
    I64Load8U,
    I64Load16S,
    I64Load16U,
    I64Load32S,
    I64Load32U,
}

impl LoadOp {
    /// Text-format name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            LoadOp::I32Load => "i32.load",
            LoadOp::I64Load => "i64.load",
            LoadOp::F32Load => "f32.load",
            LoadOp::F64Load => "f64.load",
            LoadOp::I32Load8S => "i32.load8_s",
            LoadOp::I32Load8U => "i32.load8_u",
            LoadOp::I32Load16S => "i32.load16_s",
            LoadOp::I32Load16U => "i32.load16_u",
            LoadOp::I64Load8S => "i64.load8_s",
            LoadOp::I64Load8U => "i64.load8_u",
            LoadOp::I64Load16S => "i64.load16_s",
            LoadOp::I64Load16U => "i64.load16_u",
            LoadOp::I64Load32S => "i64.load32_s",
            LoadOp::I64Load32U => "i64.load32_u",
        }
    }

    /// Type of the loaded value
    #[must_use]
    pub const fn value_type(self) -> ValueType {
        match self {
            LoadOp::I32Load
            | LoadOp::I32Load8S
            | LoadOp::I32Load8U
            | LoadOp::I32Load16S
            | LoadOp::I32Load16U => ValueType::I32,
            LoadOp::I64Load
            | LoadOp::I64Load8S
            | LoadOp::I64Load8U
            | LoadOp::I64Load16S
            | LoadOp::I64Load16U
            | LoadOp::I64Load32S
            | LoadOp::I64Load32U => ValueType::I64,
            LoadOp::F32Load => ValueType::F32,
            LoadOp::F64Load => ValueType::F64,
        }
    }

    /// Width of the memory access in bytes
    #[must_use]
    pub const fn access_width(self) -> u32 {
        match self {
            LoadOp::I32Load8S | LoadOp::I32Load8U | LoadOp::I64Load8S | LoadOp::I64Load8U => 1,
            LoadOp::I32Load16S | LoadOp::I32Load16U | LoadOp::I64Load16S | LoadOp::I64Load16U => 2,
            LoadOp::I32Load | LoadOp::F32Load | LoadOp::I64Load32S | LoadOp::I64Load32U => 4,
            LoadOp::I64Load | LoadOp::F64Load => 8,
        }
    }
}

/// Store instruction variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum StoreOp {
    I32Store,
    I64Store,
    F32Store,
    F64Store,
    I32Store8,
    I32Store16,
    I64Store8,
    I64Store16,
    I64Store32,
}

impl StoreOp {
    /// Text-format name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            StoreOp::I32Store => "i32.store",
            StoreOp::I64Store => "i64.store",
            StoreOp::F32Store => "f32.store",
            StoreOp::F64Store => "f64.store",
            StoreOp::I32Store8 => "i32.store8",
            StoreOp::I32Store16 => "i32.store16",
            StoreOp::I64Store8 => "i64.store8",
            StoreOp::I64Store16 => "i64.store16",
            StoreOp::I64Store32 => "i64.store32",
        }
    }

    /// Type of the stored value
    #[must_use]
    pub const fn value_type(self) -> ValueType {
        match self {
            StoreOp::I32Store | StoreOp::I32Store8 | StoreOp::I32Store16 => ValueType::I32,
            StoreOp::I64Store | StoreOp::I64Store8 | StoreOp::I64Store16 | StoreOp::I64Store32 => {
                ValueType::I64
            }
            StoreOp::F32Store => ValueType::F32,
            StoreOp::F64Store => ValueType::F64,
        }
    }

    /// Width of the memory access in bytes
    #[must_use]
    pub const fn access_width(self) -> u32 {
        match self {
            StoreOp::I32Store8 | StoreOp::I64Store8 => 1,
            StoreOp::I32Store16 | StoreOp::I64Store16 => 2,
            StoreOp::I32Store | StoreOp::F32Store | StoreOp::I64Store32 => 4,
            StoreOp::I64Store | StoreOp::F64Store => 8,
        }
    }
}

/// A decoded instruction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `unreachable`
    Unreachable,
    /// `nop`
    Nop,
    /// `block bt`
    Block(BlockType),
    /// `loop bt`
    Loop(BlockType),
    /// `if bt`
    If(BlockType),
    /// `else`
    Else,
    /// `end`, closing a construct or the function body
    End,
    /// `br l`
    Br(LabelIdx),
    /// `br_if l`
    BrIf(LabelIdx),
    /// `br_table l* l`
    BrTable {
        /// Branch targets indexed by the operand
        labels:  alloc::vec::Vec<LabelIdx>,
        /// Target for out-of-range operands
        default: LabelIdx,
    },
    /// `return`
    Return,
    /// `call f`
    Call(FuncIdx),
    /// `call_indirect`
    CallIndirect {
        /// Expected signature
        type_index: u32,
        /// Table holding the callee
        table:      TableIdx,
    },
    /// `drop`
    Drop,
    /// `select` without type annotation
    Select,
    /// `select t`
    SelectTyped(ValueType),
    /// `local.get i`
    LocalGet(u32),
    /// `local.set i`
    LocalSet(u32),
    /// `local.tee i`
    LocalTee(u32),
    /// `global.get i`
    GlobalGet(GlobalIdx),
    /// `global.set i`
    GlobalSet(GlobalIdx),
    /// `table.get t`
    TableGet(TableIdx),
    /// `table.set t`
    TableSet(TableIdx),
    /// `table.size t`
    TableSize(TableIdx),
    /// `table.grow t`
    TableGrow(TableIdx),
    /// `table.fill t`
    TableFill(TableIdx),
    /// `table.copy d s`
    TableCopy {
        /// Destination table
        dst: TableIdx,
        /// Source table
        src: TableIdx,
    },
    /// `table.init t e`
    TableInit {
        /// Destination table
        table: TableIdx,
        /// Source element segment
        elem:  ElemIdx,
    },
    /// `elem.drop e`
    ElemDrop(ElemIdx),
    /// `ref.null t`
    RefNull(RefType),
    /// `ref.is_null`
    RefIsNull,
    /// `ref.func f`
    RefFunc(FuncIdx),
    /// Memory load
    Load(LoadOp, MemArg),
    /// Memory store
    Store(StoreOp, MemArg),
    /// `memory.size`
    MemorySize,
    /// `memory.grow`
    MemoryGrow,
    /// `i32.const`
    I32Const(i32),
    /// `i64.const`
    I64Const(i64),
    /// `f32.const`, as its bit pattern
    F32Const(u32),
    /// `f64.const`, as its bit pattern
    F64Const(u64),
    /// Numeric instruction
    Numeric(NumericOp),
}

impl Instruction {
    /// Text-format name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Instruction::Unreachable => "unreachable",
            Instruction::Nop => "nop",
            Instruction::Block(_) => "block",
            Instruction::Loop(_) => "loop",
            Instruction::If(_) => "if",
            Instruction::Else => "else",
            Instruction::End => "end",
            Instruction::Br(_) => "br",
            Instruction::BrIf(_) => "br_if",
            Instruction::BrTable { .. } => "br_table",
            Instruction::Return => "return",
            Instruction::Call(_) => "call",
            Instruction::CallIndirect { .. } => "call_indirect",
            Instruction::Drop => "drop",
            Instruction::Select | Instruction::SelectTyped(_) => "select",
            Instruction::LocalGet(_) => "local.get",
            Instruction::LocalSet(_) => "local.set",
            Instruction::LocalTee(_) => "local.tee",
            Instruction::GlobalGet(_) => "global.get",
            Instruction::GlobalSet(_) => "global.set",
            Instruction::TableGet(_) => "table.get",
            Instruction::TableSet(_) => "table.set",
            Instruction::TableSize(_) => "table.size",
            Instruction::TableGrow(_) => "table.grow",
            Instruction::TableFill(_) => "table.fill",
            Instruction::TableCopy { .. } => "table.copy",
            Instruction::TableInit { .. } => "table.init",
            Instruction::ElemDrop(_) => "elem.drop",
            Instruction::RefNull(_) => "ref.null",
            Instruction::RefIsNull => "ref.is_null",
            Instruction::RefFunc(_) => "ref.func",
            Instruction::Load(op, _) => op.name(),
            Instruction::Store(op, _) => op.name(),
            Instruction::MemorySize => "memory.size",
            Instruction::MemoryGrow => "memory.grow",
            Instruction::I32Const(_) => "i32.const",
            Instruction::I64Const(_) => "i64.const",
            Instruction::F32Const(_) => "f32.const",
            Instruction::F64Const(_) => "f64.const",
            Instruction::Numeric(op) => op.name(),
        }
    }

    /// Name of the reader callback that reports this instruction's failures
    #[must_use]
    pub const fn callback(&self) -> &'static str {
        match self {
            Instruction::Unreachable => "OnUnreachableExpr",
            Instruction::Nop => "OnNopExpr",
            Instruction::Block(_) => "OnBlockExpr",
            Instruction::Loop(_) => "OnLoopExpr",
            Instruction::If(_) => "OnIfExpr",
            Instruction::Else => "OnElseExpr",
            Instruction::End => "OnEndExpr",
            Instruction::Br(_) => "OnBrExpr",
            Instruction::BrIf(_) => "OnBrIfExpr",
            Instruction::BrTable { .. } => "OnBrTableExpr",
            Instruction::Return => "OnReturnExpr",
            Instruction::Call(_) => "OnCallExpr",
            Instruction::CallIndirect { .. } => "OnCallIndirectExpr",
            Instruction::Drop => "OnDropExpr",
            Instruction::Select | Instruction::SelectTyped(_) => "OnSelectExpr",
            Instruction::LocalGet(_) => "OnLocalGetExpr",
            Instruction::LocalSet(_) => "OnLocalSetExpr",
            Instruction::LocalTee(_) => "OnLocalTeeExpr",
            Instruction::GlobalGet(_) => "OnGlobalGetExpr",
            Instruction::GlobalSet(_) => "OnGlobalSetExpr",
            Instruction::TableGet(_) => "OnTableGetExpr",
            Instruction::TableSet(_) => "OnTableSetExpr",
            Instruction::TableSize(_) => "OnTableSizeExpr",
            Instruction::TableGrow(_) => "OnTableGrowExpr",
            Instruction::TableFill(_) => "OnTableFillExpr",
            Instruction::TableCopy { .. } => "OnTableCopyExpr",
            Instruction::TableInit { .. } => "OnTableInitExpr",
            Instruction::ElemDrop(_) => "OnElemDropExpr",
            Instruction::RefNull(_) => "OnRefNullExpr",
            Instruction::RefIsNull => "OnRefIsNullExpr",
            Instruction::RefFunc(_) => "OnRefFuncExpr",
            Instruction::Load(..) => "OnLoadExpr",
            Instruction::Store(..) => "OnStoreExpr",
            Instruction::MemorySize => "OnMemorySizeExpr",
            Instruction::MemoryGrow => "OnMemoryGrowExpr",
            Instruction::I32Const(_) => "OnI32ConstExpr",
            Instruction::I64Const(_) => "OnI64ConstExpr",
            Instruction::F32Const(_) => "OnF32ConstExpr",
            Instruction::F64Const(_) => "OnF64ConstExpr",
            Instruction::Numeric(op) => op.class().callback(),
        }
    }
}

impl From<NumericOp> for Instruction {
    fn from(op: NumericOp) -> Self {
        Instruction::Numeric(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_and_callbacks() {
        let set = Instruction::LocalSet(0);
        assert_eq!(set.name(), "local.set");
        assert_eq!(set.callback(), "OnLocalSetExpr");

        let store = Instruction::Store(StoreOp::I64Store32, MemArg::default());
        assert_eq!(store.name(), "i64.store32");
        assert_eq!(store.callback(), "OnStoreExpr");

        assert_eq!(Instruction::from(NumericOp::I32Add).callback(), "OnBinaryExpr");
        assert_eq!(Instruction::SelectTyped(ValueType::F32).name(), "select");
    }

    #[test]
    fn test_memory_access_widths() {
        assert_eq!(LoadOp::I64Load32U.access_width(), 4);
        assert_eq!(LoadOp::I64Load32U.value_type(), ValueType::I64);
        assert_eq!(StoreOp::I32Store16.access_width(), 2);
        assert_eq!(StoreOp::F64Store.value_type(), ValueType::F64);
    }
}
