// WTV - wtv-validator
// Module: Decoded Module
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The decoded module a validator run consumes.
//!
//! Imports are folded into the index spaces: `imported_functions` precede
//! the defined functions, and `tables`, `memories` and `globals` list
//! imported entries first.

use crate::{
    instructions::{ElemIdx, FuncIdx, GlobalIdx, Instruction, TableIdx},
    prelude::*,
};

/// An instruction together with its byte offset in the module
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Located {
    /// Byte offset of the opcode
    pub offset:      u64,
    /// The decoded instruction
    pub instruction: Instruction,
}

impl Located {
    /// Pair an instruction with its offset
    #[must_use]
    pub const fn new(offset: u64, instruction: Instruction) -> Self {
        Self {
            offset,
            instruction,
        }
    }
}

/// Code of one defined function
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FunctionBody {
    /// Signature, as an index into the type section
    pub type_index: TypeIdx,
    /// Local declarations as `(count, type)` groups
    pub locals:     Vec<(u32, ValueType)>,
    /// Instructions, the closing `end` included
    pub body:       Vec<Located>,
    /// Offset just past the last instruction
    pub end_offset: u64,
}

impl FunctionBody {
    /// Body with the given signature and no code yet
    #[must_use]
    pub fn new(type_index: TypeIdx) -> Self {
        Self {
            type_index,
            ..Self::default()
        }
    }

    /// Add a local declaration group
    #[must_use]
    pub fn with_locals(mut self, count: u32, ty: ValueType) -> Self {
        self.locals.push((count, ty));
        self
    }

    /// Append an instruction at `offset`
    #[must_use]
    pub fn with_instruction(mut self, offset: u64, instruction: Instruction) -> Self {
        self.body.push(Located::new(offset, instruction));
        self.end_offset = self.end_offset.max(offset + 1);
        self
    }

    /// Append instructions at consecutive offsets starting at `start`
    #[must_use]
    pub fn with_code(mut self, start: u64, code: impl IntoIterator<Item = Instruction>) -> Self {
        for (offset, instruction) in (start..).zip(code) {
            self = self.with_instruction(offset, instruction);
        }
        self
    }
}

/// How an element segment is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementMode {
    /// Available to `table.init` until dropped
    #[default]
    Passive,
    /// Copied into a table at instantiation
    Active {
        /// Target table
        table: TableIdx,
    },
    /// Only declares functions for `ref.func`
    Declarative,
}

/// Element segment declaration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementSegment {
    /// Type of the references in the segment
    pub element_type: RefType,
    /// Usage mode
    pub mode:         ElementMode,
    /// Referenced functions
    pub functions:    Vec<FuncIdx>,
}

impl ElementSegment {
    /// Passive segment referencing `functions`
    pub fn passive(element_type: RefType, functions: impl IntoIterator<Item = FuncIdx>) -> Self {
        Self {
            element_type,
            mode: ElementMode::Passive,
            functions: functions.into_iter().collect(),
        }
    }
}

/// A decoded module
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Module {
    /// Type section
    pub types:              Vec<FuncType>,
    /// Type indices of imported functions
    pub imported_functions: Vec<TypeIdx>,
    /// Defined functions
    pub functions:          Vec<FunctionBody>,
    /// Tables, imported first
    pub tables:             Vec<TableType>,
    /// Memories, imported first
    pub memories:           Vec<MemoryType>,
    /// Globals, imported first
    pub globals:            Vec<GlobalType>,
    /// Element segments
    pub elements:           Vec<ElementSegment>,
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl Module {
    /// Empty module
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function type, returning its index
    pub fn add_type(&mut self, ty: FuncType) -> TypeIdx {
        self.types.push(ty);
        count(self.types.len()) - 1
    }

    /// Import a function of the given type, returning its function index
    ///
    /// Imports must be added before defined functions.
    pub fn import_function(&mut self, type_index: TypeIdx) -> FuncIdx {
        self.imported_functions.push(type_index);
        count(self.imported_functions.len()) - 1
    }

    /// Add a defined function, returning its function index
    pub fn add_function(&mut self, body: FunctionBody) -> FuncIdx {
        self.functions.push(body);
        self.function_count() - 1
    }

    /// Add a table, returning its index
    pub fn add_table(&mut self, table: TableType) -> TableIdx {
        self.tables.push(table);
        count(self.tables.len()) - 1
    }

    /// Add a memory, returning its index
    pub fn add_memory(&mut self, memory: MemoryType) -> u32 {
        self.memories.push(memory);
        count(self.memories.len()) - 1
    }

    /// Add a global, returning its index
    pub fn add_global(&mut self, global: GlobalType) -> GlobalIdx {
        self.globals.push(global);
        count(self.globals.len()) - 1
    }

    /// Add an element segment, returning its index
    pub fn add_element(&mut self, segment: ElementSegment) -> ElemIdx {
        self.elements.push(segment);
        count(self.elements.len()) - 1
    }

    /// Size of the function index space
    #[must_use]
    pub fn function_count(&self) -> u32 {
        count(self.imported_functions.len() + self.functions.len())
    }

    /// Function type at `index` of the type section
    pub fn func_type(&self, index: TypeIdx) -> Result<&FuncType> {
        self.types
            .get(index as usize)
            .ok_or_else(|| kinds::index_out_of_range("type", index, count(self.types.len())))
    }

    /// Signature of the function at `index` of the function index space
    pub fn function_type(&self, index: FuncIdx) -> Result<&FuncType> {
        let imported = self.imported_functions.len();
        let position = index as usize;
        let type_index = if position < imported {
            self.imported_functions.get(position).copied()
        } else {
            self.functions.get(position - imported).map(|body| body.type_index)
        };
        let type_index = type_index.ok_or_else(|| {
            kinds::index_out_of_range("function", index, self.function_count())
        })?;
        self.func_type(type_index)
    }

    /// Table declaration at `index`
    pub fn table(&self, index: TableIdx) -> Result<&TableType> {
        self.tables
            .get(index as usize)
            .ok_or_else(|| kinds::index_out_of_range("table", index, count(self.tables.len())))
    }

    /// Memory declaration at `index`
    pub fn memory(&self, index: u32) -> Result<&MemoryType> {
        self.memories
            .get(index as usize)
            .ok_or_else(|| kinds::index_out_of_range("memory", index, count(self.memories.len())))
    }

    /// Global declaration at `index`
    pub fn global(&self, index: GlobalIdx) -> Result<&GlobalType> {
        self.globals
            .get(index as usize)
            .ok_or_else(|| kinds::index_out_of_range("global", index, count(self.globals.len())))
    }

    /// Element segment at `index`
    pub fn element(&self, index: ElemIdx) -> Result<&ElementSegment> {
        self.elements.get(index as usize).ok_or_else(|| {
            kinds::index_out_of_range("elem segment", index, count(self.elements.len()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_index_space_includes_imports() {
        let mut module = Module::new();
        let unary = module.add_type(FuncType::new([ValueType::I32], [ValueType::I32]));
        let nullary = module.add_type(FuncType::default());
        assert_eq!(module.import_function(unary), 0);
        assert_eq!(module.add_function(FunctionBody::new(nullary)), 1);

        assert_eq!(module.function_type(0).unwrap().params, [ValueType::I32]);
        assert!(module.function_type(1).unwrap().params.is_empty());
        assert_eq!(
            module.function_type(2).unwrap_err().message(),
            "function variable out of range: 2 (max 2)"
        );
    }

    #[test]
    fn test_index_errors_name_their_space() {
        let module = Module::new();
        assert_eq!(
            module.table(0).unwrap_err().message(),
            "table variable out of range: 0 (max 0)"
        );
        assert_eq!(
            module.element(4).unwrap_err().message(),
            "elem segment variable out of range: 4 (max 0)"
        );
        assert_eq!(
            module.memory(0).unwrap_err().message(),
            "memory variable out of range: 0 (max 0)"
        );
    }

    #[test]
    fn test_body_builder_tracks_end_offset() {
        let body = FunctionBody::new(0)
            .with_locals(2, ValueType::I32)
            .with_code(0x10, [Instruction::Nop, Instruction::End]);
        assert_eq!(body.body.len(), 2);
        assert_eq!(body.body[1].offset, 0x11);
        assert_eq!(body.end_offset, 0x12);
    }
}
