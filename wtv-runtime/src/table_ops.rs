// WTV - wtv-runtime
// Module: Table Operations
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Table operations for WebAssembly instructions.
//!
//! Each operation pops its operands from the context's value stack, calls
//! into the bounds-checked [`Table`], and pushes its results. Operands pop
//! in reverse order of their declaration, so `table.set` pops the value
//! before the index.

use crate::{instruction_traits::PureInstruction, prelude::*, table::Table};

/// Table operations that can be performed on WebAssembly tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableOp {
    /// Get an element from a table: [i32] -> [ref]
    TableGet(u32),
    /// Set an element in a table: [i32 ref] -> []
    TableSet(u32),
    /// Get the size of a table: [] -> [i32]
    TableSize(u32),
    /// Grow a table: [ref i32] -> [i32]
    TableGrow(u32),
    /// Fill a range of a table: [i32 ref i32] -> []
    TableFill(u32),
    /// Copy between tables: [i32 i32 i32] -> []
    TableCopy {
        /// Destination table
        dst_table: u32,
        /// Source table
        src_table: u32,
    },
    /// Initialize a table from an element segment: [i32 i32 i32] -> []
    TableInit {
        /// Target table
        table_index: u32,
        /// Source element segment
        elem_index:  u32,
    },
    /// Drop an element segment: [] -> []
    ElemDrop(u32),
}

impl TableOp {
    /// The instruction's text-format name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TableGet(_) => "table.get",
            Self::TableSet(_) => "table.set",
            Self::TableSize(_) => "table.size",
            Self::TableGrow(_) => "table.grow",
            Self::TableFill(_) => "table.fill",
            Self::TableCopy { .. } => "table.copy",
            Self::TableInit { .. } => "table.init",
            Self::ElemDrop(_) => "elem.drop",
        }
    }
}

/// Execution context for table operations
pub trait TableContext {
    /// Table at `index`
    fn table(&self, index: u32) -> Result<&Table>;

    /// Mutable table at `index`
    fn table_mut(&mut self, index: u32) -> Result<&mut Table>;

    /// Copy `len` elements from `src` of `src_table` to `dst` of `dst_table`
    fn copy_table(&mut self, dst_table: u32, dst: u32, src_table: u32, src: u32, len: u32)
        -> Result<()>;

    /// Copy `len` items from `src` of segment `elem` to `dst` of `table`
    fn init_table(&mut self, table: u32, dst: u32, elem: u32, src: u32, len: u32) -> Result<()>;

    /// Drop element segment `elem`, leaving it empty
    fn drop_elem(&mut self, elem: u32) -> Result<()>;

    /// Push a value onto the operand stack
    fn push_value(&mut self, value: Value) -> Result<()>;

    /// Pop a value from the operand stack
    fn pop_value(&mut self) -> Result<Value>;
}

impl<T: TableContext> PureInstruction<T, Error> for TableOp {
    fn execute(&self, context: &mut T) -> Result<()> {
        match *self {
            Self::TableGet(table) => {
                let index = context.pop_value()?.as_u32()?;
                let value = context.table(table)?.get(index)?;
                context.push_value(value)
            }
            Self::TableSet(table) => {
                let value = context.pop_value()?;
                let index = context.pop_value()?.as_u32()?;
                context.table_mut(table)?.set(index, value)
            }
            Self::TableSize(table) => {
                let size = context.table(table)?.size();
                context.push_value(Value::from(size))
            }
            Self::TableGrow(table) => {
                let delta = context.pop_value()?.as_u32()?;
                let init = context.pop_value()?;
                let result = match context.table_mut(table)?.grow(delta, init)? {
                    Some(old_size) => Value::from(old_size),
                    None => Value::I32(-1),
                };
                context.push_value(result)
            }
            Self::TableFill(table) => {
                let len = context.pop_value()?.as_u32()?;
                let value = context.pop_value()?;
                let dst = context.pop_value()?.as_u32()?;
                context.table_mut(table)?.fill(dst, value, len)
            }
            Self::TableCopy {
                dst_table,
                src_table,
            } => {
                let len = context.pop_value()?.as_u32()?;
                let src = context.pop_value()?.as_u32()?;
                let dst = context.pop_value()?.as_u32()?;
                context.copy_table(dst_table, dst, src_table, src, len)
            }
            Self::TableInit {
                table_index,
                elem_index,
            } => {
                let len = context.pop_value()?.as_u32()?;
                let src = context.pop_value()?.as_u32()?;
                let dst = context.pop_value()?.as_u32()?;
                context.init_table(table_index, dst, elem_index, src, len)
            }
            Self::ElemDrop(elem) => context.drop_elem(elem),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockTableContext {
        tables:   Vec<Table>,
        segments: Vec<Vec<Value>>,
        stack:    Vec<Value>,
    }

    impl MockTableContext {
        fn new() -> Self {
            let ty = TableType::new(RefType::FuncRef, Limits::new(4, Some(8)));
            Self {
                tables:   vec![Table::new(ty).unwrap(), Table::new(ty).unwrap()],
                segments: vec![vec![Value::FuncRef(Some(10)), Value::FuncRef(Some(11))]],
                stack:    Vec::new(),
            }
        }
    }

    impl TableContext for MockTableContext {
        fn table(&self, index: u32) -> Result<&Table> {
            self.tables.get(index as usize).ok_or_else(|| kinds::table_not_found(index))
        }

        fn table_mut(&mut self, index: u32) -> Result<&mut Table> {
            self.tables.get_mut(index as usize).ok_or_else(|| kinds::table_not_found(index))
        }

        fn copy_table(
            &mut self,
            dst_table: u32,
            dst: u32,
            src_table: u32,
            src: u32,
            len: u32,
        ) -> Result<()> {
            let source = self.table(src_table)?.clone();
            self.table_mut(dst_table)?.copy_from(dst, &source, src, len)
        }

        fn init_table(&mut self, table: u32, dst: u32, elem: u32, src: u32, len: u32) -> Result<()> {
            let segment = self.segments[elem as usize].clone();
            self.table_mut(table)?.init(dst, &segment, src, len)
        }

        fn drop_elem(&mut self, elem: u32) -> Result<()> {
            self.segments[elem as usize].clear();
            Ok(())
        }

        fn push_value(&mut self, value: Value) -> Result<()> {
            self.stack.push(value);
            Ok(())
        }

        fn pop_value(&mut self) -> Result<Value> {
            self.stack.pop().ok_or(Error::STACK_UNDERFLOW)
        }
    }

    #[test]
    fn test_table_get_set_and_size() {
        let mut context = MockTableContext::new();

        context.push_value(Value::I32(1)).unwrap();
        context.push_value(Value::FuncRef(Some(42))).unwrap();
        TableOp::TableSet(0).execute(&mut context).unwrap();

        context.push_value(Value::I32(1)).unwrap();
        TableOp::TableGet(0).execute(&mut context).unwrap();
        assert_eq!(context.pop_value().unwrap(), Value::FuncRef(Some(42)));

        TableOp::TableSize(0).execute(&mut context).unwrap();
        assert_eq!(context.pop_value().unwrap(), Value::I32(4));
    }

    #[test]
    fn test_negative_index_reads_as_unsigned() {
        let mut context = MockTableContext::new();
        context.push_value(Value::I32(-1)).unwrap();
        context.push_value(Value::FuncRef(None)).unwrap();
        let err = TableOp::TableSet(0).execute(&mut context).unwrap_err();
        assert_eq!(
            err.message(),
            "out of bounds table access: table.set at 4294967295 >= max value 4"
        );
    }

    #[test]
    fn test_table_grow_pushes_old_size_or_minus_one() {
        let mut context = MockTableContext::new();
        context.push_value(Value::FuncRef(None)).unwrap();
        context.push_value(Value::I32(2)).unwrap();
        TableOp::TableGrow(0).execute(&mut context).unwrap();
        assert_eq!(context.pop_value().unwrap(), Value::I32(4));

        context.push_value(Value::FuncRef(None)).unwrap();
        context.push_value(Value::I32(5)).unwrap();
        TableOp::TableGrow(0).execute(&mut context).unwrap();
        assert_eq!(context.pop_value().unwrap(), Value::I32(-1));
        assert_eq!(context.table(0).unwrap().size(), 6);
    }

    #[test]
    fn test_table_fill_copy_and_init() {
        let mut context = MockTableContext::new();

        for value in [Value::I32(0), Value::FuncRef(Some(3)), Value::I32(2)] {
            context.push_value(value).unwrap();
        }
        TableOp::TableFill(0).execute(&mut context).unwrap();

        for value in [Value::I32(2), Value::I32(0), Value::I32(2)] {
            context.push_value(value).unwrap();
        }
        TableOp::TableCopy {
            dst_table: 1,
            src_table: 0,
        }
        .execute(&mut context)
        .unwrap();
        assert_eq!(context.table(1).unwrap().get(3).unwrap(), Value::FuncRef(Some(3)));

        for value in [Value::I32(0), Value::I32(0), Value::I32(2)] {
            context.push_value(value).unwrap();
        }
        TableOp::TableInit {
            table_index: 0,
            elem_index:  0,
        }
        .execute(&mut context)
        .unwrap();
        assert_eq!(context.table(0).unwrap().get(1).unwrap(), Value::FuncRef(Some(11)));

        TableOp::ElemDrop(0).execute(&mut context).unwrap();
        for value in [Value::I32(0), Value::I32(0), Value::I32(1)] {
            context.push_value(value).unwrap();
        }
        let err = TableOp::TableInit {
            table_index: 0,
            elem_index:  0,
        }
        .execute(&mut context)
        .unwrap_err();
        assert!(err.is_trap());
    }

    #[test]
    fn test_missing_operand_underflows() {
        let mut context = MockTableContext::new();
        let err = TableOp::TableGet(0).execute(&mut context).unwrap_err();
        assert_eq!(err, Error::STACK_UNDERFLOW);
    }
}
