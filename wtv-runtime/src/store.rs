// WTV - wtv-runtime
// Module: Table Store
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Owner of the tables, element segments and operand stack that table
//! instructions run against.

use crate::{
    instruction_traits::PureInstruction,
    prelude::*,
    table::Table,
    table_ops::{TableContext, TableOp},
};

/// Tables and passive element segments of one instance
#[derive(Debug, Clone, Default)]
pub struct TableStore {
    tables:   Vec<Table>,
    segments: Vec<Vec<Value>>,
    stack:    Vec<Value>,
}

impl TableStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a table of type `ty`, returning its index
    ///
    /// # Errors
    ///
    /// Returns an error if the table type's limits are invalid.
    pub fn add_table(&mut self, ty: TableType) -> Result<u32> {
        self.tables.push(Table::new(ty)?);
        Ok(index_of(self.tables.len()))
    }

    /// Register an element segment, returning its index
    pub fn add_element_segment(&mut self, items: impl IntoIterator<Item = Value>) -> u32 {
        self.segments.push(items.into_iter().collect());
        index_of(self.segments.len())
    }

    /// Current contents of the operand stack, bottom first
    #[must_use]
    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    /// Push `args`, run `op`, and return what it left on the stack
    ///
    /// A trap aborts the operation: the stack is cleared and the tables keep
    /// the contents they had before the faulting access, so the store stays
    /// usable for later operations.
    ///
    /// # Errors
    ///
    /// Returns a trap diagnostic for out-of-bounds accesses and an unlocated
    /// diagnostic for any other failure.
    pub fn invoke(
        &mut self,
        op: &TableOp,
        args: impl IntoIterator<Item = Value>,
    ) -> core::result::Result<Vec<Value>, Diagnostic> {
        self.stack.clear();
        self.stack.extend(args);
        match op.execute(self) {
            Ok(()) => Ok(core::mem::take(&mut self.stack)),
            Err(error) => {
                self.stack.clear();
                if error.is_trap() {
                    log::warn!("trap in {}: {}", op.name(), error.message());
                } else {
                    log::debug!("{} failed: {}", op.name(), error.message());
                }
                Err(Diagnostic::trap(error))
            }
        }
    }

    fn segment(&self, index: u32) -> Result<&[Value]> {
        self.segments
            .get(index as usize)
            .map(Vec::as_slice)
            .ok_or_else(|| kinds::element_segment_not_found(index))
    }
}

fn index_of(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX) - 1
}

impl TableContext for TableStore {
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
        if dst_table == src_table {
            return self.table_mut(dst_table)?.copy_within(dst, src, len);
        }
        let (dst_pos, src_pos) = (dst_table as usize, src_table as usize);
        self.table(dst_table)?;
        self.table(src_table)?;
        let (target, source) = if dst_pos < src_pos {
            let (low, high) = self.tables.split_at_mut(src_pos);
            (&mut low[dst_pos], &high[0])
        } else {
            let (low, high) = self.tables.split_at_mut(dst_pos);
            (&mut high[0], &low[src_pos])
        };
        target.copy_from(dst, source, src, len)
    }

    fn init_table(&mut self, table: u32, dst: u32, elem: u32, src: u32, len: u32) -> Result<()> {
        let segment_pos = elem as usize;
        self.segment(elem)?;
        let target = self
            .tables
            .get_mut(table as usize)
            .ok_or_else(|| kinds::table_not_found(table))?;
        target.init(dst, &self.segments[segment_pos], src, len)
    }

    fn drop_elem(&mut self, elem: u32) -> Result<()> {
        self.segments
            .get_mut(elem as usize)
            .ok_or_else(|| kinds::element_segment_not_found(elem))?
            .clear();
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

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_table(min: u32, max: Option<u32>) -> TableStore {
        let mut store = TableStore::new();
        store
            .add_table(TableType::new(RefType::FuncRef, Limits::new(min, max)))
            .unwrap();
        store
    }

    #[test]
    fn test_trap_renders_as_bare_line() {
        let mut store = store_with_table(1, Some(1));
        let diagnostic = store
            .invoke(&TableOp::TableSet(0), [Value::I32(2), Value::FuncRef(Some(0))])
            .unwrap_err();
        assert_eq!(
            diagnostic.to_string(),
            "out of bounds table access: table.set at 2 >= max value 1"
        );
        assert_eq!(diagnostic.offset(), None);
        assert!(store.stack().is_empty());
    }

    #[test]
    fn test_store_usable_after_trap() {
        let mut store = store_with_table(1, Some(1));
        assert!(store.invoke(&TableOp::TableGet(0), [Value::I32(5)]).is_err());
        store
            .invoke(&TableOp::TableSet(0), [Value::I32(0), Value::FuncRef(Some(3))])
            .unwrap();
        assert_eq!(
            store.invoke(&TableOp::TableGet(0), [Value::I32(0)]).unwrap(),
            [Value::FuncRef(Some(3))]
        );
    }

    #[test]
    fn test_copy_between_distinct_tables() {
        let mut store = store_with_table(2, None);
        store
            .add_table(TableType::new(RefType::FuncRef, Limits::new(2, None)))
            .unwrap();
        store
            .invoke(&TableOp::TableSet(1), [Value::I32(1), Value::FuncRef(Some(8))])
            .unwrap();
        let copy = TableOp::TableCopy {
            dst_table: 0,
            src_table: 1,
        };
        store.invoke(&copy, [Value::I32(0), Value::I32(1), Value::I32(1)]).unwrap();
        assert_eq!(store.table(0).unwrap().get(0).unwrap(), Value::FuncRef(Some(8)));

        let back = TableOp::TableCopy {
            dst_table: 1,
            src_table: 0,
        };
        store.invoke(&back, [Value::I32(0), Value::I32(0), Value::I32(1)]).unwrap();
        assert_eq!(store.table(1).unwrap().get(0).unwrap(), Value::FuncRef(Some(8)));
    }

    #[test]
    fn test_missing_table_and_segment() {
        let mut store = TableStore::new();
        let diagnostic = store.invoke(&TableOp::TableSize(3), []).unwrap_err();
        assert_eq!(diagnostic.to_string(), "error: unknown table 3");
        assert_eq!(
            store.invoke(&TableOp::ElemDrop(0), []).unwrap_err().message(),
            "unknown elem segment 0"
        );
    }

    #[test]
    fn test_init_after_drop_traps() {
        let mut store = store_with_table(2, None);
        let elem = store.add_element_segment([Value::FuncRef(Some(1))]);
        let init = TableOp::TableInit {
            table_index: 0,
            elem_index:  elem,
        };
        store.invoke(&init, [Value::I32(1), Value::I32(0), Value::I32(1)]).unwrap();
        store.invoke(&TableOp::ElemDrop(elem), []).unwrap();
        let diagnostic =
            store.invoke(&init, [Value::I32(1), Value::I32(0), Value::I32(1)]).unwrap_err();
        assert!(diagnostic.error().is_trap());
        // Zero-length init of a dropped segment is allowed
        store.invoke(&init, [Value::I32(0), Value::I32(0), Value::I32(0)]).unwrap();
    }
}
