// WTV - wtv
// Module: Table Instruction Execution
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Runs the table instructions of the validated instruction set against a
//! [`TableStore`].

use wtv_foundation::prelude::*;
use wtv_runtime::{TableOp, TableStore};
use wtv_validator::Instruction;

/// The runtime operation for a table instruction, `None` for any other
/// instruction
#[must_use]
pub fn table_op(instruction: &Instruction) -> Option<TableOp> {
    let op = match *instruction {
        Instruction::TableGet(table) => TableOp::TableGet(table),
        Instruction::TableSet(table) => TableOp::TableSet(table),
        Instruction::TableSize(table) => TableOp::TableSize(table),
        Instruction::TableGrow(table) => TableOp::TableGrow(table),
        Instruction::TableFill(table) => TableOp::TableFill(table),
        Instruction::TableCopy { dst, src } => TableOp::TableCopy {
            dst_table: dst,
            src_table: src,
        },
        Instruction::TableInit { table, elem } => TableOp::TableInit {
            table_index: table,
            elem_index:  elem,
        },
        Instruction::ElemDrop(elem) => TableOp::ElemDrop(elem),
        _ => return None,
    };
    Some(op)
}

/// Execute a table instruction with `args` as its operands
///
/// # Errors
///
/// Returns a trap diagnostic when the access is out of bounds, and an
/// unlocated diagnostic when `instruction` is not a table instruction or
/// the store rejects it.
pub fn execute_table_instruction(
    store: &mut TableStore,
    instruction: &Instruction,
    args: impl IntoIterator<Item = Value>,
) -> core::result::Result<Vec<Value>, Diagnostic> {
    let op = table_op(instruction).ok_or_else(|| {
        Diagnostic::unlocated(Error::invalid_type(format!(
            "{} is not a table instruction",
            instruction.name()
        )))
    })?;
    store.invoke(&op, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_instructions_map_to_ops() {
        assert_eq!(table_op(&Instruction::TableSet(2)), Some(TableOp::TableSet(2)));
        assert_eq!(
            table_op(&Instruction::TableCopy { dst: 1, src: 0 }),
            Some(TableOp::TableCopy {
                dst_table: 1,
                src_table: 0,
            })
        );
        assert_eq!(table_op(&Instruction::Nop), None);
    }

    #[test]
    fn test_execute_rejects_other_instructions() {
        let mut store = TableStore::new();
        let diagnostic =
            execute_table_instruction(&mut store, &Instruction::Drop, []).unwrap_err();
        assert_eq!(diagnostic.to_string(), "error: drop is not a table instruction");

        store
            .add_table(TableType::new(RefType::ExternRef, Limits::new(2, None)))
            .unwrap();
        let size = execute_table_instruction(&mut store, &Instruction::TableSize(0), []).unwrap();
        assert_eq!(size, [Value::I32(2)]);
    }
}
