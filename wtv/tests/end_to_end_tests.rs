//! End-to-end scenarios: build a module, validate it, and exercise its
//! tables through the same instruction set.

use std::sync::{Arc, Mutex};

use rayon::prelude::*;
use wtv::prelude::*;

fn local_set_module(index: u32) -> Module {
    let mut module = Module::new();
    let ty = module.add_type(FuncType::new([], [ValueType::I32]));
    module.add_function(
        FunctionBody::new(ty)
            .with_locals(1, ValueType::I32)
            .with_locals(1, ValueType::F32)
            .with_code(0x19, [Instruction::LocalSet(index), Instruction::End]),
    );
    module
}

fn table_set_module(value: Instruction) -> Module {
    let mut module = Module::new();
    let ty = module.add_type(FuncType::default());
    module.add_table(TableType::new(RefType::FuncRef, Limits::new(1, Some(1))));
    module.add_function(FunctionBody::new(ty).with_code(
        0x2a,
        [Instruction::I32Const(0), value, Instruction::TableSet(0), Instruction::End],
    ));
    module
}

#[test]
fn local_set_on_empty_stack_is_reported_at_its_offset() {
    let diagnostic = validate_module(&local_set_module(0)).unwrap_err();
    assert_eq!(
        diagnostic.lines(),
        [
            "0000019: error: type mismatch in local.set, expected [i32] but got []",
            "0000019: error: OnLocalSetExpr callback failed",
        ]
    );
}

#[test]
fn local_set_past_declared_locals() {
    let diagnostic = validate_module(&local_set_module(2)).unwrap_err();
    assert_eq!(diagnostic.message(), "local variable out of range (max 2)");
    assert_eq!(diagnostic.callbacks().collect::<Vec<_>>(), ["OnLocalSetExpr"]);
}

#[test]
fn table_set_with_wrong_reference_type() {
    let module = table_set_module(Instruction::RefNull(RefType::ExternRef));
    let diagnostic = validate_module(&module).unwrap_err();
    assert_eq!(
        diagnostic.lines(),
        [
            "000002c: error: type mismatch in table.set, expected [i32, funcref] but got [i32, externref]",
            "000002c: error: OnTableSetExpr callback failed",
        ]
    );

    let module = table_set_module(Instruction::RefNull(RefType::FuncRef));
    assert!(validate_module(&module).is_ok());
}

#[test]
fn validated_table_set_traps_at_runtime() {
    let module = table_set_module(Instruction::RefFunc(0));
    validate_module(&module).unwrap();

    let mut store = TableStore::new();
    for table in &module.tables {
        store.add_table(*table).unwrap();
    }
    let trap = execute_table_instruction(
        &mut store,
        &Instruction::TableSet(0),
        [Value::I32(2), Value::FuncRef(Some(0))],
    )
    .unwrap_err();
    assert_eq!(trap.to_string(), "out of bounds table access: table.set at 2 >= max value 1");

    let trap = execute_table_instruction(
        &mut store,
        &Instruction::TableSet(0),
        [Value::I32(-1), Value::FuncRef(Some(0))],
    )
    .unwrap_err();
    assert_eq!(
        trap.to_string(),
        "out of bounds table access: table.set at 4294967295 >= max value 1"
    );

    execute_table_instruction(
        &mut store,
        &Instruction::TableSet(0),
        [Value::I32(0), Value::FuncRef(Some(0))],
    )
    .unwrap();
}

#[test]
fn verdicts_are_reported_through_the_log_registry() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut registry = LogRegistry::new().with_min_level(LogLevel::Debug);
    registry.register_log_handler(move |operation: &LogOperation| {
        sink.lock().unwrap().push((operation.level, operation.function_index));
    });

    let mut module = Module::new();
    let ty = module.add_type(FuncType::default());
    module.add_function(FunctionBody::new(ty).with_code(0, [Instruction::End]));
    module.add_function(FunctionBody::new(ty).with_code(0x10, [Instruction::Drop, Instruction::End]));
    module.add_function(FunctionBody::new(ty).with_code(0x20, [Instruction::End]));

    let report = ModuleValidator::default().with_logger(&registry).validate(&module);
    assert_eq!(report.verdicts(), [Verdict::Accepted, Verdict::Rejected, Verdict::Skipped]);
    assert_eq!(
        *seen.lock().unwrap(),
        [
            (LogLevel::Debug, Some(0)),
            (LogLevel::Error, Some(1)),
            (LogLevel::Warn, Some(2)),
        ]
    );
}

#[test]
fn concurrent_validation_is_idempotent() {
    let module = table_set_module(Instruction::RefNull(RefType::ExternRef));
    let expected = validate_module(&module).unwrap_err().to_string();

    let rendered: Vec<String> = (0..64)
        .into_par_iter()
        .map(|_| validate_module(&module).unwrap_err().to_string())
        .collect();
    assert!(rendered.iter().all(|text| *text == expected));
}

#[test]
fn parallel_report_matches_sequential() {
    let mut module = Module::new();
    let ty = module.add_type(FuncType::new([], [ValueType::I32]));
    for i in 0..32u64 {
        let code = if i == 11 || i == 23 {
            vec![Instruction::I64Const(0), Instruction::End]
        } else {
            vec![Instruction::I32Const(1), Instruction::End]
        };
        module.add_function(FunctionBody::new(ty).with_code(i * 0x10, code));
    }

    let sequential = ModuleValidator::new(ValidationConfig::default()).validate(&module);
    let parallel =
        ModuleValidator::new(ValidationConfig::default().with_parallel(true)).validate(&module);
    assert_eq!(sequential, parallel);
    assert_eq!(
        parallel.first_diagnostic().unwrap().to_string(),
        "00000b1: error: type mismatch in implicit return, expected [i32] but got [i64]\n\
         00000b1: error: EndFunctionBody callback failed"
    );
}
