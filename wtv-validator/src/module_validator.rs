// WTV - wtv-validator
// Module: Module Validation
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Whole-module validation.
//!
//! Declarations are checked first, then every function body with fresh
//! per-function state. Validation is fail-fast: once a body is rejected the
//! remaining ones are reported as skipped. With
//! [`ValidationConfig::parallel`] the bodies are checked on scoped threads,
//! and the report is assembled exactly as a sequential run would produce it.

use wtv_logging::{LogLevel, LogOperation, LogRegistry};

use crate::{
    config::ValidationConfig,
    module::{ElementMode, Module},
    prelude::*,
    validator::validate_function,
};

/// Outcome for one defined function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The body type checks
    Accepted,
    /// The body violates a rule, see the report's diagnostic
    Rejected,
    /// Not validated because validation already failed
    Skipped,
}

/// Per-function verdicts and the diagnostics of a validation run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    verdicts:    Vec<Verdict>,
    diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// Whether the module was accepted
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Verdicts in defined-function order (imports excluded)
    #[must_use]
    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    /// Diagnostics in the order they were found; empty on success
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The diagnostic that rejected the module
    #[must_use]
    pub fn first_diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostics.first()
    }

    /// Collapse into an accept/reject result
    pub fn into_result(self) -> core::result::Result<(), Diagnostic> {
        match self.diagnostics.into_iter().next() {
            Some(diagnostic) => Err(diagnostic),
            None => Ok(()),
        }
    }
}

/// Validates whole modules under one configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleValidator<'l> {
    config: ValidationConfig,
    logger: Option<&'l LogRegistry>,
}

impl ModuleValidator<'static> {
    /// Validator with the given configuration and no log registry
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            config,
            logger: None,
        }
    }
}

impl<'l> ModuleValidator<'l> {
    /// Report per-function outcomes to `registry`
    #[must_use]
    pub fn with_logger<'n>(self, registry: &'n LogRegistry) -> ModuleValidator<'n> {
        ModuleValidator {
            config: self.config,
            logger: Some(registry),
        }
    }

    /// The configuration in use
    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Check the module's declarations
    ///
    /// # Errors
    ///
    /// Returns an unlocated diagnostic for the first invalid declaration.
    pub fn validate_declarations(&self, module: &Module) -> core::result::Result<(), Diagnostic> {
        for &type_index in &module.imported_functions {
            module.func_type(type_index).map_err(|e| declaration(e, "OnImportFunc"))?;
        }
        for body in &module.functions {
            module.func_type(body.type_index).map_err(|e| declaration(e, "OnFunction"))?;
        }
        for table in &module.tables {
            table.limits.validate().map_err(|e| declaration(e, "OnTable"))?;
        }
        for memory in &module.memories {
            memory.validate().map_err(|e| declaration(e, "OnMemory"))?;
        }
        for segment in &module.elements {
            check_segment(module, segment).map_err(|e| declaration(e, "BeginElemSegment"))?;
        }
        Ok(())
    }

    /// Validate `module`, producing a per-function report
    #[must_use]
    pub fn validate(&self, module: &Module) -> ValidationReport {
        let imported = module.imported_functions.len();
        log::debug!(
            "validating module: {} types, {} imported and {} defined functions",
            module.types.len(),
            imported,
            module.functions.len()
        );

        if let Err(diagnostic) = self.validate_declarations(module) {
            self.log(LogOperation::new(LogLevel::Error, diagnostic.to_string()));
            return ValidationReport {
                verdicts:    vec![Verdict::Skipped; module.functions.len()],
                diagnostics: vec![diagnostic],
            };
        }

        let outcomes = self.validate_bodies(module);
        let mut report = ValidationReport::default();
        for position in 0..module.functions.len() {
            let index = u32::try_from(imported + position).unwrap_or(u32::MAX);
            let verdict = match outcomes.get(position) {
                _ if !report.diagnostics.is_empty() => Verdict::Skipped,
                Some(Ok(())) => Verdict::Accepted,
                Some(Err(diagnostic)) => {
                    report.diagnostics.push(diagnostic.clone());
                    Verdict::Rejected
                }
                None => Verdict::Skipped,
            };
            self.log_verdict(index, verdict, report.first_diagnostic());
            report.verdicts.push(verdict);
        }
        report
    }

    fn validate_bodies(&self, module: &Module) -> Vec<core::result::Result<(), Diagnostic>> {
        #[cfg(feature = "std")]
        if self.config.parallel && module.functions.len() > 1 {
            return self.validate_bodies_parallel(module);
        }

        let mut outcomes = Vec::with_capacity(module.functions.len());
        for body in &module.functions {
            let outcome = validate_function(module, body, &self.config);
            let failed = outcome.is_err();
            outcomes.push(outcome);
            if failed {
                break;
            }
        }
        outcomes
    }

    #[cfg(feature = "std")]
    fn validate_bodies_parallel(
        &self,
        module: &Module,
    ) -> Vec<core::result::Result<(), Diagnostic>> {
        let workers = std::thread::available_parallelism()
            .map_or(1, core::num::NonZeroUsize::get)
            .min(module.functions.len())
            .max(1);
        let chunk_size = module.functions.len().div_ceil(workers);
        let config = self.config;
        log::trace!("validating function bodies on {workers} threads");

        std::thread::scope(|scope| {
            let handles: Vec<_> = module
                .functions
                .chunks(chunk_size)
                .map(|bodies| {
                    scope.spawn(move || {
                        bodies
                            .iter()
                            .map(|body| validate_function(module, body, &config))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(outcomes) => outcomes,
                    Err(payload) => std::panic::resume_unwind(payload),
                })
                .collect()
        })
    }

    fn log_verdict(&self, index: u32, verdict: Verdict, diagnostic: Option<&Diagnostic>) {
        let operation = match (verdict, diagnostic) {
            (Verdict::Accepted, _) => LogOperation::for_function(LogLevel::Debug, index, "accepted"),
            (Verdict::Rejected, Some(diagnostic)) => LogOperation::for_function(
                LogLevel::Error,
                index,
                format!("rejected: {}", diagnostic.message()),
            ),
            (Verdict::Rejected, None) => {
                LogOperation::for_function(LogLevel::Error, index, "rejected")
            }
            (Verdict::Skipped, _) => LogOperation::for_function(
                LogLevel::Warn,
                index,
                "skipped after an earlier failure",
            ),
        };
        self.log(operation);
    }

    fn log(&self, operation: LogOperation) {
        if let Some(registry) = self.logger {
            registry.handle_log(&operation);
        }
    }
}

fn declaration(error: Error, callback: &'static str) -> Diagnostic {
    Diagnostic::unlocated(error).with_callback(callback)
}

fn check_segment(module: &Module, segment: &crate::module::ElementSegment) -> Result<()> {
    if let ElementMode::Active { table } = segment.mode {
        let table = module.table(table)?.element_type;
        if table != segment.element_type {
            return Err(kinds::type_mismatch("elem segment", [table], [segment.element_type]));
        }
    }
    for &function in &segment.functions {
        module.function_type(function)?;
    }
    Ok(())
}

/// Validate `module` with the default configuration
///
/// # Errors
///
/// Returns the diagnostic that rejected the module.
pub fn validate_module(module: &Module) -> core::result::Result<(), Diagnostic> {
    validate_module_with_config(module, &ValidationConfig::default())
}

/// Validate `module` with an explicit configuration
///
/// # Errors
///
/// Returns the diagnostic that rejected the module.
pub fn validate_module_with_config(
    module: &Module,
    config: &ValidationConfig,
) -> core::result::Result<(), Diagnostic> {
    ModuleValidator::new(*config).validate(module).into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{instructions::Instruction, module::FunctionBody};

    fn returns_i32(module: &mut Module) -> TypeIdx {
        module.add_type(FuncType::new([], [ValueType::I32]))
    }

    #[test]
    fn test_rejected_function_skips_the_rest() {
        let mut module = Module::new();
        let ty = returns_i32(&mut module);
        module.add_function(FunctionBody::new(ty).with_code(0, [Instruction::I32Const(1), Instruction::End]));
        module.add_function(FunctionBody::new(ty).with_code(0x10, [Instruction::End]));
        module.add_function(FunctionBody::new(ty).with_code(0x20, [Instruction::I32Const(1), Instruction::End]));

        let report = ModuleValidator::default().validate(&module);
        assert!(!report.is_valid());
        assert_eq!(report.verdicts(), [Verdict::Accepted, Verdict::Rejected, Verdict::Skipped]);
        assert_eq!(report.diagnostics().len(), 1);
    }

    #[test]
    fn test_declaration_errors_skip_every_body() {
        let mut module = Module::new();
        module.add_function(FunctionBody::new(3).with_code(0, [Instruction::End]));
        let report = ModuleValidator::default().validate(&module);
        assert_eq!(report.verdicts(), [Verdict::Skipped]);
        assert_eq!(
            report.first_diagnostic().unwrap().to_string(),
            "error: type variable out of range: 3 (max 0)\nerror: OnFunction callback failed"
        );
    }

    #[test]
    fn test_table_and_memory_limits() {
        let mut module = Module::new();
        module.add_table(TableType::new(RefType::FuncRef, Limits::new(2, Some(1))));
        assert_eq!(
            validate_module(&module).unwrap_err().message(),
            "size minimum must not be greater than maximum"
        );

        let mut module = Module::new();
        module.add_memory(MemoryType::new(Limits::new(70_000, None)));
        assert_eq!(
            validate_module(&module).unwrap_err().message(),
            "initial pages (70000) must be <= (65536)"
        );
    }

    #[test]
    fn test_active_segment_must_match_table() {
        let mut module = Module::new();
        let table = module.add_table(TableType::new(RefType::ExternRef, Limits::new(1, None)));
        module.add_element(crate::module::ElementSegment {
            element_type: RefType::FuncRef,
            mode:         ElementMode::Active { table },
            functions:    Vec::new(),
        });
        assert_eq!(
            validate_module(&module).unwrap_err().message(),
            "type mismatch in elem segment, expected [externref] but got [funcref]"
        );
    }
}
