// WTV - wtv-validator
// Module: Local Variable Index Space
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Per-function local index space: parameters first, then declared locals.

use crate::prelude::*;

/// Index into the local index space of a function
pub type LocalIdx = u32;

/// Local variable types of one function body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalSpace {
    types: Vec<ValueType>,
}

impl LocalSpace {
    /// Build the index space from the signature's parameters and the body's
    /// `(count, type)` local declarations
    ///
    /// # Errors
    ///
    /// Fails with `local count too large: N` when the total slot count
    /// exceeds `max_locals`.
    pub fn new(params: &[ValueType], declared: &[(u32, ValueType)], max_locals: u32) -> Result<Self> {
        let total = declared
            .iter()
            .fold(params.len() as u64, |acc, (count, _)| acc + u64::from(*count));
        if total > u64::from(max_locals) {
            return Err(Error::capacity(
                codes::TOO_MANY_LOCALS,
                format!("local count too large: {total}"),
            ));
        }

        let mut types = Vec::with_capacity(total as usize);
        types.extend_from_slice(params);
        for (count, ty) in declared {
            types.extend(core::iter::repeat(*ty).take(*count as usize));
        }
        Ok(Self { types })
    }

    /// Declared type of local `index`
    pub fn type_of(&self, index: LocalIdx) -> Result<ValueType> {
        self.types
            .get(index as usize)
            .copied()
            .ok_or_else(|| kinds::local_out_of_range(self.len()))
    }

    /// Number of local slots
    #[must_use]
    pub fn len(&self) -> u32 {
        // Bounded by `max_locals` at construction.
        u32::try_from(self.types.len()).unwrap_or(u32::MAX)
    }

    /// Whether the function has no locals and no parameters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_precede_declared_locals() {
        let locals = LocalSpace::new(
            &[ValueType::I64],
            &[(2, ValueType::F32), (1, ValueType::ExternRef)],
            16,
        )
        .unwrap();
        assert_eq!(locals.len(), 4);
        assert_eq!(locals.type_of(0).unwrap(), ValueType::I64);
        assert_eq!(locals.type_of(2).unwrap(), ValueType::F32);
        assert_eq!(locals.type_of(3).unwrap(), ValueType::ExternRef);
    }

    #[test]
    fn test_out_of_range_reports_slot_count() {
        let locals = LocalSpace::new(&[], &[(1, ValueType::I32), (1, ValueType::F32)], 16).unwrap();
        assert_eq!(locals.type_of(2).unwrap_err().message(), "local variable out of range (max 2)");
        assert!(locals.type_of(1).is_ok());
    }

    #[test]
    fn test_local_count_limit() {
        let err = LocalSpace::new(&[ValueType::I32], &[(u32::MAX, ValueType::I32)], 50_000)
            .unwrap_err();
        assert_eq!(err.message(), "local count too large: 4294967296");
        assert!(err.is_validation_error());
    }
}
