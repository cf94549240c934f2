// WTV - wtv-runtime
// Module: Instruction Traits
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Traits for WebAssembly instruction implementation.
//!
//! Instruction implementations only see the context trait they are generic
//! over, never a concrete runtime.

/// Trait for pure instruction execution.
///
/// The context type is generic, allowing different execution engines to
/// provide their own context.
pub trait PureInstruction<T, E> {
    /// Executes the instruction with the given context.
    ///
    /// # Errors
    ///
    /// Returns `Err(E)` if the instruction traps or the context rejects it.
    fn execute(&self, context: &mut T) -> core::result::Result<(), E>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_pure_instruction_trait() {
        struct Counter {
            value: i32,
        }

        struct Increment;

        impl PureInstruction<Counter, Error> for Increment {
            fn execute(&self, context: &mut Counter) -> core::result::Result<(), Error> {
                context.value += 1;
                Ok(())
            }
        }

        let mut context = Counter { value: 0 };
        Increment.execute(&mut context).unwrap();
        assert_eq!(context.value, 1);
    }
}
