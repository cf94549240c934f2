// WTV - wtv-runtime
// Module: Table
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly table implementation.
//!
//! A table is a vector of references of a single type. Every access is
//! bounds checked against the current size; an out-of-range access traps
//! and leaves the table untouched.

use crate::prelude::*;

/// Hard cap on the number of elements a table may grow to, regardless of
/// its declared maximum
pub const MAX_TABLE_SIZE: u32 = 10_000_000;

/// A WebAssembly table is a vector of opaque values of a single type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    ty:       TableType,
    elements: Vec<Value>,
}

impl Table {
    /// Creates a table of `ty.limits.min` null references
    ///
    /// # Errors
    ///
    /// Returns an error if the limits are invalid or the initial size
    /// exceeds [`MAX_TABLE_SIZE`].
    pub fn new(ty: TableType) -> Result<Self> {
        let init = Value::null_for(ty.element_type);
        Self::with_init(ty, init)
    }

    /// Creates a table of `ty.limits.min` copies of `init`
    ///
    /// # Errors
    ///
    /// Returns an error if the limits are invalid, the initial size is too
    /// large, or `init` is not of the element type.
    pub fn with_init(ty: TableType, init: Value) -> Result<Self> {
        ty.limits.validate()?;
        if ty.limits.min > MAX_TABLE_SIZE {
            return Err(kinds::limit_exceeded(
                codes::INVALID_LIMITS,
                "table size",
                MAX_TABLE_SIZE as usize,
            ));
        }
        check_element(ty.element_type, &init)?;
        Ok(Self {
            ty,
            elements: vec![init; ty.limits.min as usize],
        })
    }

    /// The table's declared type
    #[must_use]
    pub fn ty(&self) -> &TableType {
        &self.ty
    }

    /// Current number of elements
    #[must_use]
    pub fn size(&self) -> u32 {
        u32::try_from(self.elements.len()).unwrap_or(u32::MAX)
    }

    /// Element at `idx`
    ///
    /// # Errors
    ///
    /// Traps if `idx` is not below the current size.
    pub fn get(&self, idx: u32) -> Result<Value> {
        self.elements
            .get(idx as usize)
            .copied()
            .ok_or_else(|| kinds::table_access_out_of_bounds("table.get", idx, self.size()))
    }

    /// Store `value` at `idx`
    ///
    /// # Errors
    ///
    /// Traps if `idx` is not below the current size. Fails with a type error
    /// if `value` is not of the element type.
    pub fn set(&mut self, idx: u32, value: Value) -> Result<()> {
        check_element(self.ty.element_type, &value)?;
        let size = self.size();
        let slot = self
            .elements
            .get_mut(idx as usize)
            .ok_or_else(|| kinds::table_access_out_of_bounds("table.set", idx, size))?;
        *slot = value;
        Ok(())
    }

    /// Grows the table by `delta` elements initialized to `init`
    ///
    /// Returns the previous size, or `None` if the new size would exceed
    /// the declared maximum or [`MAX_TABLE_SIZE`]. A failed grow leaves the
    /// table unchanged.
    ///
    /// # Errors
    ///
    /// Returns a type error if `init` is not of the element type.
    pub fn grow(&mut self, delta: u32, init: Value) -> Result<Option<u32>> {
        check_element(self.ty.element_type, &init)?;
        let old_size = self.size();
        let limit = self.ty.limits.max.unwrap_or(u32::MAX).min(MAX_TABLE_SIZE);
        match old_size.checked_add(delta) {
            Some(new_size) if new_size <= limit => {
                self.elements.resize(new_size as usize, init);
                Ok(Some(old_size))
            }
            _ => Ok(None),
        }
    }

    /// Set `len` elements starting at `offset` to `value`
    ///
    /// # Errors
    ///
    /// Traps if the range extends past the current size.
    pub fn fill(&mut self, offset: u32, value: Value, len: u32) -> Result<()> {
        check_element(self.ty.element_type, &value)?;
        let range = self.range("table.fill", offset, len)?;
        self.elements[range].fill(value);
        Ok(())
    }

    /// Copy `len` elements from `src` to `dst` within this table
    ///
    /// Overlapping ranges copy as if through a temporary buffer.
    ///
    /// # Errors
    ///
    /// Traps if either range extends past the current size.
    pub fn copy_within(&mut self, dst: u32, src: u32, len: u32) -> Result<()> {
        let source = self.range("table.copy", src, len)?;
        let target = self.range("table.copy", dst, len)?;
        self.elements.copy_within(source, target.start);
        Ok(())
    }

    /// Copy `len` elements from `src` of `source` to `dst` of this table
    ///
    /// # Errors
    ///
    /// Traps if either range is out of bounds. Fails with a type error if
    /// the element types differ.
    pub fn copy_from(&mut self, dst: u32, source: &Table, src: u32, len: u32) -> Result<()> {
        if source.ty.element_type != self.ty.element_type {
            return Err(Error::new(
                ErrorCategory::Type,
                codes::TABLE_TYPE_MISMATCH,
                format!(
                    "type mismatch in table.copy: {} table into {} table",
                    source.ty.element_type, self.ty.element_type
                ),
            ));
        }
        let from = source.range("table.copy", src, len)?;
        let target = self.range("table.copy", dst, len)?;
        self.elements[target].copy_from_slice(&source.elements[from]);
        Ok(())
    }

    /// Copy `len` items starting at `src` of `segment` to `dst`
    ///
    /// # Errors
    ///
    /// Traps if the source range exceeds the segment or the target range
    /// exceeds the table. Fails with a type error if an item is not of the
    /// element type.
    pub fn init(&mut self, dst: u32, segment: &[Value], src: u32, len: u32) -> Result<()> {
        let from = checked_range("table.init", src, len, segment.len())?;
        let target = self.range("table.init", dst, len)?;
        let items = &segment[from];
        for item in items {
            check_element(self.ty.element_type, item)?;
        }
        self.elements[target].copy_from_slice(items);
        Ok(())
    }

    fn range(&self, op: &str, start: u32, len: u32) -> Result<core::ops::Range<usize>> {
        checked_range(op, start, len, self.elements.len())
    }
}

fn checked_range(op: &str, start: u32, len: u32, bound: usize) -> Result<core::ops::Range<usize>> {
    let end = u64::from(start) + u64::from(len);
    if end > bound as u64 {
        return Err(kinds::table_range_out_of_bounds(op));
    }
    Ok(start as usize..end as usize)
}

fn check_element(element_type: RefType, value: &Value) -> Result<()> {
    if value.matches_type(element_type.to_value_type()) {
        Ok(())
    } else {
        Err(Error::new(
            ErrorCategory::Type,
            codes::TABLE_TYPE_MISMATCH,
            format!("type mismatch: expected {element_type}, got {}", value.value_type()),
        ))
    }
}
