// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::RangeInclusive;

use ionql_type::Value;

use crate::{
	expression::CompiledExpr,
	function::WindowFunction,
	register::{Registers, Snapshot},
};

/// 1-based position of the row inside its partition.
#[derive(Debug, Default)]
pub struct RowNumber;

impl RowNumber {
	pub fn new() -> Self {
		Self
	}
}

impl WindowFunction for RowNumber {
	fn reset(&mut self, _partition: &[Snapshot]) {}

	fn process_row(&mut self, _registers: &mut Registers, _arguments: &[CompiledExpr], row: usize) -> crate::Result<Value> {
		Ok(Value::int(row as u64 + 1))
	}

	fn arity(&self) -> RangeInclusive<usize> {
		0..=0
	}
}
