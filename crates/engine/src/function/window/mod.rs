// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::RangeInclusive;

use ionql_type::Value;

use crate::{
	expression::CompiledExpr,
	register::{Registers, Snapshot},
};

mod navigation;
mod row_number;

pub use navigation::{Lag, Lead};
pub use row_number::RowNumber;

/// Per-partition state of one window function call.
///
/// `reset` is called with every row of a partition before the first
/// `process_row` for that partition. `process_row` receives the registers
/// holding row `row` of the partition and must leave them that way.
pub trait WindowFunction: Send {
	fn reset(&mut self, partition: &[Snapshot]);

	fn process_row(&mut self, registers: &mut Registers, arguments: &[CompiledExpr], row: usize) -> crate::Result<Value>;

	/// Accepted argument counts, checked when the plan is built.
	fn arity(&self) -> RangeInclusive<usize> {
		0..=usize::MAX
	}
}
