// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::RangeInclusive;

use ionql_type::{Value, internal_err, return_error};

use crate::{
	error::EvaluationError,
	expression::CompiledExpr,
	function::WindowFunction,
	register::{Registers, Snapshot},
};

#[derive(Debug, Clone, Copy)]
enum Direction {
	Backward,
	Forward,
}

/// Shared body of LAG and LEAD: `(expr [, offset [, default]])`.
#[derive(Debug)]
struct Navigation {
	name: &'static str,
	direction: Direction,
	partition: Vec<Snapshot>,
}

impl Navigation {
	fn offset(&self, registers: &Registers, arguments: &[CompiledExpr]) -> crate::Result<usize> {
		let Some(expr) = arguments.get(1) else {
			return Ok(1);
		};

		match expr.evaluate(registers)? {
			Value::Int(offset) => {
				if offset.is_negative() {
					return_error!(EvaluationError::LagLeadNegativeOffset {
						function: self.name.to_string(),
						fragment: expr.fragment().clone(),
						value: offset.to_string(),
					});
				}
				// offsets past usize::MAX always leave the partition
				Ok(offset.to_i64().and_then(|o| usize::try_from(o).ok()).unwrap_or(usize::MAX))
			}
			other => return_error!(EvaluationError::LagLeadOffsetNotInteger {
				function: self.name.to_string(),
				fragment: expr.fragment().clone(),
				actual: other.get_type(),
			}),
		}
	}

	fn process_row(&mut self, registers: &mut Registers, arguments: &[CompiledExpr], row: usize) -> crate::Result<Value> {
		let Some(expr) = arguments.first() else {
			return_error!(EvaluationError::WindowArgumentCount {
				function: self.name.to_string(),
				expected: "1 to 3".to_string(),
				actual: 0,
			});
		};

		let offset = self.offset(registers, arguments)?;
		let target = match self.direction {
			Direction::Backward => row.checked_sub(offset),
			Direction::Forward => row.checked_add(offset).filter(|target| *target < self.partition.len()),
		};

		match target {
			Some(target) => {
				let (Some(target), Some(current)) = (self.partition.get(target), self.partition.get(row)) else {
					return internal_err!(
						"{} row {} outside a partition of {} rows",
						self.name,
						row,
						self.partition.len()
					);
				};
				registers.load(target);
				let value = expr.evaluate(registers);
				registers.load(current);
				value
			}
			None => match arguments.get(2) {
				Some(default) => default.evaluate(registers),
				None => Ok(Value::Null),
			},
		}
	}
}

/// Value of `expr` `offset` rows before the current row within the partition.
#[derive(Debug)]
pub struct Lag(Navigation);

impl Lag {
	pub fn new() -> Self {
		Self(Navigation {
			name: "lag",
			direction: Direction::Backward,
			partition: Vec::new(),
		})
	}
}

impl Default for Lag {
	fn default() -> Self {
		Self::new()
	}
}

/// Value of `expr` `offset` rows after the current row within the partition.
#[derive(Debug)]
pub struct Lead(Navigation);

impl Lead {
	pub fn new() -> Self {
		Self(Navigation {
			name: "lead",
			direction: Direction::Forward,
			partition: Vec::new(),
		})
	}
}

impl Default for Lead {
	fn default() -> Self {
		Self::new()
	}
}

impl WindowFunction for Lag {
	fn reset(&mut self, partition: &[Snapshot]) {
		self.0.partition = partition.to_vec();
	}

	fn process_row(&mut self, registers: &mut Registers, arguments: &[CompiledExpr], row: usize) -> crate::Result<Value> {
		self.0.process_row(registers, arguments, row)
	}

	fn arity(&self) -> RangeInclusive<usize> {
		1..=3
	}
}

impl WindowFunction for Lead {
	fn reset(&mut self, partition: &[Snapshot]) {
		self.0.partition = partition.to_vec();
	}

	fn process_row(&mut self, registers: &mut Registers, arguments: &[CompiledExpr], row: usize) -> crate::Result<Value> {
		self.0.process_row(registers, arguments, row)
	}

	fn arity(&self) -> RangeInclusive<usize> {
		1..=3
	}
}
