// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use ionql_type::{Value, return_error};
use tracing::{debug, instrument};

use crate::{
	error::{Clause, EvaluationError},
	execute::{ExecutionContext, ExecutionPlan, QueryNode, RelationType},
	expression::CompiledExpr,
	register::Registers,
};

/// Evaluates a LIMIT or OFFSET argument. The type is checked first, then the
/// 64-bit range, then the sign.
pub(crate) fn row_count(clause: Clause, expr: &CompiledExpr, registers: &Registers) -> crate::Result<u64> {
	let value = match expr.evaluate(registers)? {
		Value::Int(value) => value,
		other => {
			let fragment = expr.fragment().clone();
			let actual = other.get_type();
			return_error!(match clause {
				Clause::Limit => EvaluationError::LimitNotInteger {
					fragment,
					actual,
				},
				Clause::Offset => EvaluationError::OffsetNotInteger {
					fragment,
					actual,
				},
			});
		}
	};

	let Some(count) = value.to_i64() else {
		return_error!(EvaluationError::IntegerOverflow {
			clause,
			fragment: expr.fragment().clone(),
			value: value.to_string(),
		});
	};

	match u64::try_from(count) {
		Ok(count) => Ok(count),
		Err(_) => {
			let fragment = expr.fragment().clone();
			let value = count.to_string();
			return_error!(match clause {
				Clause::Limit => EvaluationError::LimitNegative {
					fragment,
					value,
				},
				Clause::Offset => EvaluationError::OffsetNegative {
					fragment,
					value,
				},
			})
		}
	}
}

pub(crate) struct TakeNode<'a> {
	input: Box<ExecutionPlan<'a>>,
	count: &'a CompiledExpr,
	remaining: u64,
	initialized: Option<()>,
}

impl<'a> TakeNode<'a> {
	pub(crate) fn new(input: Box<ExecutionPlan<'a>>, count: &'a CompiledExpr) -> Self {
		Self {
			input,
			count,
			remaining: 0,
			initialized: None,
		}
	}
}

impl<'a> QueryNode for TakeNode<'a> {
	#[instrument(name = "query::take::initialize", level = "trace", skip_all)]
	fn initialize(&mut self, ctx: &mut ExecutionContext) -> crate::Result<()> {
		self.remaining = row_count(Clause::Limit, self.count, &ctx.registers)?;
		debug!(limit = self.remaining, "limit");

		self.input.initialize(ctx)?;
		self.initialized = Some(());
		Ok(())
	}

	#[instrument(name = "query::take::next", level = "trace", skip_all)]
	fn next(&mut self, ctx: &mut ExecutionContext) -> crate::Result<bool> {
		debug_assert!(self.initialized.is_some(), "TakeNode::next() called before initialize()");

		if self.remaining == 0 {
			return Ok(false);
		}

		if self.input.next(ctx)? {
			self.remaining -= 1;
			Ok(true)
		} else {
			self.remaining = 0;
			Ok(false)
		}
	}

	fn relation_type(&self) -> RelationType {
		self.input.relation_type()
	}
}
