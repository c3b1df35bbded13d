// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::instrument;

use crate::{
	execute::{ExecutionContext, ExecutionPlan, QueryNode, RelationType},
	expression::CompiledExpr,
};

pub(crate) struct FilterNode<'a> {
	input: Box<ExecutionPlan<'a>>,
	predicate: &'a CompiledExpr,
	initialized: Option<()>,
}

impl<'a> FilterNode<'a> {
	pub(crate) fn new(input: Box<ExecutionPlan<'a>>, predicate: &'a CompiledExpr) -> Self {
		Self {
			input,
			predicate,
			initialized: None,
		}
	}
}

impl<'a> QueryNode for FilterNode<'a> {
	#[instrument(name = "query::filter::initialize", level = "trace", skip_all)]
	fn initialize(&mut self, ctx: &mut ExecutionContext) -> crate::Result<()> {
		self.input.initialize(ctx)?;
		self.initialized = Some(());
		Ok(())
	}

	#[instrument(name = "query::filter::next", level = "trace", skip_all)]
	fn next(&mut self, ctx: &mut ExecutionContext) -> crate::Result<bool> {
		debug_assert!(self.initialized.is_some(), "FilterNode::next() called before initialize()");

		while self.input.next(ctx)? {
			// NULL, MISSING and non-boolean results reject the row
			if self.predicate.evaluate(&ctx.registers)?.is_true() {
				return Ok(true);
			}
		}
		Ok(false)
	}

	fn relation_type(&self) -> RelationType {
		self.input.relation_type()
	}
}
