// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::{instrument, trace};

use crate::{
	error::Clause,
	execute::{ExecutionContext, ExecutionPlan, QueryNode, RelationType, query::take::row_count},
	expression::CompiledExpr,
};

pub(crate) struct OffsetNode<'a> {
	input: Box<ExecutionPlan<'a>>,
	count: &'a CompiledExpr,
	skip: u64,
	initialized: Option<()>,
}

impl<'a> OffsetNode<'a> {
	pub(crate) fn new(input: Box<ExecutionPlan<'a>>, count: &'a CompiledExpr) -> Self {
		Self {
			input,
			count,
			skip: 0,
			initialized: None,
		}
	}
}

impl<'a> QueryNode for OffsetNode<'a> {
	#[instrument(name = "query::offset::initialize", level = "trace", skip_all)]
	fn initialize(&mut self, ctx: &mut ExecutionContext) -> crate::Result<()> {
		self.skip = row_count(Clause::Offset, self.count, &ctx.registers)?;

		self.input.initialize(ctx)?;
		self.initialized = Some(());
		Ok(())
	}

	#[instrument(name = "query::offset::next", level = "trace", skip_all)]
	fn next(&mut self, ctx: &mut ExecutionContext) -> crate::Result<bool> {
		debug_assert!(self.initialized.is_some(), "OffsetNode::next() called before initialize()");

		while self.skip > 0 {
			if !self.input.next(ctx)? {
				trace!(remaining = self.skip, "input exhausted while skipping");
				self.skip = 0;
				return Ok(false);
			}
			self.skip -= 1;
		}

		self.input.next(ctx)
	}

	fn relation_type(&self) -> RelationType {
		self.input.relation_type()
	}
}
