// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::instrument;

use crate::{
	execute::{ExecutionContext, ExecutionPlan, QueryNode, RelationType},
	plan::Binding,
};

pub(crate) struct LetNode<'a> {
	input: Box<ExecutionPlan<'a>>,
	bindings: &'a [Binding],
	initialized: Option<()>,
}

impl<'a> LetNode<'a> {
	pub(crate) fn new(input: Box<ExecutionPlan<'a>>, bindings: &'a [Binding]) -> Self {
		Self {
			input,
			bindings,
			initialized: None,
		}
	}
}

impl<'a> QueryNode for LetNode<'a> {
	#[instrument(name = "query::let::initialize", level = "trace", skip_all)]
	fn initialize(&mut self, ctx: &mut ExecutionContext) -> crate::Result<()> {
		self.input.initialize(ctx)?;
		self.initialized = Some(());
		Ok(())
	}

	#[instrument(name = "query::let::next", level = "trace", skip_all)]
	fn next(&mut self, ctx: &mut ExecutionContext) -> crate::Result<bool> {
		debug_assert!(self.initialized.is_some(), "LetNode::next() called before initialize()");

		if !self.input.next(ctx)? {
			return Ok(false);
		}

		for binding in self.bindings {
			let value = binding.expr.evaluate(&ctx.registers)?;
			binding.setter.set(&mut ctx.registers, value)?;
		}
		Ok(true)
	}

	fn relation_type(&self) -> RelationType {
		self.input.relation_type()
	}
}
