// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use ionql_type::{Value, internal_err};
use tracing::{instrument, trace};

use crate::{
	execute::{ExecutionContext, ExecutionPlan, QueryNode, RelationType, query::compile::compile},
	plan::{self, JoinKind, PhysicalPlan},
};

/// Nested loop join. The inner side is compiled and initialized afresh for
/// every outer row, so it may refer to variables the outer row bound.
pub(crate) struct JoinNode<'a> {
	node: &'a plan::JoinNode,
	outer: Box<ExecutionPlan<'a>>,
	inner_plan: &'a PhysicalPlan,
	inner: Option<Box<ExecutionPlan<'a>>>,
	matched: bool,
	initialized: Option<()>,
}

impl<'a> JoinNode<'a> {
	pub(crate) fn new(node: &'a plan::JoinNode, outer: Box<ExecutionPlan<'a>>, inner_plan: &'a PhysicalPlan) -> Self {
		Self {
			node,
			outer,
			inner_plan,
			inner: None,
			matched: false,
			initialized: None,
		}
	}
}

fn matches(node: &plan::JoinNode, ctx: &ExecutionContext) -> crate::Result<bool> {
	match &node.condition {
		Some(condition) => Ok(condition.evaluate(&ctx.registers)?.is_true()),
		None => Ok(true),
	}
}

impl<'a> QueryNode for JoinNode<'a> {
	#[instrument(name = "query::join::initialize", level = "trace", skip_all)]
	fn initialize(&mut self, ctx: &mut ExecutionContext) -> crate::Result<()> {
		self.outer.initialize(ctx)?;
		self.initialized = Some(());
		Ok(())
	}

	#[instrument(name = "query::join::next", level = "trace", skip_all)]
	fn next(&mut self, ctx: &mut ExecutionContext) -> crate::Result<bool> {
		debug_assert!(self.initialized.is_some(), "JoinNode::next() called before initialize()");

		loop {
			if self.inner.is_none() {
				if !self.outer.next(ctx)? {
					return Ok(false);
				}
				let mut inner = compile(self.inner_plan, &ctx.config)?;
				inner.initialize(ctx)?;
				self.inner = Some(inner);
				self.matched = false;
			}

			let Some(inner) = self.inner.as_mut() else {
				return internal_err!("{} join lost its inner iterator", self.node.kind);
			};

			while inner.next(ctx)? {
				if matches(self.node, ctx)? {
					self.matched = true;
					return Ok(true);
				}
			}

			self.inner = None;

			if !self.matched && self.node.kind != JoinKind::Inner {
				trace!(kind = %self.node.kind, "null extending unmatched row");
				for setter in &self.node.null_extension {
					setter.set(&mut ctx.registers, Value::Null)?;
				}
				return Ok(true);
			}
		}
	}

	fn relation_type(&self) -> RelationType {
		RelationType::Bag
	}
}
