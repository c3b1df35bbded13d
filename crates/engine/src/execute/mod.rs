// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use ionql_type::Value;
use query::compile::compile;
use tracing::{debug, instrument};

use crate::{config::ExecutionConfig, expression::CompiledExpr, plan::Plan, register::Registers};

mod query;

/// Ordering guarantee of a row stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationType {
	/// No ordering downstream may rely on.
	Bag,
	/// Ordering must be preserved.
	List,
}

pub struct ExecutionContext {
	pub registers: Registers,
	pub config: Arc<ExecutionConfig>,
}

/// Pull-based, single pass cursor over rows. A `true` from `next` means the
/// context's registers now hold the next row; `false` means the stream ended.
pub(crate) trait QueryNode {
	fn initialize(&mut self, ctx: &mut ExecutionContext) -> crate::Result<()>;

	fn next(&mut self, ctx: &mut ExecutionContext) -> crate::Result<bool>;

	fn relation_type(&self) -> RelationType;
}

pub(crate) type ExecutionPlan<'a> = dyn QueryNode + 'a;

#[derive(Debug, Clone, Default)]
pub struct Executor {
	config: Arc<ExecutionConfig>,
}

impl Executor {
	pub fn new(config: ExecutionConfig) -> Self {
		Self {
			config: Arc::new(config),
		}
	}

	pub fn config(&self) -> &ExecutionConfig {
		&self.config
	}

	/// Builds a fresh iterator tree over `plan` and initializes it. Row count
	/// validation happens here, before any row is produced.
	#[instrument(name = "execute", level = "debug", skip_all)]
	pub fn execute<'a>(&self, plan: &'a Plan) -> crate::Result<Relation<'a>> {
		let mut ctx = ExecutionContext {
			registers: Registers::new(plan.register_count),
			config: self.config.clone(),
		};

		let mut root = compile(&plan.root, &self.config)?;
		root.initialize(&mut ctx)?;

		debug!(registers = plan.register_count, relation = ?root.relation_type(), "execution started");

		Ok(Relation {
			root,
			ctx,
			exhausted: false,
		})
	}
}

/// The result of one execution. Rows are produced on demand.
pub struct Relation<'a> {
	root: Box<ExecutionPlan<'a>>,
	ctx: ExecutionContext,
	exhausted: bool,
}

impl<'a> Relation<'a> {
	pub fn relation_type(&self) -> RelationType {
		self.root.relation_type()
	}

	/// Advances to the next row. Once the end is reached, keeps returning `None`.
	pub fn next(&mut self) -> crate::Result<Option<&Registers>> {
		if self.exhausted {
			return Ok(None);
		}

		if self.root.next(&mut self.ctx)? {
			Ok(Some(&self.ctx.registers))
		} else {
			self.exhausted = true;
			Ok(None)
		}
	}

	/// Projects every remaining row through `projection`, producing a LIST
	/// for ordered relations and a BAG otherwise.
	pub fn collect(mut self, projection: &CompiledExpr) -> crate::Result<Value> {
		let mut values = Vec::new();
		while let Some(registers) = self.next()? {
			values.push(projection.evaluate(registers)?);
		}

		debug!(rows = values.len(), "execution finished");

		Ok(match self.relation_type() {
			RelationType::List => Value::List(values),
			RelationType::Bag => Value::Bag(values),
		})
	}
}
