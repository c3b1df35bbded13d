// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::{IndexMap, map::Entry};
use ionql_type::Value;
use tracing::{debug, instrument};

use crate::{
	execute::{ExecutionContext, ExecutionPlan, QueryNode, RelationType},
	function::Accumulator,
	plan::{self, AggregateCall},
};

type Groups = IndexMap<Vec<Value>, Vec<Accumulator>>;

pub(crate) struct AggregateNode<'a> {
	input: Box<ExecutionPlan<'a>>,
	node: &'a plan::AggregateNode,
	groups: Option<indexmap::map::IntoIter<Vec<Value>, Vec<Accumulator>>>,
	initialized: Option<()>,
}

impl<'a> AggregateNode<'a> {
	pub(crate) fn new(input: Box<ExecutionPlan<'a>>, node: &'a plan::AggregateNode) -> Self {
		Self {
			input,
			node,
			groups: None,
			initialized: None,
		}
	}

	/// Drains the input into one accumulator set per value-equal key tuple.
	fn accumulate(&mut self, ctx: &mut ExecutionContext) -> crate::Result<Groups> {
		let mut groups = Groups::new();
		let mut rows = 0usize;

		while self.input.next(ctx)? {
			rows += 1;

			let key = self
				.node
				.keys
				.iter()
				.map(|key| key.expr.evaluate(&ctx.registers))
				.collect::<crate::Result<Vec<_>>>()?;

			let accumulators = match groups.entry(key) {
				Entry::Occupied(entry) => entry.into_mut(),
				Entry::Vacant(entry) => {
					ctx.config.check_materialized("AGGREGATE", entry.index() + 1)?;
					entry.insert(fresh_accumulators(&self.node.calls))
				}
			};

			for (call, accumulator) in self.node.calls.iter().zip(accumulators.iter_mut()) {
				let value = call.argument.evaluate(&ctx.registers)?;
				accumulator.next(&value)?;
			}
		}

		// without GROUP BY an empty input still yields one row
		if groups.is_empty() && self.node.keys.is_empty() {
			groups.insert(Vec::new(), fresh_accumulators(&self.node.calls));
		}

		debug!(rows, groups = groups.len(), "aggregated");
		Ok(groups)
	}
}

fn fresh_accumulators(calls: &[AggregateCall]) -> Vec<Accumulator> {
	calls.iter().map(|call| Accumulator::new(call.kind, call.quantifier)).collect()
}

impl<'a> QueryNode for AggregateNode<'a> {
	#[instrument(name = "query::aggregate::initialize", level = "trace", skip_all)]
	fn initialize(&mut self, ctx: &mut ExecutionContext) -> crate::Result<()> {
		self.input.initialize(ctx)?;
		self.initialized = Some(());
		Ok(())
	}

	#[instrument(name = "query::aggregate::next", level = "trace", skip_all)]
	fn next(&mut self, ctx: &mut ExecutionContext) -> crate::Result<bool> {
		debug_assert!(self.initialized.is_some(), "AggregateNode::next() called before initialize()");

		if self.groups.is_none() {
			self.groups = Some(self.accumulate(ctx)?.into_iter());
		}

		let Some((key, accumulators)) = self.groups.as_mut().and_then(Iterator::next) else {
			return Ok(false);
		};

		for (group_key, value) in self.node.keys.iter().zip(key) {
			group_key.setter.set(&mut ctx.registers, value)?;
		}
		for (call, accumulator) in self.node.calls.iter().zip(accumulators) {
			call.setter.set(&mut ctx.registers, accumulator.compute())?;
		}

		Ok(true)
	}

	fn relation_type(&self) -> RelationType {
		RelationType::Bag
	}
}
