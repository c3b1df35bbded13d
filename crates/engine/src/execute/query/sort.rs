// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::vec::IntoIter;

use ionql_type::Value;
use tracing::{debug, instrument};

use crate::{
	execute::{ExecutionContext, ExecutionPlan, QueryNode, RelationType},
	expression::CompiledExpr,
	register::Snapshot,
	sort_key::{Comparator, SortKey, compare_keys},
};

pub(crate) struct SortNode<'a> {
	input: Box<ExecutionPlan<'a>>,
	keys: &'a [SortKey],
	sorted: Option<IntoIter<Snapshot>>,
	initialized: Option<()>,
}

impl<'a> SortNode<'a> {
	pub(crate) fn new(input: Box<ExecutionPlan<'a>>, keys: &'a [SortKey]) -> Self {
		Self {
			input,
			keys,
			sorted: None,
			initialized: None,
		}
	}
}

/// Drains `input`, evaluating every key once per row, and returns the rows
/// in stable key order.
pub(crate) fn materialize_sorted(
	input: &mut ExecutionPlan<'_>,
	ctx: &mut ExecutionContext,
	keys: &[&CompiledExpr],
	comparators: &[Comparator],
	operator: &'static str,
) -> crate::Result<Vec<(Snapshot, Vec<Value>)>> {
	let mut rows = Vec::new();

	while input.next(ctx)? {
		ctx.config.check_materialized(operator, rows.len() + 1)?;
		let values = keys.iter().map(|key| key.evaluate(&ctx.registers)).collect::<crate::Result<Vec<_>>>()?;
		rows.push((ctx.registers.snapshot(), values));
	}

	rows.sort_by(|(_, l), (_, r)| compare_keys(comparators, l, r));
	Ok(rows)
}

impl<'a> QueryNode for SortNode<'a> {
	#[instrument(name = "query::sort::initialize", level = "trace", skip_all)]
	fn initialize(&mut self, ctx: &mut ExecutionContext) -> crate::Result<()> {
		self.input.initialize(ctx)?;
		self.initialized = Some(());
		Ok(())
	}

	#[instrument(name = "query::sort::next", level = "trace", skip_all)]
	fn next(&mut self, ctx: &mut ExecutionContext) -> crate::Result<bool> {
		debug_assert!(self.initialized.is_some(), "SortNode::next() called before initialize()");

		if self.sorted.is_none() {
			let exprs: Vec<_> = self.keys.iter().map(|key| &key.expr).collect();
			let comparators: Vec<_> = self.keys.iter().map(|key| key.comparator).collect();

			let rows = materialize_sorted(self.input.as_mut(), ctx, &exprs, &comparators, "SORT")?;
			debug!(rows = rows.len(), keys = self.keys.len(), "sorted");

			self.sorted = Some(rows.into_iter().map(|(row, _)| row).collect::<Vec<_>>().into_iter());
		}

		match self.sorted.as_mut().and_then(Iterator::next) {
			Some(row) => {
				ctx.registers.load(&row);
				Ok(true)
			}
			None => Ok(false),
		}
	}

	fn relation_type(&self) -> RelationType {
		RelationType::List
	}
}
