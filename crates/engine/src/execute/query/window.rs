// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{iter, vec::IntoIter};

use ionql_type::{NullOrder, Value, internal_err};
use tracing::{debug, instrument};

use crate::{
	execute::{ExecutionContext, ExecutionPlan, QueryNode, RelationType, query::sort::materialize_sorted},
	expression::CompiledExpr,
	function::WindowFunction,
	plan,
	register::Snapshot,
	sort_key::{Comparator, SortDirection},
};

pub(crate) struct WindowNode<'a> {
	input: Box<ExecutionPlan<'a>>,
	node: &'a plan::WindowNode,
	functions: Vec<Box<dyn WindowFunction>>,
	partitions: Option<IntoIter<Vec<Snapshot>>>,
	current: Vec<Snapshot>,
	position: usize,
	initialized: Option<()>,
}

impl<'a> WindowNode<'a> {
	pub(crate) fn new(input: Box<ExecutionPlan<'a>>, node: &'a plan::WindowNode) -> Self {
		Self {
			input,
			node,
			functions: node.calls.iter().map(|call| call.instantiate()).collect(),
			partitions: None,
			current: Vec::new(),
			position: 0,
			initialized: None,
		}
	}

	/// Sorts the whole input by partition keys, then ORDER BY keys, and cuts
	/// it wherever the partition key tuple changes.
	fn partition(&mut self, ctx: &mut ExecutionContext) -> crate::Result<Vec<Vec<Snapshot>>> {
		let partition_keys = self.node.partition_by.len();

		let exprs: Vec<&CompiledExpr> =
			self.node.partition_by.iter().chain(self.node.order_by.iter().map(|key| &key.expr)).collect();
		let comparators: Vec<Comparator> = iter::repeat(Comparator::new(SortDirection::Asc, NullOrder::First))
			.take(partition_keys)
			.chain(self.node.order_by.iter().map(|key| key.comparator))
			.collect();

		let rows = materialize_sorted(self.input.as_mut(), ctx, &exprs, &comparators, "WINDOW")?;
		let row_count = rows.len();

		let mut partitions: Vec<Vec<Snapshot>> = Vec::new();
		let mut previous: Option<Vec<Value>> = None;

		for (row, mut values) in rows {
			values.truncate(partition_keys);
			match partitions.last_mut() {
				Some(partition) if previous.as_ref() == Some(&values) => partition.push(row),
				_ => {
					partitions.push(vec![row]);
					previous = Some(values);
				}
			}
		}

		debug!(rows = row_count, partitions = partitions.len(), "partitioned");
		Ok(partitions)
	}
}

impl<'a> QueryNode for WindowNode<'a> {
	#[instrument(name = "query::window::initialize", level = "trace", skip_all)]
	fn initialize(&mut self, ctx: &mut ExecutionContext) -> crate::Result<()> {
		self.input.initialize(ctx)?;
		self.initialized = Some(());
		Ok(())
	}

	#[instrument(name = "query::window::next", level = "trace", skip_all)]
	fn next(&mut self, ctx: &mut ExecutionContext) -> crate::Result<bool> {
		debug_assert!(self.initialized.is_some(), "WindowNode::next() called before initialize()");

		if self.partitions.is_none() {
			self.partitions = Some(self.partition(ctx)?.into_iter());
		}

		while self.position >= self.current.len() {
			let Some(partition) = self.partitions.as_mut().and_then(Iterator::next) else {
				return Ok(false);
			};
			for function in &mut self.functions {
				function.reset(&partition);
			}
			self.current = partition;
			self.position = 0;
		}

		let row = self.position;
		self.position += 1;

		let Some(snapshot) = self.current.get(row) else {
			return internal_err!("window row {} outside a partition of {} rows", row, self.current.len());
		};
		ctx.registers.load(snapshot);

		// every function sees the row as it came from the input
		let mut values = Vec::with_capacity(self.functions.len());
		for (function, call) in self.functions.iter_mut().zip(&self.node.calls) {
			values.push(function.process_row(&mut ctx.registers, &call.arguments, row)?);
		}
		for (call, value) in self.node.calls.iter().zip(values) {
			call.setter.set(&mut ctx.registers, value)?;
		}

		Ok(true)
	}

	fn relation_type(&self) -> RelationType {
		RelationType::Bag
	}
}
