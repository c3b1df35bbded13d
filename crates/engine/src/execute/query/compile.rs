// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use ionql_type::return_error;
use tracing::instrument;

use crate::{
	config::ExecutionConfig,
	error::EvaluationError,
	execute::{
		ExecutionPlan,
		query::{
			aggregate::AggregateNode, filter::FilterNode, join::JoinNode, r#let::LetNode, offset::OffsetNode,
			scan::ScanNode, sort::SortNode, take::TakeNode, unpivot::UnpivotNode, window::WindowNode,
		},
	},
	plan::{JoinKind, PhysicalPlan},
};

/// Builds a fresh, uninitialized iterator tree over an immutable plan.
#[instrument(name = "query::compile", level = "trace", skip_all)]
pub(crate) fn compile<'a>(plan: &'a PhysicalPlan, config: &ExecutionConfig) -> crate::Result<Box<ExecutionPlan<'a>>> {
	let node: Box<ExecutionPlan<'a>> = match plan {
		PhysicalPlan::Scan(node) => Box::new(ScanNode::new(node)),
		PhysicalPlan::Unpivot(node) => Box::new(UnpivotNode::new(node)),

		PhysicalPlan::Filter(node) => {
			let input = compile(&node.input, config)?;
			Box::new(FilterNode::new(input, &node.predicate))
		}

		PhysicalPlan::Let(node) => {
			let input = compile(&node.input, config)?;
			Box::new(LetNode::new(input, &node.bindings))
		}

		PhysicalPlan::Join(node) => {
			if node.kind == JoinKind::Full {
				return_error!(EvaluationError::JoinKindNotImplemented {
					kind: node.kind.to_string(),
				});
			}
			// the preserved side of a RIGHT join is its right child
			let (outer, inner) = match node.kind {
				JoinKind::Right => (&node.right, &node.left),
				_ => (&node.left, &node.right),
			};
			let outer = compile(outer, config)?;
			// fail on a bad inner plan here rather than on the first outer row
			compile(inner, config)?;
			Box::new(JoinNode::new(node, outer, inner))
		}

		PhysicalPlan::Sort(node) => {
			let input = compile(&node.input, config)?;
			Box::new(SortNode::new(input, &node.keys))
		}

		PhysicalPlan::Limit(node) => {
			let input = compile(&node.input, config)?;
			Box::new(TakeNode::new(input, &node.count))
		}

		PhysicalPlan::Offset(node) => {
			let input = compile(&node.input, config)?;
			Box::new(OffsetNode::new(input, &node.count))
		}

		PhysicalPlan::Aggregate(node) => {
			let input = compile(&node.input, config)?;
			Box::new(AggregateNode::new(input, node))
		}

		PhysicalPlan::Window(node) => {
			if !config.window_functions_enabled {
				return_error!(EvaluationError::WindowFunctionsDisabled);
			}
			let input = compile(&node.input, config)?;
			Box::new(WindowNode::new(input, node))
		}
	};

	Ok(node)
}
