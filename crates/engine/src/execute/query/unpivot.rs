// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::vec::IntoIter;

use ionql_type::Value;
use tracing::instrument;

use crate::{
	execute::{ExecutionContext, QueryNode, RelationType},
	plan,
};

pub(crate) struct UnpivotNode<'a> {
	node: &'a plan::UnpivotNode,
	fields: Option<IntoIter<(String, Value)>>,
}

impl<'a> UnpivotNode<'a> {
	pub(crate) fn new(node: &'a plan::UnpivotNode) -> Self {
		Self {
			node,
			fields: None,
		}
	}
}

impl<'a> QueryNode for UnpivotNode<'a> {
	#[instrument(name = "query::unpivot::initialize", level = "trace", skip_all)]
	fn initialize(&mut self, ctx: &mut ExecutionContext) -> crate::Result<()> {
		let fields = match self.node.expr.evaluate(&ctx.registers)? {
			Value::Struct(fields) => fields,
			Value::Missing => Vec::new(),
			value => vec![("_1".to_string(), value)],
		};
		self.fields = Some(fields.into_iter());
		Ok(())
	}

	#[instrument(name = "query::unpivot::next", level = "trace", skip_all)]
	fn next(&mut self, ctx: &mut ExecutionContext) -> crate::Result<bool> {
		debug_assert!(self.fields.is_some(), "UnpivotNode::next() called before initialize()");

		let Some((name, value)) = self.fields.as_mut().and_then(Iterator::next) else {
			return Ok(false);
		};

		self.node.as_setter.set(&mut ctx.registers, value)?;
		if let Some(setter) = &self.node.at_setter {
			setter.set(&mut ctx.registers, Value::String(name))?;
		}
		if let Some(setter) = &self.node.by_setter {
			setter.set(&mut ctx.registers, Value::Missing)?;
		}

		Ok(true)
	}

	fn relation_type(&self) -> RelationType {
		RelationType::Bag
	}
}
