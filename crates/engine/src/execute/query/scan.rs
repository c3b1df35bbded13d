// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use ionql_type::Value;
use tracing::instrument;

use crate::{
	execute::{ExecutionContext, QueryNode, RelationType},
	plan::{self, ScanItems},
};

pub(crate) struct ScanNode<'a> {
	node: &'a plan::ScanNode,
	items: Option<ScanItems<'a>>,
}

impl<'a> ScanNode<'a> {
	pub(crate) fn new(node: &'a plan::ScanNode) -> Self {
		Self {
			node,
			items: None,
		}
	}
}

impl<'a> QueryNode for ScanNode<'a> {
	#[instrument(name = "query::scan::initialize", level = "trace", skip_all)]
	fn initialize(&mut self, ctx: &mut ExecutionContext) -> crate::Result<()> {
		self.items = Some(self.node.source.scan(&ctx.registers)?);
		Ok(())
	}

	#[instrument(name = "query::scan::next", level = "trace", skip_all)]
	fn next(&mut self, ctx: &mut ExecutionContext) -> crate::Result<bool> {
		debug_assert!(self.items.is_some(), "ScanNode::next() called before initialize()");

		let Some(item) = self.items.as_mut().and_then(|items| items.next()) else {
			return Ok(false);
		};

		self.node.as_setter.set(&mut ctx.registers, item.value)?;
		if let Some(setter) = &self.node.at_setter {
			setter.set(&mut ctx.registers, item.name.unwrap_or(Value::Missing))?;
		}
		if let Some(setter) = &self.node.by_setter {
			setter.set(&mut ctx.registers, item.address.unwrap_or(Value::Missing))?;
		}

		Ok(true)
	}

	fn relation_type(&self) -> RelationType {
		RelationType::Bag
	}
}
