// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Immutable physical operator trees, as produced by the planner.
//!
//! Nodes are plain data. Everything that can be validated without input rows
//! (aggregate and window function names, window argument counts) is validated
//! by the constructors here, so a [`Plan`] that exists can be executed.

use std::fmt::{Debug, Display, Formatter};

use ionql_type::{Fragment, return_error};

use crate::{
	error::EvaluationError,
	expression::{CompiledExpr, Setter},
	function::{AggregateKind, Functions, Quantifier, WindowFactory, WindowFunction},
	register::RegisterLayout,
	sort_key::SortKey,
};

pub mod source;

pub use source::{ExpressionSource, ScanItem, ScanItems, ScanSource, Table};

#[derive(Debug)]
pub enum PhysicalPlan {
	Scan(ScanNode),
	Unpivot(UnpivotNode),
	Filter(FilterNode),
	Let(LetNode),
	Join(JoinNode),
	Sort(SortNode),
	Limit(LimitNode),
	Offset(OffsetNode),
	Aggregate(AggregateNode),
	Window(WindowNode),
}

/// A plan root together with the number of registers its variables occupy.
#[derive(Debug)]
pub struct Plan {
	pub root: PhysicalPlan,
	pub register_count: usize,
}

impl Plan {
	pub fn new(root: PhysicalPlan, layout: &RegisterLayout) -> Self {
		Self {
			root,
			register_count: layout.len(),
		}
	}
}

#[derive(Debug)]
pub struct ScanNode {
	pub source: Box<dyn ScanSource>,
	pub as_setter: Setter,
	pub at_setter: Option<Setter>,
	pub by_setter: Option<Setter>,
}

impl ScanNode {
	pub fn new(source: impl ScanSource + 'static, as_setter: Setter) -> Self {
		Self {
			source: Box::new(source),
			as_setter,
			at_setter: None,
			by_setter: None,
		}
	}

	pub fn with_at(mut self, setter: Setter) -> Self {
		self.at_setter = Some(setter);
		self
	}

	pub fn with_by(mut self, setter: Setter) -> Self {
		self.by_setter = Some(setter);
		self
	}
}

/// Ranges over the fields of a struct: AS binds the value, AT the name.
#[derive(Debug)]
pub struct UnpivotNode {
	pub expr: CompiledExpr,
	pub as_setter: Setter,
	pub at_setter: Option<Setter>,
	pub by_setter: Option<Setter>,
}

impl UnpivotNode {
	pub fn new(expr: CompiledExpr, as_setter: Setter) -> Self {
		Self {
			expr,
			as_setter,
			at_setter: None,
			by_setter: None,
		}
	}

	pub fn with_at(mut self, setter: Setter) -> Self {
		self.at_setter = Some(setter);
		self
	}

	pub fn with_by(mut self, setter: Setter) -> Self {
		self.by_setter = Some(setter);
		self
	}
}

#[derive(Debug)]
pub struct FilterNode {
	pub input: Box<PhysicalPlan>,
	pub predicate: CompiledExpr,
}

#[derive(Debug)]
pub struct Binding {
	pub setter: Setter,
	pub expr: CompiledExpr,
}

impl Binding {
	pub fn new(setter: Setter, expr: CompiledExpr) -> Self {
		Self {
			setter,
			expr,
		}
	}
}

#[derive(Debug)]
pub struct LetNode {
	pub input: Box<PhysicalPlan>,
	/// Evaluated in order, later bindings see earlier ones.
	pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
	Inner,
	Left,
	Right,
	Full,
}

impl Display for JoinKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			JoinKind::Inner => f.write_str("INNER"),
			JoinKind::Left => f.write_str("LEFT"),
			JoinKind::Right => f.write_str("RIGHT"),
			JoinKind::Full => f.write_str("FULL"),
		}
	}
}

#[derive(Debug)]
pub struct JoinNode {
	pub kind: JoinKind,
	pub left: Box<PhysicalPlan>,
	pub right: Box<PhysicalPlan>,
	/// Absent means every pair matches.
	pub condition: Option<CompiledExpr>,
	/// Setters of the side that is not preserved: the right side of a LEFT
	/// join, the left side of a RIGHT join.
	pub null_extension: Vec<Setter>,
}

#[derive(Debug)]
pub struct SortNode {
	pub input: Box<PhysicalPlan>,
	pub keys: Vec<SortKey>,
}

#[derive(Debug)]
pub struct LimitNode {
	pub input: Box<PhysicalPlan>,
	pub count: CompiledExpr,
}

#[derive(Debug)]
pub struct OffsetNode {
	pub input: Box<PhysicalPlan>,
	pub count: CompiledExpr,
}

#[derive(Debug)]
pub struct GroupKey {
	pub expr: CompiledExpr,
	pub setter: Setter,
}

impl GroupKey {
	pub fn new(expr: CompiledExpr, setter: Setter) -> Self {
		Self {
			expr,
			setter,
		}
	}
}

#[derive(Debug)]
pub struct AggregateCall {
	pub kind: AggregateKind,
	pub quantifier: Quantifier,
	pub argument: CompiledExpr,
	pub setter: Setter,
}

impl AggregateCall {
	/// Resolves `name` to one of the supported aggregates.
	pub fn new(name: &str, quantifier: Quantifier, argument: CompiledExpr, setter: Setter) -> crate::Result<Self> {
		let Some(kind) = AggregateKind::from_name(name) else {
			return_error!(EvaluationError::UnknownAggregateFunction {
				name: name.to_string(),
				fragment: argument.fragment().clone(),
			});
		};

		Ok(Self {
			kind,
			quantifier,
			argument,
			setter,
		})
	}
}

#[derive(Debug)]
pub struct AggregateNode {
	pub input: Box<PhysicalPlan>,
	pub keys: Vec<GroupKey>,
	pub calls: Vec<AggregateCall>,
}

pub struct WindowCall {
	pub name: String,
	pub arguments: Vec<CompiledExpr>,
	pub setter: Setter,
	factory: WindowFactory,
}

impl WindowCall {
	/// Looks `name` up in `functions` and checks the argument count.
	pub fn new(functions: &Functions, name: &str, arguments: Vec<CompiledExpr>, setter: Setter) -> crate::Result<Self> {
		let Some(factory) = functions.window_factory(name) else {
			return_error!(EvaluationError::UnknownWindowFunction {
				name: name.to_string(),
				fragment: Fragment::internal(name),
			});
		};

		let arity = factory().arity();
		if !arity.contains(&arguments.len()) {
			let expected = if arity.start() == arity.end() {
				arity.start().to_string()
			} else {
				format!("{} to {}", arity.start(), arity.end())
			};
			return_error!(EvaluationError::WindowArgumentCount {
				function: name.to_lowercase(),
				expected,
				actual: arguments.len(),
			});
		}

		Ok(Self {
			name: name.to_lowercase(),
			arguments,
			setter,
			factory,
		})
	}

	/// Fresh function state, one per execution.
	pub fn instantiate(&self) -> Box<dyn WindowFunction> {
		(self.factory)()
	}
}

impl Debug for WindowCall {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WindowCall")
			.field("name", &self.name)
			.field("arguments", &self.arguments)
			.field("setter", &self.setter)
			.finish_non_exhaustive()
	}
}

#[derive(Debug)]
pub struct WindowNode {
	pub input: Box<PhysicalPlan>,
	pub partition_by: Vec<CompiledExpr>,
	pub order_by: Vec<SortKey>,
	pub calls: Vec<WindowCall>,
}
