// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Debug;

use ionql_type::Value;

use crate::{expression::CompiledExpr, register::Registers};

/// One element produced by a scan source.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanItem {
	pub value: Value,
	/// Ordinal or name of the element, bound by AT
	pub name: Option<Value>,
	/// Content address of the element, bound by BY
	pub address: Option<Value>,
}

impl ScanItem {
	pub fn new(value: Value) -> Self {
		Self {
			value,
			name: None,
			address: None,
		}
	}
}

pub type ScanItems<'a> = Box<dyn Iterator<Item = ScanItem> + 'a>;

/// A collection a Scan expands into rows. Evaluated once per execution of the
/// scan, against the registers current at that point.
pub trait ScanSource: Debug + Send + Sync {
	fn scan<'a>(&'a self, registers: &Registers) -> crate::Result<ScanItems<'a>>;
}

/// Scans the value of an expression. LIST elements are named by their
/// 0-based ordinal, BAG elements are unnamed, any other value is a single
/// unnamed element.
#[derive(Debug)]
pub struct ExpressionSource {
	expr: CompiledExpr,
}

impl ExpressionSource {
	pub fn new(expr: CompiledExpr) -> Self {
		Self {
			expr,
		}
	}
}

impl ScanSource for ExpressionSource {
	fn scan<'a>(&'a self, registers: &Registers) -> crate::Result<ScanItems<'a>> {
		let items: ScanItems<'a> = match self.expr.evaluate(registers)? {
			Value::List(values) => Box::new(values.into_iter().enumerate().map(|(idx, value)| ScanItem {
				value,
				name: Some(Value::int(idx as u64)),
				address: None,
			})),
			Value::Bag(values) => Box::new(values.into_iter().map(ScanItem::new)),
			value => Box::new(std::iter::once(ScanItem::new(value))),
		};
		Ok(items)
	}
}

/// An in-memory, externally iterable collection whose rows carry a content
/// address.
#[derive(Debug, Clone, Default)]
pub struct Table {
	name: String,
	rows: Vec<(Value, Value)>,
}

impl Table {
	/// Addresses rows as `"<name>/<position>"`.
	pub fn new(name: impl Into<String>, rows: impl IntoIterator<Item = Value>) -> Self {
		let name = name.into();
		let rows = rows
			.into_iter()
			.enumerate()
			.map(|(idx, row)| (Value::string(format!("{}/{}", name, idx)), row))
			.collect();
		Self {
			name,
			rows,
		}
	}

	pub fn with_addresses(name: impl Into<String>, rows: impl IntoIterator<Item = (Value, Value)>) -> Self {
		Self {
			name: name.into(),
			rows: rows.into_iter().collect(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}

impl ScanSource for Table {
	fn scan<'a>(&'a self, _registers: &Registers) -> crate::Result<ScanItems<'a>> {
		Ok(Box::new(self.rows.iter().map(|(address, row)| ScanItem {
			value: row.clone(),
			name: None,
			address: Some(address.clone()),
		})))
	}
}
