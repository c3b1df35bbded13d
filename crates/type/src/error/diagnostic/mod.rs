// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	collections::BTreeMap,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

use crate::fragment::Fragment;

pub mod internal;
pub mod render;

/// Keys of the structured property bag attached to every diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Property {
	Line,
	Column,
	ActualType,
	ExpectedType,
	FunctionName,
	Clause,
}

impl Display for Property {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Property::Line => f.write_str("line"),
			Property::Column => f.write_str("column"),
			Property::ActualType => f.write_str("actual_type"),
			Property::ExpectedType => f.write_str("expected_type"),
			Property::FunctionName => f.write_str("function_name"),
			Property::Clause => f.write_str("clause"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub message: String,
	pub fragment: Fragment,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
	pub properties: BTreeMap<Property, String>,
	pub internal: bool,
	pub cause: Option<Box<Diagnostic>>,
}

impl Diagnostic {
	/// Attaches a fragment and copies its line/column into the property bag.
	pub fn with_fragment(mut self, fragment: Fragment) -> Self {
		if let Some((line, column)) = fragment.position() {
			self.properties.insert(Property::Line, line.0.to_string());
			self.properties.insert(Property::Column, column.0.to_string());
		}
		self.fragment = fragment;
		self
	}

	pub fn with_property(mut self, property: Property, value: impl Into<String>) -> Self {
		self.properties.insert(property, value.into());
		self
	}

	pub fn property(&self, property: Property) -> Option<&str> {
		self.properties.get(&property).map(String::as_str)
	}

	pub fn with_cause(mut self, cause: Diagnostic) -> Self {
		self.cause = Some(Box::new(cause));
		self
	}
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_fmt(format_args!("{}", self.code))
	}
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for Diagnostic {
	fn into_diagnostic(self) -> Diagnostic {
		self
	}
}
