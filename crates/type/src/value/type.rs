// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Runtime type tag of a [`Value`](crate::Value).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
	Null,
	Missing,
	Boolean,
	Int,
	Float,
	Decimal,
	Date,
	Time,
	Timestamp,
	String,
	Symbol,
	Clob,
	Blob,
	List,
	Bag,
	Struct,
}

impl Type {
	pub fn is_unknown(&self) -> bool {
		matches!(self, Type::Null | Type::Missing)
	}

	pub fn is_number(&self) -> bool {
		matches!(self, Type::Int | Type::Float | Type::Decimal)
	}

	pub fn is_text(&self) -> bool {
		matches!(self, Type::String | Type::Symbol)
	}

	pub fn is_lob(&self) -> bool {
		matches!(self, Type::Clob | Type::Blob)
	}

	pub fn is_collection(&self) -> bool {
		matches!(self, Type::List | Type::Bag)
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Null => f.write_str("NULL"),
			Type::Missing => f.write_str("MISSING"),
			Type::Boolean => f.write_str("BOOL"),
			Type::Int => f.write_str("INT"),
			Type::Float => f.write_str("FLOAT"),
			Type::Decimal => f.write_str("DECIMAL"),
			Type::Date => f.write_str("DATE"),
			Type::Time => f.write_str("TIME"),
			Type::Timestamp => f.write_str("TIMESTAMP"),
			Type::String => f.write_str("STRING"),
			Type::Symbol => f.write_str("SYMBOL"),
			Type::Clob => f.write_str("CLOB"),
			Type::Blob => f.write_str("BLOB"),
			Type::List => f.write_str("LIST"),
			Type::Bag => f.write_str("BAG"),
			Type::Struct => f.write_str("STRUCT"),
		}
	}
}
