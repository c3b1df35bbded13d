// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub mod blob;
mod compare;
pub mod decimal;
mod json;
pub mod number;
mod ordered_f64;
mod r#type;
pub mod varint;

pub use blob::Blob;
pub use compare::NullOrder;
pub use decimal::Decimal;
pub use number::Number;
pub use ordered_f64::OrderedF64;
pub use r#type::Type;
pub use varint::VarInt;

/// A query value, represented as a native Rust type.
///
/// Equality, ordering and hashing are value based (see [`Value::compare`]):
/// `1`, `1e0` and `1.00` are equal, as are NULL and MISSING.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Value {
	/// Absent value
	Null,
	/// Path navigation into a value that does not have the requested member
	Missing,
	Boolean(bool),
	/// Arbitrary-precision integer
	Int(VarInt),
	/// 8-byte binary floating point
	Float(OrderedF64),
	/// Arbitrary-precision decimal
	Decimal(Decimal),
	Date(NaiveDate),
	Time(NaiveTime),
	/// A point in time with its original UTC offset, compared by instant
	Timestamp(DateTime<FixedOffset>),
	String(String),
	Symbol(String),
	Clob(Blob),
	Blob(Blob),
	/// Ordered sequence
	List(Vec<Value>),
	/// Unordered multiset
	Bag(Vec<Value>),
	/// Ordered fields, names are not required to be unique
	Struct(Vec<(String, Value)>),
}

impl Value {
	pub fn null() -> Self {
		Value::Null
	}

	pub fn missing() -> Self {
		Value::Missing
	}

	pub fn bool(v: impl Into<bool>) -> Self {
		Value::Boolean(v.into())
	}

	pub fn int(v: impl Into<VarInt>) -> Self {
		Value::Int(v.into())
	}

	pub fn float(v: impl Into<f64>) -> Self {
		Value::Float(OrderedF64(v.into()))
	}

	pub fn decimal(v: impl Into<Decimal>) -> Self {
		Value::Decimal(v.into())
	}

	pub fn date(v: NaiveDate) -> Self {
		Value::Date(v)
	}

	pub fn time(v: NaiveTime) -> Self {
		Value::Time(v)
	}

	pub fn timestamp(v: DateTime<FixedOffset>) -> Self {
		Value::Timestamp(v)
	}

	pub fn string(v: impl Into<String>) -> Self {
		Value::String(v.into())
	}

	pub fn symbol(v: impl Into<String>) -> Self {
		Value::Symbol(v.into())
	}

	pub fn clob(v: impl Into<Blob>) -> Self {
		Value::Clob(v.into())
	}

	pub fn blob(v: impl Into<Blob>) -> Self {
		Value::Blob(v.into())
	}

	pub fn list(values: impl IntoIterator<Item = Value>) -> Self {
		Value::List(values.into_iter().collect())
	}

	pub fn bag(values: impl IntoIterator<Item = Value>) -> Self {
		Value::Bag(values.into_iter().collect())
	}

	pub fn structure<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
		Value::Struct(fields.into_iter().map(|(name, value)| (name.into(), value)).collect())
	}
}

impl Value {
	pub fn get_type(&self) -> Type {
		match self {
			Value::Null => Type::Null,
			Value::Missing => Type::Missing,
			Value::Boolean(_) => Type::Boolean,
			Value::Int(_) => Type::Int,
			Value::Float(_) => Type::Float,
			Value::Decimal(_) => Type::Decimal,
			Value::Date(_) => Type::Date,
			Value::Time(_) => Type::Time,
			Value::Timestamp(_) => Type::Timestamp,
			Value::String(_) => Type::String,
			Value::Symbol(_) => Type::Symbol,
			Value::Clob(_) => Type::Clob,
			Value::Blob(_) => Type::Blob,
			Value::List(_) => Type::List,
			Value::Bag(_) => Type::Bag,
			Value::Struct(_) => Type::Struct,
		}
	}

	/// NULL or MISSING
	pub fn is_unknown(&self) -> bool {
		matches!(self, Value::Null | Value::Missing)
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	pub fn is_missing(&self) -> bool {
		matches!(self, Value::Missing)
	}

	/// Collapses three-valued logic: only boolean `true` is true.
	pub fn is_true(&self) -> bool {
		matches!(self, Value::Boolean(true))
	}

	/// First field named `name`; MISSING when there is none or `self` is not a struct.
	pub fn field(&self, name: &str) -> Value {
		match self {
			Value::Struct(fields) => fields
				.iter()
				.find(|(field, _)| field == name)
				.map(|(_, value)| value.clone())
				.unwrap_or(Value::Missing),
			_ => Value::Missing,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) | Value::Symbol(s) => Some(s),
			_ => None,
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Boolean(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::int(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::int(v)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::float(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::string(v)
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::String(v)
	}
}

fn write_sequence(f: &mut Formatter<'_>, open: &str, values: &[Value], close: &str) -> std::fmt::Result {
	f.write_str(open)?;
	for (idx, value) in values.iter().enumerate() {
		if idx > 0 {
			f.write_str(", ")?;
		}
		Display::fmt(value, f)?;
	}
	f.write_str(close)
}

fn is_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn write_symbol(f: &mut Formatter<'_>, symbol: &str) -> std::fmt::Result {
	if is_identifier(symbol) {
		f.write_str(symbol)
	} else {
		write!(f, "'{}'", symbol.replace('\'', "\\'"))
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Missing => f.write_str("missing"),
			Value::Boolean(true) => f.write_str("true"),
			Value::Boolean(false) => f.write_str("false"),
			Value::Int(v) => Display::fmt(v, f),
			Value::Float(v) => Display::fmt(v, f),
			Value::Decimal(v) => {
				let text = v.to_string();
				if text.contains(['.', 'e', 'E']) {
					f.write_str(&text)
				} else {
					write!(f, "{}.", text)
				}
			}
			Value::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
			Value::Time(v) => write!(f, "TIME '{}'", v),
			Value::Timestamp(v) => f.write_str(&v.to_rfc3339()),
			Value::String(v) => write!(f, "{:?}", v),
			Value::Symbol(v) => write_symbol(f, v),
			Value::Clob(v) => write!(f, "{{{{{:?}}}}}", String::from_utf8_lossy(v.as_bytes())),
			Value::Blob(v) => write!(f, "{{{{{}}}}}", v),
			Value::List(values) => write_sequence(f, "[", values, "]"),
			Value::Bag(values) => write_sequence(f, "<<", values, ">>"),
			Value::Struct(fields) => {
				f.write_str("{")?;
				for (idx, (name, value)) in fields.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					write_symbol(f, name)?;
					f.write_str(": ")?;
					Display::fmt(value, f)?;
				}
				f.write_str("}")
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_field_returns_first_match() {
		let value = Value::structure([("a", Value::int(1)), ("b", Value::int(2)), ("a", Value::int(3))]);
		assert_eq!(value.field("a").get_type(), Type::Int);
		assert_eq!(value.field("a"), Value::int(1));
	}

	#[test]
	fn test_field_absent_is_missing() {
		let value = Value::structure([("a", Value::int(1))]);
		assert!(value.field("z").is_missing());
		assert!(Value::int(1).field("a").is_missing());
	}

	#[test]
	fn test_is_true() {
		assert!(Value::bool(true).is_true());
		assert!(!Value::bool(false).is_true());
		assert!(!Value::Null.is_true());
		assert!(!Value::Missing.is_true());
		assert!(!Value::int(1).is_true());
	}

	#[test]
	fn test_display() {
		let value = Value::structure([
			("dept", Value::string("x")),
			("tags", Value::bag([Value::symbol("a"), Value::Null])),
			("n", Value::list([Value::int(1), Value::decimal(2)])),
		]);
		assert_eq!(value.to_string(), r#"{dept: "x", tags: <<a, null>>, n: [1, 2.]}"#);
	}

	#[test]
	fn test_display_quotes_symbols() {
		assert_eq!(Value::symbol("hello world").to_string(), "'hello world'");
		assert_eq!(Value::structure([("my field", Value::bool(true))]).to_string(), "{'my field': true}");
	}
}
