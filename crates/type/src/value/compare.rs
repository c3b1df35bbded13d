// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use crate::value::{Number, Value};

/// Placement of NULL and MISSING relative to every known value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NullOrder {
	#[default]
	First,
	Last,
}

/// Rank of the value's category in the total order, unknowns excluded.
fn category(value: &Value) -> u8 {
	match value {
		Value::Null | Value::Missing => 0,
		Value::Boolean(_) => 1,
		Value::Int(_) | Value::Float(_) | Value::Decimal(_) => 2,
		Value::Date(_) => 3,
		Value::Time(_) => 4,
		Value::Timestamp(_) => 5,
		Value::String(_) | Value::Symbol(_) => 6,
		Value::Clob(_) | Value::Blob(_) => 7,
		Value::List(_) => 8,
		Value::Struct(_) => 9,
		Value::Bag(_) => 10,
	}
}

fn lob_bytes(value: &Value) -> &[u8] {
	match value {
		Value::Clob(blob) | Value::Blob(blob) => blob.as_bytes(),
		_ => &[],
	}
}

fn compare_sequences(l: &[Value], r: &[Value], nulls: NullOrder) -> Ordering {
	for (l, r) in l.iter().zip(r.iter()) {
		let ordering = l.compare(r, nulls);
		if ordering != Ordering::Equal {
			return ordering;
		}
	}
	l.len().cmp(&r.len())
}

fn sorted_fields(fields: &[(String, Value)], nulls: NullOrder) -> Vec<&(String, Value)> {
	let mut sorted: Vec<&(String, Value)> = fields.iter().collect();
	sorted.sort_by(|(ln, lv), (rn, rv)| ln.cmp(rn).then_with(|| lv.compare(rv, nulls)));
	sorted
}

fn sorted_elements(values: &[Value], nulls: NullOrder) -> Vec<&Value> {
	let mut sorted: Vec<&Value> = values.iter().collect();
	sorted.sort_by(|l, r| l.compare(r, nulls));
	sorted
}

impl Value {
	/// Total order over all values.
	///
	/// Unknowns come first or last per `nulls`, then BOOL, numbers (compared
	/// numerically across INT, FLOAT and DECIMAL), DATE, TIME, TIMESTAMP,
	/// text, LOBs, LIST, STRUCT and BAG. STRUCTs compare their fields sorted
	/// by name then value; BAGs compare their sorted elements.
	pub fn compare(&self, other: &Value, nulls: NullOrder) -> Ordering {
		match (self.is_unknown(), other.is_unknown()) {
			(true, true) => return Ordering::Equal,
			(true, false) => {
				return match nulls {
					NullOrder::First => Ordering::Less,
					NullOrder::Last => Ordering::Greater,
				};
			}
			(false, true) => {
				return match nulls {
					NullOrder::First => Ordering::Greater,
					NullOrder::Last => Ordering::Less,
				};
			}
			(false, false) => {}
		}

		let by_category = category(self).cmp(&category(other));
		if by_category != Ordering::Equal {
			return by_category;
		}

		match (self, other) {
			(Value::Boolean(l), Value::Boolean(r)) => l.cmp(r),
			(Value::Date(l), Value::Date(r)) => l.cmp(r),
			(Value::Time(l), Value::Time(r)) => l.cmp(r),
			(Value::Timestamp(l), Value::Timestamp(r)) => l.cmp(r),
			(Value::List(l), Value::List(r)) => compare_sequences(l, r, nulls),
			(Value::Struct(l), Value::Struct(r)) => {
				let l = sorted_fields(l, nulls);
				let r = sorted_fields(r, nulls);
				for ((ln, lv), (rn, rv)) in l.iter().zip(r.iter()) {
					let ordering = ln.cmp(rn).then_with(|| lv.compare(rv, nulls));
					if ordering != Ordering::Equal {
						return ordering;
					}
				}
				l.len().cmp(&r.len())
			}
			(Value::Bag(l), Value::Bag(r)) => {
				let l = sorted_elements(l, nulls);
				let r = sorted_elements(r, nulls);
				for (l, r) in l.iter().zip(r.iter()) {
					let ordering = l.compare(r, nulls);
					if ordering != Ordering::Equal {
						return ordering;
					}
				}
				l.len().cmp(&r.len())
			}
			_ => {
				if let (Some(l), Some(r)) = (Number::from_value(self), Number::from_value(other)) {
					return l.compare(&r);
				}
				if let (Some(l), Some(r)) = (self.as_str(), other.as_str()) {
					return l.cmp(r);
				}
				lob_bytes(self).cmp(lob_bytes(other))
			}
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		self.compare(other, NullOrder::First) == Ordering::Equal
	}
}

impl Eq for Value {}

impl PartialOrd for Value {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Value {
	fn cmp(&self, other: &Self) -> Ordering {
		self.compare(other, NullOrder::First)
	}
}

impl Hash for Value {
	fn hash<H: Hasher>(&self, state: &mut H) {
		category(self).hash(state);
		match self {
			Value::Null | Value::Missing => {}
			Value::Boolean(v) => v.hash(state),
			Value::Int(_) | Value::Float(_) | Value::Decimal(_) => {
				if let Some(number) = Number::from_value(self) {
					number.hash_canonical(state);
				}
			}
			Value::Date(v) => v.hash(state),
			Value::Time(v) => v.hash(state),
			Value::Timestamp(v) => v.naive_utc().hash(state),
			Value::String(v) | Value::Symbol(v) => v.hash(state),
			Value::Clob(v) | Value::Blob(v) => v.as_bytes().hash(state),
			Value::List(values) => {
				values.len().hash(state);
				for value in values {
					value.hash(state);
				}
			}
			Value::Struct(fields) => {
				let sorted = sorted_fields(fields, NullOrder::First);
				sorted.len().hash(state);
				for (name, value) in sorted {
					name.hash(state);
					value.hash(state);
				}
			}
			Value::Bag(values) => {
				let sorted = sorted_elements(values, NullOrder::First);
				sorted.len().hash(state);
				for value in sorted {
					value.hash(state);
				}
			}
		}
	}
}
