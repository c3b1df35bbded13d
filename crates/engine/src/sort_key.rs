// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::cmp::Ordering;

pub use ionql_type::NullOrder;
use ionql_type::Value;

use crate::expression::CompiledExpr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
	Asc,
	Desc,
}

/// Natural value comparator for one ORDER BY key.
///
/// NULL and MISSING are placed per `nulls` whatever the direction; only the
/// order among known values is reversed for DESC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparator {
	pub direction: SortDirection,
	pub nulls: NullOrder,
}

impl Comparator {
	pub fn new(direction: SortDirection, nulls: NullOrder) -> Self {
		Self {
			direction,
			nulls,
		}
	}

	/// ASC NULLS LAST
	pub fn asc() -> Self {
		Self::new(SortDirection::Asc, NullOrder::Last)
	}

	/// DESC NULLS FIRST
	pub fn desc() -> Self {
		Self::new(SortDirection::Desc, NullOrder::First)
	}

	pub fn compare(&self, l: &Value, r: &Value) -> Ordering {
		match (l.is_unknown(), r.is_unknown()) {
			(true, true) => Ordering::Equal,
			(true, false) | (false, true) => l.compare(r, self.nulls),
			(false, false) => {
				let ordering = l.compare(r, self.nulls);
				match self.direction {
					SortDirection::Asc => ordering,
					SortDirection::Desc => ordering.reverse(),
				}
			}
		}
	}
}

#[derive(Debug)]
pub struct SortKey {
	pub comparator: Comparator,
	pub expr: CompiledExpr,
}

impl SortKey {
	pub fn new(expr: CompiledExpr, comparator: Comparator) -> Self {
		Self {
			comparator,
			expr,
		}
	}

	pub fn asc(expr: CompiledExpr) -> Self {
		Self::new(expr, Comparator::asc())
	}

	pub fn desc(expr: CompiledExpr) -> Self {
		Self::new(expr, Comparator::desc())
	}
}

/// Compares two evaluated key tuples, stopping at the first key that differs.
pub fn compare_keys(comparators: &[Comparator], l: &[Value], r: &[Value]) -> Ordering {
	for ((comparator, l), r) in comparators.iter().zip(l).zip(r) {
		let ordering = comparator.compare(l, r);
		if ordering != Ordering::Equal {
			return ordering;
		}
	}
	Ordering::Equal
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_nulls_independent_of_direction() {
		let desc_last = Comparator::new(SortDirection::Desc, NullOrder::Last);
		assert_eq!(desc_last.compare(&Value::Null, &Value::int(1)), Ordering::Greater);
		assert_eq!(desc_last.compare(&Value::int(2), &Value::int(1)), Ordering::Less);

		let asc_first = Comparator::new(SortDirection::Asc, NullOrder::First);
		assert_eq!(asc_first.compare(&Value::Missing, &Value::int(1)), Ordering::Less);
	}

	#[test]
	fn test_defaults() {
		assert_eq!(Comparator::asc().compare(&Value::Null, &Value::int(1)), Ordering::Greater);
		assert_eq!(Comparator::desc().compare(&Value::Null, &Value::int(1)), Ordering::Less);
	}

	#[test]
	fn test_compare_keys_short_circuits() {
		let comparators = [Comparator::asc(), Comparator::desc()];
		let l = [Value::int(1), Value::int(1)];
		let r = [Value::int(1), Value::int(2)];
		assert_eq!(compare_keys(&comparators, &l, &r), Ordering::Greater);
		assert_eq!(compare_keys(&comparators, &l, &l), Ordering::Equal);
	}
}
