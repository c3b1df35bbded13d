// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::cmp::Ordering;

use ionql_type::{NullOrder, Value};

use crate::sort_key::{Comparator, SortDirection};

/// MIN and MAX as a comparator-driven fold over a NULL sentinel.
///
/// MAX orders unknowns first and MIN orders them last, so the sentinel loses
/// against the first known input.
#[derive(Debug)]
pub(super) struct Extremum {
	current: Value,
	comparator: Comparator,
	keep: Ordering,
}

impl Extremum {
	pub(super) fn min() -> Self {
		Self {
			current: Value::Null,
			comparator: Comparator::new(SortDirection::Asc, NullOrder::Last),
			keep: Ordering::Less,
		}
	}

	pub(super) fn max() -> Self {
		Self {
			current: Value::Null,
			comparator: Comparator::new(SortDirection::Asc, NullOrder::First),
			keep: Ordering::Greater,
		}
	}

	pub(super) fn next(&mut self, value: &Value) {
		if self.comparator.compare(value, &self.current) == self.keep {
			self.current = value.clone();
		}
	}

	pub(super) fn compute(self) -> Value {
		self.current
	}
}
