// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use ionql_type::Value;

#[derive(Debug, Default)]
pub(super) struct GroupAs {
	values: Vec<Value>,
}

impl GroupAs {
	pub(super) fn new() -> Self {
		Self::default()
	}

	pub(super) fn next(&mut self, value: &Value) {
		self.values.push(value.clone());
	}

	pub(super) fn compute(self) -> Value {
		Value::Bag(self.values)
	}
}
