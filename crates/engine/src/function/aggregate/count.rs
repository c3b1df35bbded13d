// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use ionql_type::Value;

#[derive(Debug, Default)]
pub(super) struct Count {
	count: u64,
}

impl Count {
	pub(super) fn new() -> Self {
		Self::default()
	}

	pub(super) fn next(&mut self) {
		self.count += 1;
	}

	pub(super) fn compute(self) -> Value {
		Value::int(self.count)
	}
}
