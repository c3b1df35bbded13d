// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use ionql_type::{Number, Value};

use super::require_number;

#[derive(Debug, Default)]
pub(super) struct Sum {
	sum: Option<Number>,
}

impl Sum {
	pub(super) fn new() -> Self {
		Self::default()
	}

	pub(super) fn next(&mut self, value: &Value) -> crate::Result<()> {
		let number = require_number("sum", value)?;
		self.sum = Some(match self.sum.take() {
			Some(sum) => sum.add(&number),
			None => number,
		});
		Ok(())
	}

	pub(super) fn compute(self) -> Value {
		self.sum.map(Number::into_value).unwrap_or(Value::Null)
	}
}
