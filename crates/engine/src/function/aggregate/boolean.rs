// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use ionql_type::{Type, Value, return_error};

use crate::error::EvaluationError;

/// EVERY folds with AND, ANY/SOME with OR.
#[derive(Debug)]
pub(super) struct BooleanFold {
	name: &'static str,
	conjunction: bool,
	result: Option<bool>,
}

impl BooleanFold {
	pub(super) fn every() -> Self {
		Self {
			name: "every",
			conjunction: true,
			result: None,
		}
	}

	pub(super) fn any() -> Self {
		Self {
			name: "any",
			conjunction: false,
			result: None,
		}
	}

	pub(super) fn next(&mut self, value: &Value) -> crate::Result<()> {
		let Value::Boolean(b) = value else {
			return_error!(EvaluationError::AggregateTypeMismatch {
				function: self.name.to_string(),
				expected: Type::Boolean.to_string(),
				actual: value.get_type(),
			});
		};

		self.result = Some(match self.result {
			None => *b,
			Some(acc) if self.conjunction => acc && *b,
			Some(acc) => acc || *b,
		});
		Ok(())
	}

	pub(super) fn compute(self) -> Value {
		self.result.map(Value::Boolean).unwrap_or(Value::Null)
	}
}
