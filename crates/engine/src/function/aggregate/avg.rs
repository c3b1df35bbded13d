// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use ionql_type::{Decimal, Number, Value};

use super::require_number;

/// Running (sum, count) in decimal arithmetic, whatever the input kinds.
/// The division happens once, in [`Decimal::checked_div`].
#[derive(Debug)]
pub(super) struct Avg {
	sum: Decimal,
	// NaN and the infinities have no decimal form
	non_finite: Option<f64>,
	count: u64,
}

impl Avg {
	pub(super) fn new() -> Self {
		Self {
			sum: Decimal::default(),
			non_finite: None,
			count: 0,
		}
	}

	pub(super) fn next(&mut self, value: &Value) -> crate::Result<()> {
		let number = require_number("avg", value)?;
		match (number.to_decimal(), number) {
			(Some(decimal), _) => self.sum = Decimal::new(&self.sum.0 + decimal.0),
			(None, Number::Float(v)) => {
				self.non_finite = Some(self.non_finite.map_or(v.value(), |acc| acc + v.value()));
			}
			(None, _) => {}
		}
		self.count += 1;
		Ok(())
	}

	pub(super) fn compute(self) -> Value {
		if self.count == 0 {
			return Value::Null;
		}
		if let Some(non_finite) = self.non_finite {
			return Value::float(non_finite);
		}
		match self.sum.checked_div(&Decimal::from(self.count as i64)) {
			Some(avg) => Value::Decimal(avg),
			None => Value::Null,
		}
	}
}

#[cfg(test)]
mod tests {
	use ionql_type::Type;

	use super::*;

	fn avg(values: &[Value]) -> Value {
		let mut avg = Avg::new();
		for value in values {
			avg.next(value).unwrap();
		}
		avg.compute()
	}

	#[test]
	fn test_avg_is_exact_decimal() {
		let result = avg(&[Value::int(1), Value::int(2)]);
		assert_eq!(result.get_type(), Type::Decimal);
		assert_eq!(result.to_string(), "1.5");
	}

	#[test]
	fn test_avg_of_floats_is_decimal() {
		let result = avg(&[Value::float(0.1), Value::float(0.2)]);
		assert_eq!(result.get_type(), Type::Decimal);
		assert_eq!(result.to_string(), "0.15");
	}

	#[test]
	fn test_avg_mixed_kinds() {
		let result = avg(&[Value::int(1), Value::float(0.5), Value::decimal(3)]);
		assert_eq!(result.get_type(), Type::Decimal);
		assert_eq!(result.to_string(), "1.5");
	}

	#[test]
	fn test_avg_with_infinity_is_float() {
		let result = avg(&[Value::int(1), Value::float(f64::INFINITY)]);
		assert_eq!(result, Value::float(f64::INFINITY));
	}

	#[test]
	fn test_avg_of_nothing_is_null() {
		assert!(avg(&[]).is_null());
	}

	#[test]
	fn test_avg_rejects_bool() {
		let mut avg = Avg::new();
		assert!(avg.next(&Value::bool(true)).is_err());
	}
}
