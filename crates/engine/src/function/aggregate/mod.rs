// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::HashSet,
	fmt::{Display, Formatter},
};

use ionql_type::{Number, Value, return_error};

use crate::error::EvaluationError;

mod avg;
mod boolean;
mod count;
mod extremum;
mod group_as;
mod sum;

use avg::Avg;
use boolean::BooleanFold;
use count::Count;
use extremum::Extremum;
use group_as::GroupAs;
use sum::Sum;

/// The closed set of aggregate functions, resolved once when the plan is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKind {
	Sum,
	Avg,
	Min,
	Max,
	Count,
	Every,
	AnySome,
	GroupAs,
}

impl AggregateKind {
	pub fn from_name(name: &str) -> Option<AggregateKind> {
		match name.to_lowercase().as_str() {
			"sum" => Some(AggregateKind::Sum),
			"avg" => Some(AggregateKind::Avg),
			"min" => Some(AggregateKind::Min),
			"max" => Some(AggregateKind::Max),
			"count" => Some(AggregateKind::Count),
			"every" => Some(AggregateKind::Every),
			"any" | "some" => Some(AggregateKind::AnySome),
			"group_as" => Some(AggregateKind::GroupAs),
			_ => None,
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			AggregateKind::Sum => "sum",
			AggregateKind::Avg => "avg",
			AggregateKind::Min => "min",
			AggregateKind::Max => "max",
			AggregateKind::Count => "count",
			AggregateKind::Every => "every",
			AggregateKind::AnySome => "any",
			AggregateKind::GroupAs => "group_as",
		}
	}
}

impl Display for AggregateKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quantifier {
	#[default]
	All,
	Distinct,
}

#[derive(Debug)]
enum State {
	Sum(Sum),
	Avg(Avg),
	Extremum(Extremum),
	Count(Count),
	Boolean(BooleanFold),
	GroupAs(GroupAs),
}

/// Per-group state of one aggregate call.
///
/// Unknown inputs never reach the state. With DISTINCT, a value equal to one
/// already seen is dropped as well.
#[derive(Debug)]
pub struct Accumulator {
	state: State,
	distinct: Option<HashSet<Value>>,
}

impl Accumulator {
	pub fn new(kind: AggregateKind, quantifier: Quantifier) -> Self {
		let state = match kind {
			AggregateKind::Sum => State::Sum(Sum::new()),
			AggregateKind::Avg => State::Avg(Avg::new()),
			AggregateKind::Min => State::Extremum(Extremum::min()),
			AggregateKind::Max => State::Extremum(Extremum::max()),
			AggregateKind::Count => State::Count(Count::new()),
			AggregateKind::Every => State::Boolean(BooleanFold::every()),
			AggregateKind::AnySome => State::Boolean(BooleanFold::any()),
			AggregateKind::GroupAs => State::GroupAs(GroupAs::new()),
		};

		Self {
			state,
			distinct: match quantifier {
				Quantifier::All => None,
				Quantifier::Distinct => Some(HashSet::new()),
			},
		}
	}

	pub fn next(&mut self, value: &Value) -> crate::Result<()> {
		if value.is_unknown() {
			return Ok(());
		}

		if let Some(seen) = &mut self.distinct {
			if seen.contains(value) {
				return Ok(());
			}
			seen.insert(value.clone());
		}

		match &mut self.state {
			State::Sum(sum) => sum.next(value),
			State::Avg(avg) => avg.next(value),
			State::Extremum(extremum) => {
				extremum.next(value);
				Ok(())
			}
			State::Count(count) => {
				count.next();
				Ok(())
			}
			State::Boolean(fold) => fold.next(value),
			State::GroupAs(group) => {
				group.next(value);
				Ok(())
			}
		}
	}

	pub fn compute(self) -> Value {
		match self.state {
			State::Sum(sum) => sum.compute(),
			State::Avg(avg) => avg.compute(),
			State::Extremum(extremum) => extremum.compute(),
			State::Count(count) => count.compute(),
			State::Boolean(fold) => fold.compute(),
			State::GroupAs(group) => group.compute(),
		}
	}
}

fn require_number(function: &str, value: &Value) -> crate::Result<Number> {
	match Number::from_value(value) {
		Some(number) => Ok(number),
		None => return_error!(EvaluationError::AggregateTypeMismatch {
			function: function.to_string(),
			expected: "numeric".to_string(),
			actual: value.get_type(),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn run(kind: AggregateKind, quantifier: Quantifier, values: &[Value]) -> Value {
		let mut accumulator = Accumulator::new(kind, quantifier);
		for value in values {
			accumulator.next(value).unwrap();
		}
		accumulator.compute()
	}

	#[test]
	fn test_from_name() {
		assert_eq!(AggregateKind::from_name("SUM"), Some(AggregateKind::Sum));
		assert_eq!(AggregateKind::from_name("some"), Some(AggregateKind::AnySome));
		assert_eq!(AggregateKind::from_name("any"), Some(AggregateKind::AnySome));
		assert_eq!(AggregateKind::from_name("median"), None);
	}

	#[test]
	fn test_distinct_sum() {
		let values = [Value::int(1), Value::int(1), Value::int(2)];
		assert_eq!(run(AggregateKind::Sum, Quantifier::Distinct, &values), Value::int(3));
		assert_eq!(run(AggregateKind::Sum, Quantifier::All, &values), Value::int(4));
	}

	#[test]
	fn test_distinct_uses_value_equality() {
		let values = [Value::int(1), Value::float(1.0), Value::decimal(1)];
		assert_eq!(run(AggregateKind::Count, Quantifier::Distinct, &values), Value::int(1));
	}

	#[test]
	fn test_unknowns_skipped_before_distinct() {
		let values = [Value::Null, Value::Missing, Value::int(5)];
		assert_eq!(run(AggregateKind::Count, Quantifier::All, &values), Value::int(1));
		assert_eq!(run(AggregateKind::Count, Quantifier::Distinct, &values), Value::int(1));
	}

	#[test]
	fn test_avg_skips_null() {
		let values = [Value::int(1), Value::Null, Value::int(3)];
		assert_eq!(run(AggregateKind::Avg, Quantifier::All, &values), Value::int(2));
	}

	#[test]
	fn test_empty_group_results() {
		assert_eq!(run(AggregateKind::Count, Quantifier::All, &[]), Value::int(0));
		assert!(run(AggregateKind::Sum, Quantifier::All, &[]).is_null());
		assert!(run(AggregateKind::Avg, Quantifier::All, &[]).is_null());
		assert!(run(AggregateKind::Min, Quantifier::All, &[]).is_null());
		assert!(run(AggregateKind::Max, Quantifier::All, &[]).is_null());
		assert!(run(AggregateKind::Every, Quantifier::All, &[]).is_null());
		assert!(run(AggregateKind::AnySome, Quantifier::All, &[]).is_null());
		assert_eq!(run(AggregateKind::GroupAs, Quantifier::All, &[]), Value::bag([]));
	}

	#[test]
	fn test_sum_type_mismatch() {
		let mut accumulator = Accumulator::new(AggregateKind::Sum, Quantifier::All);
		let err = accumulator.next(&Value::string("x")).unwrap_err();
		assert_eq!(err.code, "AGGREGATE_001");
		assert_eq!(err.property(ionql_type::Property::FunctionName), Some("sum"));
		assert_eq!(err.property(ionql_type::Property::ActualType), Some("STRING"));
		assert!(!err.is_internal());
	}
}
