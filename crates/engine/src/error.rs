// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use ionql_type::{Diagnostic, Error, Fragment, IntoDiagnostic, Property, Type};

/// Row-count clauses sharing the same argument validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
	Limit,
	Offset,
}

impl Display for Clause {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Clause::Limit => f.write_str("LIMIT"),
			Clause::Offset => f.write_str("OFFSET"),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
	#[error("LIMIT requires an integer value")]
	LimitNotInteger {
		fragment: Fragment,
		actual: Type,
	},

	#[error("LIMIT requires a non-negative value")]
	LimitNegative {
		fragment: Fragment,
		value: String,
	},

	#[error("OFFSET requires an integer value")]
	OffsetNotInteger {
		fragment: Fragment,
		actual: Type,
	},

	#[error("OFFSET requires a non-negative value")]
	OffsetNegative {
		fragment: Fragment,
		value: String,
	},

	#[error("{clause} value does not fit a 64-bit integer")]
	IntegerOverflow {
		clause: Clause,
		fragment: Fragment,
		value: String,
	},

	#[error("{function} expects {expected}, got {actual}")]
	AggregateTypeMismatch {
		function: String,
		expected: String,
		actual: Type,
	},

	#[error("unknown aggregate function {name}")]
	UnknownAggregateFunction {
		name: String,
		fragment: Fragment,
	},

	#[error("unknown window function {name}")]
	UnknownWindowFunction {
		name: String,
		fragment: Fragment,
	},

	#[error("{function} expects {expected} arguments, got {actual}")]
	WindowArgumentCount {
		function: String,
		expected: String,
		actual: usize,
	},

	#[error("{function} offset must not be negative")]
	LagLeadNegativeOffset {
		function: String,
		fragment: Fragment,
		value: String,
	},

	#[error("{function} offset must be an integer")]
	LagLeadOffsetNotInteger {
		function: String,
		fragment: Fragment,
		actual: Type,
	},

	#[error("{kind} join is not implemented")]
	JoinKindNotImplemented {
		kind: String,
	},

	#[error("{operator} exceeded the materialization limit of {limit} rows")]
	MaterializationLimitExceeded {
		operator: &'static str,
		limit: usize,
	},

	#[error("window functions are disabled")]
	WindowFunctionsDisabled,
}

fn negative_row_count(code: &str, clause: Clause, fragment: Fragment, value: String) -> Diagnostic {
	Diagnostic {
		code: code.to_string(),
		message: format!("{} requires a non-negative value, got {}", clause, value),
		label: Some("negative value not allowed".to_string()),
		help: Some(format!("use 0 or a positive integer for {}", clause)),
		..Default::default()
	}
	.with_fragment(fragment)
	.with_property(Property::Clause, clause.to_string())
	.with_property(Property::ActualType, Type::Int.to_string())
}

fn non_integer_row_count(code: &str, clause: Clause, fragment: Fragment, actual: Type) -> Diagnostic {
	Diagnostic {
		code: code.to_string(),
		message: format!("{} requires an integer value, got {}", clause, actual),
		label: Some(format!("{} value", actual)),
		help: Some(format!("{} takes an integer row count, e.g. {} 10", clause, clause)),
		..Default::default()
	}
	.with_fragment(fragment)
	.with_property(Property::Clause, clause.to_string())
	.with_property(Property::ExpectedType, Type::Int.to_string())
	.with_property(Property::ActualType, actual.to_string())
}

impl IntoDiagnostic for EvaluationError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			EvaluationError::LimitNotInteger {
				fragment,
				actual,
			} => non_integer_row_count("LIMIT_001", Clause::Limit, fragment, actual),

			EvaluationError::LimitNegative {
				fragment,
				value,
			} => negative_row_count("LIMIT_002", Clause::Limit, fragment, value),

			EvaluationError::OffsetNotInteger {
				fragment,
				actual,
			} => non_integer_row_count("OFFSET_001", Clause::Offset, fragment, actual),

			EvaluationError::OffsetNegative {
				fragment,
				value,
			} => negative_row_count("OFFSET_002", Clause::Offset, fragment, value),

			EvaluationError::IntegerOverflow {
				clause,
				fragment,
				value,
			} => Diagnostic {
				code: "NUMBER_002".to_string(),
				message: format!("{} value {} does not fit a 64-bit integer", clause, value),
				label: Some("integer overflow".to_string()),
				notes: vec!["row counts are narrowed to a signed 64-bit integer before execution".to_string()],
				internal: true,
				..Default::default()
			}
			.with_fragment(fragment)
			.with_property(Property::Clause, clause.to_string())
			.with_property(Property::ActualType, Type::Int.to_string()),

			EvaluationError::AggregateTypeMismatch {
				function,
				expected,
				actual,
			} => Diagnostic {
				code: "AGGREGATE_001".to_string(),
				message: format!("{} expects {} input, got {}", function, expected, actual),
				label: Some(format!("{} value", actual)),
				help: Some(format!("cast the argument of {} or filter out {} values", function, actual)),
				..Default::default()
			}
			.with_property(Property::FunctionName, function)
			.with_property(Property::ExpectedType, expected)
			.with_property(Property::ActualType, actual.to_string()),

			EvaluationError::UnknownAggregateFunction {
				name,
				fragment,
			} => Diagnostic {
				code: "AGGREGATE_002".to_string(),
				message: format!("unknown aggregate function {}", name),
				label: Some("not an aggregate function".to_string()),
				help: Some("supported aggregates are sum, avg, min, max, count, every, any, some and group_as"
					.to_string()),
				..Default::default()
			}
			.with_fragment(fragment)
			.with_property(Property::FunctionName, name),

			EvaluationError::UnknownWindowFunction {
				name,
				fragment,
			} => Diagnostic {
				code: "WINDOW_001".to_string(),
				message: format!("unknown window function {}", name),
				label: Some("not a registered window function".to_string()),
				..Default::default()
			}
			.with_fragment(fragment)
			.with_property(Property::FunctionName, name),

			EvaluationError::WindowArgumentCount {
				function,
				expected,
				actual,
			} => Diagnostic {
				code: "WINDOW_002".to_string(),
				message: format!("{} expects {} arguments, got {}", function, expected, actual),
				..Default::default()
			}
			.with_property(Property::FunctionName, function),

			EvaluationError::LagLeadNegativeOffset {
				function,
				fragment,
				value,
			} => Diagnostic {
				code: "WINDOW_003".to_string(),
				message: format!("{} offset must not be negative, got {}", function, value),
				label: Some("negative offset".to_string()),
				..Default::default()
			}
			.with_fragment(fragment)
			.with_property(Property::FunctionName, function)
			.with_property(Property::ActualType, Type::Int.to_string()),

			EvaluationError::LagLeadOffsetNotInteger {
				function,
				fragment,
				actual,
			} => Diagnostic {
				code: "WINDOW_004".to_string(),
				message: format!("{} offset must be an integer, got {}", function, actual),
				..Default::default()
			}
			.with_fragment(fragment)
			.with_property(Property::FunctionName, function)
			.with_property(Property::ExpectedType, Type::Int.to_string())
			.with_property(Property::ActualType, actual.to_string()),

			EvaluationError::JoinKindNotImplemented {
				kind,
			} => Diagnostic {
				code: "JOIN_001".to_string(),
				message: format!("{} join is not implemented", kind),
				label: Some("unsupported join kind".to_string()),
				notes: vec!["only INNER, LEFT and RIGHT joins can be executed".to_string()],
				internal: true,
				..Default::default()
			}
			.with_property(Property::Clause, format!("{} JOIN", kind)),

			EvaluationError::MaterializationLimitExceeded {
				operator,
				limit,
			} => Diagnostic {
				code: "RESOURCE_001".to_string(),
				message: format!("{} exceeded the materialization limit of {} rows", operator, limit),
				help: Some("raise max_materialized_rows or reduce the input".to_string()),
				..Default::default()
			}
			.with_property(Property::Clause, operator),

			EvaluationError::WindowFunctionsDisabled => Diagnostic {
				code: "WINDOW_005".to_string(),
				message: "window functions are disabled".to_string(),
				help: Some("enable them with ExecutionConfig::with_window_functions(true)".to_string()),
				..Default::default()
			}
			.with_property(Property::Clause, "WINDOW"),
		}
	}
}

impl From<EvaluationError> for Error {
	fn from(err: EvaluationError) -> Self {
		Error(err.into_diagnostic())
	}
}
