// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use ionql_type::return_error;
use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;

/// Knobs applied to one top-level execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
	/// Upper bound on rows a Sort or Window buffers, and on the number of
	/// groups an Aggregate keeps. `None` means unbounded.
	pub max_materialized_rows: Option<usize>,
	/// Window is experimental; when off, compiling a Window node fails.
	pub window_functions_enabled: bool,
}

impl Default for ExecutionConfig {
	fn default() -> Self {
		Self {
			max_materialized_rows: None,
			window_functions_enabled: true,
		}
	}
}

impl ExecutionConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_max_materialized_rows(mut self, max: usize) -> Self {
		self.max_materialized_rows = Some(max);
		self
	}

	pub fn with_window_functions(mut self, enabled: bool) -> Self {
		self.window_functions_enabled = enabled;
		self
	}

	pub(crate) fn check_materialized(&self, operator: &'static str, rows: usize) -> crate::Result<()> {
		if let Some(limit) = self.max_materialized_rows {
			if rows > limit {
				return_error!(EvaluationError::MaterializationLimitExceeded {
					operator,
					limit,
				});
			}
		}
		Ok(())
	}
}
