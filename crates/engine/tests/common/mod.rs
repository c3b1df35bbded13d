// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![allow(dead_code)]

use ionql_engine::{
	CompiledExpr, Setter, Value,
	plan::{ExpressionSource, PhysicalPlan, ScanNode},
};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output to the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_test_writer().try_init();
}

pub fn json(value: serde_json::Value) -> Value {
	Value::from_json(value)
}

/// A JSON array read as a BAG of rows.
pub fn rows(value: serde_json::Value) -> Value {
	match Value::from_json(value) {
		Value::List(values) => Value::Bag(values),
		other => Value::bag([other]),
	}
}

/// `FROM <collection> AS <slot>`
pub fn scan(collection: Value, slot: usize) -> PhysicalPlan {
	PhysicalPlan::Scan(ScanNode::new(ExpressionSource::new(CompiledExpr::constant(collection)), Setter::slot(slot)))
}
