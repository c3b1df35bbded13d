// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;

use std::{
	ops::RangeInclusive,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};

use ionql_engine::{
	CompiledExpr, ExecutionConfig, Executor, RegisterLayout, Registers, Setter, Snapshot, Value,
	function::{
		Functions, WindowFunction,
		window::{Lag, Lead, RowNumber},
	},
	plan::{PhysicalPlan, Plan, WindowCall, WindowNode},
	sort_key::SortKey,
};
use common::{init_tracing, rows, scan};
use serde_json::json;

const ROW: usize = 0;
const OUT: usize = 1;
const SECOND: usize = 2;

/// Number of rows in the current partition.
#[derive(Debug, Default)]
struct PartitionCount {
	rows: usize,
}

impl WindowFunction for PartitionCount {
	fn reset(&mut self, partition: &[Snapshot]) {
		self.rows = partition.len();
	}

	fn process_row(&mut self, _registers: &mut Registers, _arguments: &[CompiledExpr], _row: usize) -> ionql_engine::Result<Value> {
		Ok(Value::int(self.rows as u64))
	}

	fn arity(&self) -> RangeInclusive<usize> {
		0..=0
	}
}

fn functions() -> Functions {
	Functions::builder()
		.register_window("lag", Lag::new)
		.register_window("lead", Lead::new)
		.register_window("row_number", RowNumber::new)
		.register_window("partition_count", PartitionCount::default)
		.build()
}

fn layout() -> RegisterLayout {
	let mut layout = RegisterLayout::new();
	layout.declare("row");
	layout.declare("out");
	layout.declare("second");
	layout
}

fn field(name: &'static str) -> CompiledExpr {
	CompiledExpr::field(ROW, &[name])
}

fn window(input: Value, partition_by: Vec<CompiledExpr>, order_by: Vec<SortKey>, calls: Vec<WindowCall>) -> Plan {
	Plan::new(
		PhysicalPlan::Window(WindowNode {
			input: Box::new(scan(input, ROW)),
			partition_by,
			order_by,
			calls,
		}),
		&layout(),
	)
}

fn call(name: &str, arguments: Vec<CompiledExpr>, slot: usize) -> WindowCall {
	WindowCall::new(&functions(), name, arguments, Setter::slot(slot)).unwrap()
}

/// `(row.<name>, out)` for every output row, in output order.
fn pairs(plan: &Plan, name: &'static str) -> Vec<(Value, Value)> {
	let mut relation = Executor::default().execute(plan).unwrap();
	let mut result = Vec::new();
	while let Some(registers) = relation.next().unwrap() {
		result.push((registers.get(ROW).field(name), registers.get(OUT).clone()));
	}
	result
}

#[test]
fn test_partition_sees_only_its_rows() {
	init_tracing();
	let input = rows(json!([{"dept": "A"}, {"dept": "A"}, {"dept": "B"}, {"dept": "A"}]));
	let plan = window(input, vec![field("dept")], vec![], vec![call("partition_count", vec![], OUT)]);

	let result = pairs(&plan, "dept");
	assert_eq!(result.len(), 4);
	for (dept, count) in result {
		let expected = if dept == Value::string("A") { 3 } else { 1 };
		assert_eq!(count, Value::int(expected), "dept {}", dept);
	}
}

#[test]
fn test_without_partition_keys_input_is_one_partition() {
	let input = rows(json!([{"dept": "A"}, {"dept": "B"}, {"dept": "C"}]));
	let plan = window(input, vec![], vec![], vec![call("partition_count", vec![], OUT)]);

	assert!(pairs(&plan, "dept").iter().all(|(_, count)| count == &Value::int(3)));
}

#[test]
fn test_unknown_partition_keys_share_a_partition() {
	let input = rows(json!([{"dept": null}, {}, {"dept": "A"}]));
	let plan = window(input, vec![field("dept")], vec![], vec![call("partition_count", vec![], OUT)]);

	let result = pairs(&plan, "dept");
	assert_eq!(result.iter().filter(|(dept, _)| dept.is_unknown()).count(), 2);
	for (dept, count) in result {
		let expected = if dept.is_unknown() { 2 } else { 1 };
		assert_eq!(count, Value::int(expected));
	}
}

#[test]
fn test_lag_within_ordered_partition() {
	let input = rows(json!([
		{"d": "A", "t": 2, "v": 20},
		{"d": "B", "t": 1, "v": 5},
		{"d": "A", "t": 3, "v": 30},
		{"d": "A", "t": 1, "v": 10}
	]));
	let plan = window(input, vec![field("d")], vec![SortKey::asc(field("t"))], vec![call("lag", vec![field("v")], OUT)]);

	let result = pairs(&plan, "v");
	assert_eq!(result.len(), 4);
	// partitions come out in key order, rows in ORDER BY order
	assert_eq!(result[0].0, Value::int(10));
	assert!(result[0].1.is_null());
	assert_eq!(result[1], (Value::int(20), Value::int(10)));
	assert_eq!(result[2], (Value::int(30), Value::int(20)));
	assert_eq!(result[3].0, Value::int(5));
	assert!(result[3].1.is_null());
}

#[test]
fn test_lead_with_offset_and_default() {
	let input = rows(json!([{"t": 1}, {"t": 2}, {"t": 3}, {"t": 4}]));
	let arguments = vec![field("t"), CompiledExpr::constant(Value::int(2)), CompiledExpr::constant(Value::int(-1))];
	let plan = window(input, vec![], vec![SortKey::asc(field("t"))], vec![call("lead", arguments, OUT)]);

	let outputs: Vec<Value> = pairs(&plan, "t").into_iter().map(|(_, out)| out).collect();
	assert_eq!(outputs, vec![Value::int(3), Value::int(4), Value::int(-1), Value::int(-1)]);
}

#[test]
fn test_row_number_and_lag_see_the_input_row() {
	let input = rows(json!([{"v": "c"}, {"v": "a"}, {"v": "b"}]));
	let calls = vec![call("row_number", vec![], OUT), call("lag", vec![field("v")], SECOND)];
	let plan = window(input, vec![], vec![SortKey::desc(field("v"))], calls);

	let mut relation = Executor::default().execute(&plan).unwrap();
	let mut result = Vec::new();
	while let Some(registers) = relation.next().unwrap() {
		result.push((registers.get(ROW).field("v"), registers.get(OUT).clone(), registers.get(SECOND).clone()));
	}

	assert_eq!(result[0].0, Value::string("c"));
	assert_eq!(result[0].1, Value::int(1));
	assert!(result[0].2.is_null());
	assert_eq!(result[2], (Value::string("a"), Value::int(3), Value::string("b")));
}

#[test]
fn test_negative_lag_offset() {
	let input = rows(json!([{"t": 1}]));
	let arguments = vec![field("t"), CompiledExpr::constant(Value::int(-1))];
	let plan = window(input, vec![], vec![], vec![call("lag", arguments, OUT)]);

	let err = Executor::default().execute(&plan).unwrap().collect(&CompiledExpr::register(OUT)).unwrap_err();
	assert_eq!(err.code, "WINDOW_003");
}

#[test]
fn test_window_disabled() {
	let plan = window(rows(json!([1])), vec![], vec![], vec![call("row_number", vec![], OUT)]);

	let executor = Executor::new(ExecutionConfig::new().with_window_functions(false));
	let err = executor.execute(&plan).err().unwrap();
	assert_eq!(err.code, "WINDOW_005");
}

#[test]
fn test_window_materialization_limit() {
	let plan = window(rows(json!([1, 2, 3])), vec![], vec![], vec![call("row_number", vec![], OUT)]);

	let executor = Executor::new(ExecutionConfig::new().with_max_materialized_rows(2));
	let err = executor.execute(&plan).unwrap().collect(&CompiledExpr::register(OUT)).unwrap_err();
	assert_eq!(err.code, "RESOURCE_001");
}

#[test]
fn test_standard_registry_resolves_calls() {
	let arguments = vec![CompiledExpr::constant(Value::int(1))];
	assert!(WindowCall::new(&Functions::standard(), "LEAD", arguments, Setter::slot(OUT)).is_ok());
}

fn counting_field(name: &'static str, evaluations: Arc<AtomicUsize>) -> CompiledExpr {
	CompiledExpr::new(move |registers| {
		evaluations.fetch_add(1, Ordering::SeqCst);
		Ok(registers.get(ROW).field(name))
	})
}

#[test]
fn test_partition_and_order_keys_evaluated_once_per_row() {
	let input = Value::bag((0..50i64).map(|i| {
		Value::structure([("d", Value::int(i % 4)), ("t", Value::int((i * 13) % 50))])
	}));
	let partition_evaluations = Arc::new(AtomicUsize::new(0));
	let order_evaluations = Arc::new(AtomicUsize::new(0));

	let plan = window(
		input,
		vec![counting_field("d", partition_evaluations.clone())],
		vec![SortKey::asc(counting_field("t", order_evaluations.clone()))],
		vec![call("row_number", vec![], OUT)],
	);

	assert_eq!(pairs(&plan, "t").len(), 50);
	assert_eq!(partition_evaluations.load(Ordering::SeqCst), 50);
	assert_eq!(order_evaluations.load(Ordering::SeqCst), 50);
}
