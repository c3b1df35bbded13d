// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Scan, Unpivot, Filter and Let, plus the relation surface they share.

mod common;

use ionql_engine::{
	CompiledExpr, Executor, RegisterLayout, RelationType, Setter, Value,
	plan::{Binding, ExpressionSource, FilterNode, LetNode, PhysicalPlan, Plan, ScanNode, Table, UnpivotNode},
};
use common::{init_tracing, json, rows, scan};
use serde_json::json;

fn pair(l: usize, r: usize) -> CompiledExpr {
	CompiledExpr::new(move |registers| {
		Ok(Value::structure([("v", registers.get(l).clone()), ("at", registers.get(r).clone())]))
	})
}

#[test]
fn test_list_scan_binds_ordinal() {
	init_tracing();
	let mut layout = RegisterLayout::new();
	let x = layout.declare("x");
	let i = layout.declare("i");

	let source = ExpressionSource::new(CompiledExpr::constant(json(json!(["a", "b"]))));
	let plan = Plan::new(PhysicalPlan::Scan(ScanNode::new(source, Setter::slot(x)).with_at(Setter::slot(i))), &layout);

	let relation = Executor::default().execute(&plan).unwrap();
	assert_eq!(relation.relation_type(), RelationType::Bag);

	let result = relation.collect(&pair(x, i)).unwrap();
	assert_eq!(result, rows(json!([{"v": "a", "at": 0}, {"v": "b", "at": 1}])));
}

#[test]
fn test_bag_scan_binds_missing_ordinal() {
	let mut layout = RegisterLayout::new();
	let x = layout.declare("x");
	let i = layout.declare("i");

	let source = ExpressionSource::new(CompiledExpr::constant(rows(json!([1, 2]))));
	let plan = Plan::new(PhysicalPlan::Scan(ScanNode::new(source, Setter::slot(x)).with_at(Setter::slot(i))), &layout);

	let mut relation = Executor::default().execute(&plan).unwrap();
	let mut seen = 0;
	while let Some(registers) = relation.next().unwrap() {
		assert!(registers.get(i).is_missing());
		seen += 1;
	}
	assert_eq!(seen, 2);
}

#[test]
fn test_scalar_scans_as_singleton() {
	let mut layout = RegisterLayout::new();
	let x = layout.declare("x");
	let plan = Plan::new(scan(Value::int(42), x), &layout);

	let result = Executor::default().execute(&plan).unwrap().collect(&CompiledExpr::register(x)).unwrap();
	assert_eq!(result, Value::bag([Value::int(42)]));
}

#[test]
fn test_table_scan_binds_address() {
	let mut layout = RegisterLayout::new();
	let x = layout.declare("x");
	let at = layout.declare("at");
	let by = layout.declare("by");

	let table = Table::new("orders", [json(json!({"id": 1})), json(json!({"id": 2}))]);
	let plan = Plan::new(
		PhysicalPlan::Scan(ScanNode::new(table, Setter::slot(x)).with_at(Setter::slot(at)).with_by(Setter::slot(by))),
		&layout,
	);

	let mut relation = Executor::default().execute(&plan).unwrap();
	let registers = relation.next().unwrap().unwrap();
	assert_eq!(registers.get(by), &Value::string("orders/0"));
	assert!(registers.get(at).is_missing());

	let registers = relation.next().unwrap().unwrap();
	assert_eq!(registers.get(x).field("id"), Value::int(2));
	assert_eq!(registers.get(by), &Value::string("orders/1"));

	assert!(relation.next().unwrap().is_none());
	assert!(relation.next().unwrap().is_none());
}

#[test]
fn test_unpivot_struct_fields() {
	let mut layout = RegisterLayout::new();
	let v = layout.declare("v");
	let k = layout.declare("k");

	let node = UnpivotNode::new(CompiledExpr::constant(json(json!({"a": 1, "b": "two"}))), Setter::slot(v))
		.with_at(Setter::slot(k));
	let plan = Plan::new(PhysicalPlan::Unpivot(node), &layout);

	let result = Executor::default().execute(&plan).unwrap().collect(&pair(v, k)).unwrap();
	assert_eq!(result, rows(json!([{"v": "two", "at": "b"}, {"v": 1, "at": "a"}])));
}

#[test]
fn test_unpivot_missing_and_scalar() {
	let mut layout = RegisterLayout::new();
	let v = layout.declare("v");
	let k = layout.declare("k");

	let missing = Plan::new(
		PhysicalPlan::Unpivot(UnpivotNode::new(CompiledExpr::constant(Value::Missing), Setter::slot(v))),
		&layout,
	);
	let result = Executor::default().execute(&missing).unwrap().collect(&CompiledExpr::register(v)).unwrap();
	assert_eq!(result, Value::bag([]));

	let scalar = Plan::new(
		PhysicalPlan::Unpivot(
			UnpivotNode::new(CompiledExpr::constant(Value::int(5)), Setter::slot(v)).with_at(Setter::slot(k)),
		),
		&layout,
	);
	let result = Executor::default().execute(&scalar).unwrap().collect(&pair(v, k)).unwrap();
	assert_eq!(result, rows(json!([{"v": 5, "at": "_1"}])));
}

#[test]
fn test_filter_accepts_only_true() {
	let mut layout = RegisterLayout::new();
	let x = layout.declare("x");

	let input = rows(json!([
		{"id": 1, "keep": true},
		{"id": 2, "keep": false},
		{"id": 3, "keep": null},
		{"id": 4, "keep": "yes"},
		{"id": 5}
	]));
	let plan = Plan::new(
		PhysicalPlan::Filter(FilterNode {
			input: Box::new(scan(input, x)),
			predicate: CompiledExpr::field(x, &["keep"]),
		}),
		&layout,
	);

	let relation = Executor::default().execute(&plan).unwrap();
	assert_eq!(relation.relation_type(), RelationType::Bag);
	let result = relation.collect(&CompiledExpr::field(x, &["id"])).unwrap();
	assert_eq!(result, Value::bag([Value::int(1)]));
}

#[test]
fn test_let_bindings_in_order() {
	let mut layout = RegisterLayout::new();
	let x = layout.declare("x");
	let a = layout.declare("a");
	let doubled = layout.declare("doubled");

	let double = CompiledExpr::new(move |registers| match registers.get(a) {
		Value::Int(v) => Ok(Value::int(v.to_i64().unwrap_or_default() * 2)),
		_ => Ok(Value::Null),
	});

	let plan = Plan::new(
		PhysicalPlan::Let(LetNode {
			input: Box::new(scan(rows(json!([{"a": 1}, {"a": 4}, {}])), x)),
			bindings: vec![
				Binding::new(Setter::slot(a), CompiledExpr::field(x, &["a"])),
				Binding::new(Setter::slot(doubled), double),
			],
		}),
		&layout,
	);

	let result = Executor::default().execute(&plan).unwrap().collect(&CompiledExpr::register(doubled)).unwrap();
	assert_eq!(result, Value::bag([Value::int(2), Value::int(8), Value::Null]));
}
