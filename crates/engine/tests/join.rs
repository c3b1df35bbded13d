// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;

use ionql_engine::{
	CompiledExpr, Executor, RegisterLayout, Setter, Value,
	plan::{ExpressionSource, JoinKind, JoinNode, PhysicalPlan, Plan, ScanNode},
};
use common::{init_tracing, rows, scan};
use serde_json::json;

const L: usize = 0;
const R: usize = 1;

fn layout() -> RegisterLayout {
	let mut layout = RegisterLayout::new();
	layout.declare("l");
	layout.declare("r");
	layout
}

fn same_id() -> CompiledExpr {
	CompiledExpr::new(|registers| Ok(Value::bool(registers.get(L).field("id") == registers.get(R).field("id"))))
}

fn join(kind: JoinKind, left: Value, right: Value, condition: Option<CompiledExpr>) -> PhysicalPlan {
	let null_extension = match kind {
		JoinKind::Right => vec![Setter::slot(L)],
		_ => vec![Setter::slot(R)],
	};
	PhysicalPlan::Join(JoinNode {
		kind,
		left: Box::new(scan(left, L)),
		right: Box::new(scan(right, R)),
		condition,
		null_extension,
	})
}

/// Names of both sides per output row, NULL where a side was null extended.
fn names(plan: &Plan) -> Vec<(Value, Value)> {
	let mut relation = Executor::default().execute(plan).unwrap();
	let mut result = Vec::new();
	while let Some(registers) = relation.next().unwrap() {
		let name = |slot: usize| match registers.get(slot) {
			Value::Null => Value::Null,
			row => row.field("name"),
		};
		result.push((name(L), name(R)));
	}
	result
}

#[test]
fn test_left_join_null_extends_unmatched() {
	init_tracing();
	let left = rows(json!([{"id": 1, "name": "L1"}, {"id": 2, "name": "L2"}]));
	let right = rows(json!([{"id": 1, "name": "R1"}]));
	let plan = Plan::new(join(JoinKind::Left, left, right, Some(same_id())), &layout());

	let result = names(&plan);
	assert_eq!(result.len(), 2);
	assert_eq!(result[0], (Value::string("L1"), Value::string("R1")));
	assert_eq!(result[1].0, Value::string("L2"));
	assert!(result[1].1.is_null());
}

#[test]
fn test_inner_join_drops_unmatched() {
	let left = rows(json!([{"id": 1, "name": "L1"}, {"id": 2, "name": "L2"}]));
	let right = rows(json!([{"id": 1, "name": "R1"}]));
	let plan = Plan::new(join(JoinKind::Inner, left, right, Some(same_id())), &layout());

	assert_eq!(names(&plan), vec![(Value::string("L1"), Value::string("R1"))]);
}

#[test]
fn test_left_join_emits_every_match() {
	let left = rows(json!([{"id": 1, "name": "L1"}]));
	let right = rows(json!([{"id": 1, "name": "R1"}, {"id": 2, "name": "R2"}, {"id": 1, "name": "R3"}]));
	let plan = Plan::new(join(JoinKind::Left, left, right, Some(same_id())), &layout());

	let result = names(&plan);
	assert_eq!(result.len(), 2);
	assert!(result.iter().all(|(l, r)| l == &Value::string("L1") && !r.is_null()));
}

#[test]
fn test_right_join_null_extends_left() {
	let left = rows(json!([{"id": 1, "name": "L1"}]));
	let right = rows(json!([{"id": 1, "name": "R1"}, {"id": 3, "name": "R3"}]));
	let plan = Plan::new(join(JoinKind::Right, left, right, Some(same_id())), &layout());

	let result = names(&plan);
	assert_eq!(result.len(), 2);
	assert_eq!(result[0], (Value::string("L1"), Value::string("R1")));
	assert!(result[1].0.is_null());
	assert_eq!(result[1].1, Value::string("R3"));
}

#[test]
fn test_join_without_condition_is_cross_product() {
	let left = rows(json!([{"name": "a"}, {"name": "b"}]));
	let right = rows(json!([{"name": "x"}, {"name": "y"}]));
	let plan = Plan::new(join(JoinKind::Inner, left, right, None), &layout());

	assert_eq!(names(&plan).len(), 4);
}

#[test]
fn test_left_join_with_empty_right() {
	let left = rows(json!([{"name": "a"}, {"name": "b"}]));
	let plan = Plan::new(join(JoinKind::Left, left, Value::bag([]), Some(same_id())), &layout());

	let result = names(&plan);
	assert_eq!(result.len(), 2);
	assert!(result.iter().all(|(_, r)| r.is_null()));
}

#[test]
fn test_inner_side_sees_outer_row() {
	let mut layout = RegisterLayout::new();
	let order = layout.declare("o");
	let item = layout.declare("i");

	// FROM orders AS o LEFT JOIN o.items AS i
	let plan = Plan::new(
		PhysicalPlan::Join(JoinNode {
			kind: JoinKind::Left,
			left: Box::new(scan(rows(json!([{"items": [1, 2]}, {"items": []}])), order)),
			right: Box::new(PhysicalPlan::Scan(ScanNode::new(
				ExpressionSource::new(CompiledExpr::field(order, &["items"])),
				Setter::slot(item),
			))),
			condition: None,
			null_extension: vec![Setter::slot(item)],
		}),
		&layout,
	);

	let result = Executor::default().execute(&plan).unwrap().collect(&CompiledExpr::register(item)).unwrap();
	assert_eq!(result, Value::bag([Value::int(1), Value::int(2), Value::Null]));
}

#[test]
fn test_full_join_fails_fast() {
	let plan = Plan::new(join(JoinKind::Full, rows(json!([1])), rows(json!([1])), None), &layout());

	let err = Executor::default().execute(&plan).err().unwrap();
	assert_eq!(err.code, "JOIN_001");
	assert!(err.is_internal());
}
