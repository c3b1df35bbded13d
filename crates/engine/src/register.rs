// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use ionql_type::{Value, internal_err};

static MISSING: Value = Value::Missing;

/// All variables bound at one point of evaluation, one slot per variable
/// declared anywhere in the plan. The length never changes during an execution.
#[derive(Debug, Clone)]
pub struct Registers {
	slots: Vec<Value>,
}

/// Independent copy of a [`Registers`] taken while buffering rows.
#[derive(Debug, Clone)]
pub struct Snapshot(Arc<[Value]>);

impl Snapshot {
	pub fn get(&self, slot: usize) -> &Value {
		self.0.get(slot).unwrap_or(&MISSING)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl Registers {
	pub fn new(len: usize) -> Self {
		Self {
			slots: vec![Value::Missing; len],
		}
	}

	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Slots outside the layout read as MISSING.
	pub fn get(&self, slot: usize) -> &Value {
		self.slots.get(slot).unwrap_or(&MISSING)
	}

	pub fn set(&mut self, slot: usize, value: Value) -> crate::Result<()> {
		let len = self.slots.len();
		match self.slots.get_mut(slot) {
			Some(target) => {
				*target = value;
				Ok(())
			}
			None => internal_err!("register slot {} out of range for {} registers", slot, len),
		}
	}

	pub fn snapshot(&self) -> Snapshot {
		Snapshot(Arc::from(self.slots.as_slice()))
	}

	pub fn load(&mut self, snapshot: &Snapshot) {
		debug_assert_eq!(self.slots.len(), snapshot.len(), "snapshot taken from a different layout");
		self.slots.clear();
		self.slots.extend_from_slice(&snapshot.0);
	}
}

/// Assigns register slots to variable names while a plan is built.
#[derive(Debug, Clone, Default)]
pub struct RegisterLayout {
	names: Vec<String>,
}

impl RegisterLayout {
	pub fn new() -> Self {
		Self::default()
	}

	/// Allocates a fresh slot, even when `name` is already declared.
	pub fn declare(&mut self, name: impl Into<String>) -> usize {
		self.names.push(name.into());
		self.names.len() - 1
	}

	/// Most recently declared slot named `name`.
	pub fn slot(&self, name: &str) -> Option<usize> {
		self.names.iter().rposition(|n| n == name)
	}

	pub fn name(&self, slot: usize) -> Option<&str> {
		self.names.get(slot).map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_slots_start_missing() {
		let registers = Registers::new(3);
		assert_eq!(registers.len(), 3);
		assert!(registers.get(0).is_missing());
		assert!(registers.get(7).is_missing());
	}

	#[test]
	fn test_set_out_of_range_is_internal() {
		let mut registers = Registers::new(1);
		let err = registers.set(1, Value::int(1)).unwrap_err();
		assert!(err.is_internal());
	}

	#[test]
	fn test_snapshot_is_independent() {
		let mut registers = Registers::new(2);
		registers.set(0, Value::int(1)).unwrap();
		let snapshot = registers.snapshot();

		registers.set(0, Value::int(2)).unwrap();
		assert_eq!(snapshot.get(0), &Value::int(1));

		registers.load(&snapshot);
		assert_eq!(registers.get(0), &Value::int(1));
		assert!(registers.get(1).is_missing());
	}

	#[test]
	fn test_layout_declare_and_lookup() {
		let mut layout = RegisterLayout::new();
		let x = layout.declare("x");
		let y = layout.declare("y");
		let shadow = layout.declare("x");

		assert_eq!((x, y, shadow), (0, 1, 2));
		assert_eq!(layout.slot("x"), Some(2));
		assert_eq!(layout.slot("z"), None);
		assert_eq!(layout.name(1), Some("y"));
		assert_eq!(layout.len(), 3);
	}
}
