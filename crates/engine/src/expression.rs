// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Debug, Formatter};

use ionql_type::{Fragment, Value};

use crate::register::Registers;

/// A scalar expression compiled to a closure over the current registers.
pub struct CompiledExpr {
	inner: Box<dyn Fn(&Registers) -> crate::Result<Value> + Send + Sync>,
	fragment: Fragment,
}

impl CompiledExpr {
	pub fn new(f: impl Fn(&Registers) -> crate::Result<Value> + Send + Sync + 'static) -> Self {
		Self {
			inner: Box::new(f),
			fragment: Fragment::None,
		}
	}

	pub fn constant(value: Value) -> Self {
		Self::new(move |_| Ok(value.clone()))
	}

	pub fn register(slot: usize) -> Self {
		Self::new(move |registers| Ok(registers.get(slot).clone()))
	}

	/// Reads `slot`, then follows `path` through nested structs.
	pub fn field(slot: usize, path: &[&str]) -> Self {
		let path: Vec<String> = path.iter().map(|name| name.to_string()).collect();
		Self::new(move |registers| {
			let mut path = path.iter();
			let Some(first) = path.next() else {
				return Ok(registers.get(slot).clone());
			};
			let mut current = registers.get(slot).field(first);
			for name in path {
				current = current.field(name);
			}
			Ok(current)
		})
	}

	pub fn with_fragment(mut self, fragment: Fragment) -> Self {
		self.fragment = fragment;
		self
	}

	pub fn fragment(&self) -> &Fragment {
		&self.fragment
	}

	pub fn evaluate(&self, registers: &Registers) -> crate::Result<Value> {
		(self.inner)(registers)
	}
}

impl Debug for CompiledExpr {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CompiledExpr").field("fragment", &self.fragment).finish_non_exhaustive()
	}
}

enum SetterInner {
	Slot(usize),
	Custom(Box<dyn Fn(&mut Registers, Value) -> crate::Result<()> + Send + Sync>),
}

/// Writes one value into the registers, normally into a single pre-assigned slot.
pub struct Setter {
	inner: SetterInner,
}

impl Setter {
	pub fn slot(slot: usize) -> Self {
		Self {
			inner: SetterInner::Slot(slot),
		}
	}

	pub fn new(f: impl Fn(&mut Registers, Value) -> crate::Result<()> + Send + Sync + 'static) -> Self {
		Self {
			inner: SetterInner::Custom(Box::new(f)),
		}
	}

	pub fn set(&self, registers: &mut Registers, value: Value) -> crate::Result<()> {
		match &self.inner {
			SetterInner::Slot(slot) => registers.set(*slot, value),
			SetterInner::Custom(f) => f(registers, value),
		}
	}
}

impl Debug for Setter {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match &self.inner {
			SetterInner::Slot(slot) => f.debug_tuple("Setter::slot").field(slot).finish(),
			SetterInner::Custom(_) => f.write_str("Setter::custom"),
		}
	}
}
