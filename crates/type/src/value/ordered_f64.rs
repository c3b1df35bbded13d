// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	fmt::{Debug, Display, Formatter},
	hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

/// An `f64` with a total order: NaN sorts below every other float and equals
/// itself, `-0.0` equals `0.0`.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedF64(pub f64);

impl OrderedF64 {
	pub fn value(&self) -> f64 {
		self.0
	}

	pub fn is_nan(&self) -> bool {
		self.0.is_nan()
	}
}

impl PartialEq for OrderedF64 {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for OrderedF64 {}

impl PartialOrd for OrderedF64 {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for OrderedF64 {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self.0.is_nan(), other.0.is_nan()) {
			(true, true) => Ordering::Equal,
			(true, false) => Ordering::Less,
			(false, true) => Ordering::Greater,
			(false, false) => self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal),
		}
	}
}

impl Hash for OrderedF64 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		if self.0.is_nan() {
			f64::NAN.to_bits().hash(state);
		} else if self.0 == 0.0 {
			0u64.hash(state);
		} else {
			self.0.to_bits().hash(state);
		}
	}
}

impl Debug for OrderedF64 {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Debug::fmt(&self.0, f)
	}
}

impl Display for OrderedF64 {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if self.0.is_nan() {
			f.write_str("nan")
		} else if self.0.is_infinite() {
			f.write_str(if self.0 > 0.0 {
				"+inf"
			} else {
				"-inf"
			})
		} else {
			write!(f, "{:e}", self.0)
		}
	}
}

impl From<f64> for OrderedF64 {
	fn from(value: f64) -> Self {
		OrderedF64(value)
	}
}

impl From<OrderedF64> for f64 {
	fn from(value: OrderedF64) -> Self {
		value.0
	}
}
