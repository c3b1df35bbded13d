// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	hash::{Hash, Hasher},
};

use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;

use crate::value::{Decimal, OrderedF64, Type, Value, VarInt};

/// The numeric tower used by arithmetic aggregates.
///
/// Mixed operands promote along INT -> FLOAT -> DECIMAL. A float only reaches
/// the decimal rung when it is finite; NaN and the infinities stay floats.
#[derive(Clone, Debug)]
pub enum Number {
	Int(VarInt),
	Float(OrderedF64),
	Decimal(Decimal),
}

/// Numeric line extended with the non-finite floats, ordered NaN first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Extended {
	NaN,
	NegativeInfinity,
	Finite(BigDecimal),
	PositiveInfinity,
}

impl Number {
	pub fn zero() -> Self {
		Number::Int(VarInt::zero())
	}

	pub fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Int(v) => Some(Number::Int(v.clone())),
			Value::Float(v) => Some(Number::Float(*v)),
			Value::Decimal(v) => Some(Number::Decimal(v.clone())),
			_ => None,
		}
	}

	pub fn into_value(self) -> Value {
		match self {
			Number::Int(v) => Value::Int(v),
			Number::Float(v) => Value::Float(v),
			Number::Decimal(v) => Value::Decimal(v),
		}
	}

	pub fn get_type(&self) -> Type {
		match self {
			Number::Int(_) => Type::Int,
			Number::Float(_) => Type::Float,
			Number::Decimal(_) => Type::Decimal,
		}
	}

	/// Decimal form, floats in their shortest round-trip digits. `None` for NaN and the infinities.
	pub fn to_decimal(&self) -> Option<Decimal> {
		match self {
			Number::Int(v) => Some(Decimal::from_int(v.inner())),
			Number::Float(v) => Decimal::from_f64(v.value()),
			Number::Decimal(v) => Some(v.clone()),
		}
	}

	fn to_f64(&self) -> f64 {
		match self {
			Number::Int(v) => v.inner().to_f64().unwrap_or(f64::NAN),
			Number::Float(v) => v.value(),
			Number::Decimal(v) => v.inner().to_f64().unwrap_or(f64::NAN),
		}
	}

	fn extended(&self) -> Extended {
		match self {
			Number::Float(v) if v.is_nan() => Extended::NaN,
			Number::Float(v) if v.value() == f64::INFINITY => Extended::PositiveInfinity,
			Number::Float(v) if v.value() == f64::NEG_INFINITY => Extended::NegativeInfinity,
			other => match other.to_decimal() {
				Some(decimal) => Extended::Finite(decimal.0),
				None => Extended::NaN,
			},
		}
	}

	pub fn add(&self, rhs: &Number) -> Number {
		match (self, rhs) {
			(Number::Int(l), Number::Int(r)) => Number::Int(VarInt::new(l.inner() + r.inner())),
			(Number::Float(l), Number::Float(r)) => Number::Float(OrderedF64(l.value() + r.value())),
			(Number::Float(_), Number::Int(_)) | (Number::Int(_), Number::Float(_)) => {
				Number::Float(OrderedF64(self.to_f64() + rhs.to_f64()))
			}
			_ => match (self.to_decimal(), rhs.to_decimal()) {
				(Some(l), Some(r)) => Number::Decimal(Decimal::new(l.0 + r.0)),
				_ => Number::Float(OrderedF64(self.to_f64() + rhs.to_f64())),
			},
		}
	}

	/// Numeric comparison across kinds; NaN is below every other number.
	pub fn compare(&self, other: &Number) -> Ordering {
		match (self, other) {
			(Number::Int(l), Number::Int(r)) => l.cmp(r),
			(Number::Float(l), Number::Float(r)) => l.cmp(r),
			(Number::Decimal(l), Number::Decimal(r)) => l.cmp(r),
			_ => self.extended().cmp(&other.extended()),
		}
	}

	/// Hash consistent with [`Number::compare`] equality.
	pub fn hash_canonical<H: Hasher>(&self, state: &mut H) {
		match self.extended() {
			Extended::NaN => 0u8.hash(state),
			Extended::NegativeInfinity => 1u8.hash(state),
			Extended::Finite(decimal) => {
				2u8.hash(state);
				Decimal::new(decimal).canonical().hash(state);
			}
			Extended::PositiveInfinity => 3u8.hash(state),
		}
	}
}
