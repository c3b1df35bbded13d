// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::Deref,
};

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

/// An arbitrary-precision signed integer
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VarInt(pub BigInt);

impl VarInt {
	pub fn new(value: BigInt) -> Self {
		Self(value)
	}

	pub fn zero() -> Self {
		Self(BigInt::zero())
	}

	pub fn inner(&self) -> &BigInt {
		&self.0
	}

	/// Narrows to the engine's native width, `None` when out of range.
	pub fn to_i64(&self) -> Option<i64> {
		self.0.to_i64()
	}

	pub fn is_negative(&self) -> bool {
		self.0.sign() == num_bigint::Sign::Minus
	}
}

impl Deref for VarInt {
	type Target = BigInt;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<i64> for VarInt {
	fn from(value: i64) -> Self {
		Self(BigInt::from(value))
	}
}

impl From<i32> for VarInt {
	fn from(value: i32) -> Self {
		Self(BigInt::from(value))
	}
}

impl From<u64> for VarInt {
	fn from(value: u64) -> Self {
		Self(BigInt::from(value))
	}
}

impl From<i128> for VarInt {
	fn from(value: i128) -> Self {
		Self(BigInt::from(value))
	}
}

impl From<BigInt> for VarInt {
	fn from(value: BigInt) -> Self {
		Self(value)
	}
}

impl Display for VarInt {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}
