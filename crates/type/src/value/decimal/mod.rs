// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	hash::{Hash, Hasher},
	num::NonZeroU64,
	ops::Deref,
	str::FromStr,
};

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// Significant digits kept by decimal division, matching DECIMAL128.
pub const DIVISION_PRECISION: u64 = 34;

/// An arbitrary-precision decimal. Equality is numeric: `1.0 == 1.00`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Decimal(pub BigDecimal);

impl Decimal {
	pub fn new(value: BigDecimal) -> Self {
		Self(value)
	}

	pub fn inner(&self) -> &BigDecimal {
		&self.0
	}

	pub fn from_int(value: &BigInt) -> Self {
		Self(BigDecimal::new(value.clone(), 0))
	}

	/// Shortest decimal that reads back as `value`, so `0.1e0` becomes
	/// `0.1`. `None` for NaN and the infinities.
	pub fn from_f64(value: f64) -> Option<Self> {
		if !value.is_finite() {
			return None;
		}
		BigDecimal::from_str(&format!("{:e}", value)).ok().map(Self)
	}

	/// Divides rounding half-even to [`DIVISION_PRECISION`] significant
	/// digits. `None` on division by zero.
	pub fn checked_div(&self, rhs: &Decimal) -> Option<Decimal> {
		use num_traits::Zero;
		if rhs.0.is_zero() {
			return None;
		}
		let precision = NonZeroU64::new(DIVISION_PRECISION)?;
		let quotient = &self.0 / &rhs.0;
		Some(Decimal(quotient.with_precision_round(precision, RoundingMode::HalfEven).normalized()))
	}

	/// Mantissa and exponent of the normalised form; numerically equal
	/// decimals share it.
	pub fn canonical(&self) -> (BigInt, i64) {
		self.0.normalized().as_bigint_and_exponent()
	}
}

impl Hash for Decimal {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.canonical().hash(state);
	}
}

impl Deref for Decimal {
	type Target = BigDecimal;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<BigDecimal> for Decimal {
	fn from(value: BigDecimal) -> Self {
		Self(value)
	}
}

impl From<i64> for Decimal {
	fn from(value: i64) -> Self {
		Self(BigDecimal::from(value))
	}
}

impl From<i32> for Decimal {
	fn from(value: i32) -> Self {
		Self(BigDecimal::from(value))
	}
}

impl Display for Decimal {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}
