// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

use super::Blob;

impl Blob {
	pub fn to_hex(&self) -> String {
		let mut out = String::with_capacity(2 + self.len() * 2);
		out.push_str("0x");
		for byte in self.as_bytes() {
			let _ = write!(out, "{:02x}", byte);
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_to_hex() {
		assert_eq!(Blob::from("Hi").to_hex(), "0x4869");
		assert_eq!(Blob::from(&[0x00u8, 0xff][..]).to_hex(), "0x00ff");
		assert_eq!(Blob::empty().to_hex(), "0x");
	}
}
