// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;
use serde_json::{Map, Number as JsonNumber, Value as JsonValue};

use crate::value::{Decimal, Value, VarInt};

impl Value {
	/// Objects become STRUCTs, arrays LISTs, integral numbers INTs and every
	/// other number a DECIMAL built from its literal text.
	pub fn from_json(json: JsonValue) -> Value {
		match json {
			JsonValue::Null => Value::Null,
			JsonValue::Bool(b) => Value::Boolean(b),
			JsonValue::Number(n) => from_json_number(&n),
			JsonValue::String(s) => Value::String(s),
			JsonValue::Array(values) => Value::List(values.into_iter().map(Value::from_json).collect()),
			JsonValue::Object(fields) => {
				Value::Struct(fields.into_iter().map(|(name, value)| (name, Value::from_json(value))).collect())
			}
		}
	}

	/// MISSING struct fields are dropped, duplicate field names keep the first
	/// occurrence. Non-finite floats become `null`.
	pub fn to_json(&self) -> JsonValue {
		match self {
			Value::Null | Value::Missing => JsonValue::Null,
			Value::Boolean(b) => JsonValue::Bool(*b),
			Value::Int(v) => int_to_json(v),
			Value::Float(v) => JsonNumber::from_f64(v.value()).map(JsonValue::Number).unwrap_or(JsonValue::Null),
			Value::Decimal(v) => decimal_to_json(v),
			Value::Date(v) => JsonValue::String(v.format("%Y-%m-%d").to_string()),
			Value::Time(v) => JsonValue::String(v.to_string()),
			Value::Timestamp(v) => JsonValue::String(v.to_rfc3339()),
			Value::String(v) | Value::Symbol(v) => JsonValue::String(v.clone()),
			Value::Clob(v) => JsonValue::String(String::from_utf8_lossy(v.as_bytes()).into_owned()),
			Value::Blob(v) => JsonValue::String(v.to_hex()),
			Value::List(values) | Value::Bag(values) => JsonValue::Array(values.iter().map(Value::to_json).collect()),
			Value::Struct(fields) => {
				let mut object = Map::new();
				for (name, value) in fields {
					if value.is_missing() || object.contains_key(name) {
						continue;
					}
					object.insert(name.clone(), value.to_json());
				}
				JsonValue::Object(object)
			}
		}
	}
}

fn from_json_number(n: &JsonNumber) -> Value {
	if let Some(i) = n.as_i64() {
		return Value::Int(VarInt::from(i));
	}
	if let Some(u) = n.as_u64() {
		return Value::Int(VarInt::from(u));
	}
	match BigDecimal::from_str(&n.to_string()) {
		Ok(decimal) => Value::Decimal(Decimal::new(decimal)),
		Err(_) => n.as_f64().map(Value::float).unwrap_or(Value::Null),
	}
}

fn int_to_json(v: &VarInt) -> JsonValue {
	if let Some(i) = v.inner().to_i64() {
		return JsonValue::Number(i.into());
	}
	if let Some(u) = v.inner().to_u64() {
		return JsonValue::Number(u.into());
	}
	JsonValue::String(v.to_string())
}

fn decimal_to_json(v: &Decimal) -> JsonValue {
	let normalized = v.inner().normalized();
	if normalized.is_integer() {
		if let Some(i) = normalized.to_i64() {
			return JsonValue::Number(i.into());
		}
	}
	normalized.to_f64().and_then(JsonNumber::from_f64).map(JsonValue::Number).unwrap_or(JsonValue::Null)
}
