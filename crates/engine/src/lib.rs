// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use config::ExecutionConfig;
pub use error::{Clause, EvaluationError};
pub use execute::{Executor, Relation, RelationType};
pub use expression::{CompiledExpr, Setter};
pub use ionql_type::{Error, Fragment, NullOrder, Type, Value};
pub use register::{RegisterLayout, Registers, Snapshot};

pub mod config;
pub mod error;
pub mod execute;
pub mod expression;
pub mod function;
pub mod plan;
pub mod register;
pub mod sort_key;

pub type Result<T> = std::result::Result<T, Error>;
