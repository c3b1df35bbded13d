// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod aggregate;
pub mod compile;
pub mod filter;
pub mod join;
pub mod r#let;
pub mod offset;
pub mod scan;
pub mod sort;
pub mod take;
pub mod unpivot;
pub mod window;
