// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod aggregate;
mod registry;
pub mod window;

pub use aggregate::{Accumulator, AggregateKind, Quantifier};
pub use registry::{Functions, FunctionsBuilder, WindowFactory};
pub use window::WindowFunction;
