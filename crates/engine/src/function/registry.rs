// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, ops::Deref, sync::Arc};

use crate::function::{
	WindowFunction,
	window::{Lag, Lead, RowNumber},
};

pub type WindowFactory = Arc<dyn Fn() -> Box<dyn WindowFunction> + Send + Sync>;

#[derive(Clone)]
pub struct Functions(Arc<FunctionsInner>);

impl Functions {
	pub fn empty() -> Functions {
		Functions::builder().build()
	}

	pub fn builder() -> FunctionsBuilder {
		FunctionsBuilder(FunctionsInner {
			windows: HashMap::new(),
		})
	}

	/// lag, lead and row_number
	pub fn standard() -> Functions {
		Functions::builder()
			.register_window("lag", Lag::new)
			.register_window("lead", Lead::new)
			.register_window("row_number", RowNumber::new)
			.build()
	}
}

impl Deref for Functions {
	type Target = FunctionsInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

#[derive(Clone)]
pub struct FunctionsInner {
	windows: HashMap<String, WindowFactory>,
}

impl FunctionsInner {
	pub fn get_window(&self, name: &str) -> Option<Box<dyn WindowFunction>> {
		self.windows.get(&name.to_lowercase()).map(|func| func())
	}

	pub fn window_factory(&self, name: &str) -> Option<WindowFactory> {
		self.windows.get(&name.to_lowercase()).cloned()
	}

	pub fn window_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.windows.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}
}

pub struct FunctionsBuilder(FunctionsInner);

impl FunctionsBuilder {
	pub fn register_window<F, W>(mut self, name: &str, init: F) -> Self
	where
		F: Fn() -> W + Send + Sync + 'static,
		W: WindowFunction + 'static,
	{
		self.0.windows.insert(name.to_lowercase(), Arc::new(move || Box::new(init()) as Box<dyn WindowFunction>));

		self
	}

	pub fn build(self) -> Functions {
		Functions(Arc::new(self.0))
	}
}
