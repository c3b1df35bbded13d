// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

use crate::error::diagnostic::Diagnostic;

pub struct DefaultRenderer;

impl DefaultRenderer {
	pub fn render_string(diagnostic: &Diagnostic) -> String {
		let mut out = String::new();
		Self::render(&mut out, diagnostic, 0);
		out
	}

	fn render(out: &mut String, diagnostic: &Diagnostic, depth: usize) {
		let indent = "  ".repeat(depth);

		let _ = writeln!(out, "{}Error {}: {}", indent, diagnostic.code, diagnostic.message);

		if let Some((line, column)) = diagnostic.fragment.position() {
			let _ = writeln!(out, "{}  --> line {}, column {}", indent, line.0, column.0);
			let _ = writeln!(out, "{}   | {}", indent, diagnostic.fragment.text());
			if let Some(label) = &diagnostic.label {
				let _ = writeln!(out, "{}   = {}", indent, label);
			}
		} else if let Some(label) = &diagnostic.label {
			let _ = writeln!(out, "{}  = {}", indent, label);
		}

		for (property, value) in &diagnostic.properties {
			let _ = writeln!(out, "{}  {}: {}", indent, property, value);
		}

		if let Some(help) = &diagnostic.help {
			let _ = writeln!(out, "{}help: {}", indent, help);
		}

		for note in &diagnostic.notes {
			let _ = writeln!(out, "{}note: {}", indent, note);
		}

		if let Some(cause) = &diagnostic.cause {
			let _ = writeln!(out, "{}caused by:", indent);
			Self::render(out, cause, depth + 1);
		}
	}
}
