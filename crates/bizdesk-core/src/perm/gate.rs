//! Module visibility gate
//!
//! A module can be switched off with its `module_<name>_enabled` flag and can
//! be hidden from a role through the matrix's `view` entry. Pages disagree on
//! which of the two applies, so the mode is chosen explicitly per call site.

use serde::{Deserialize, Serialize};

use super::evaluator::check_permission;
use crate::prelude::*;
use bizdesk_types::settings_adapter::SettingsRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleGate {
	/// Only the `module_<name>_enabled` flag
	Flag,
	/// Only the matrix `view` entry
	Matrix,
	/// Flag and matrix must both pass
	Both,
}

impl ModuleGate {
	/// Whether `module` is visible for `role` under this gate
	///
	/// Without a loaded record the flag check fails; the matrix check then
	/// behaves like the evaluator on a missing matrix. An absent or
	/// non-boolean flag counts as enabled.
	pub fn is_open(
		self,
		record: Option<&SettingsRecord>,
		role: Option<Role>,
		module: ModuleName,
	) -> bool {
		let flag = || record.is_some_and(|r| r.module_enabled(module).unwrap_or(true));
		let matrix = || {
			check_permission(
				record.and_then(|r| r.module_permissions.as_ref()),
				role,
				module.as_str(),
				Action::View.as_str(),
			)
		};
		match self {
			ModuleGate::Flag => flag(),
			ModuleGate::Matrix => matrix(),
			ModuleGate::Both => flag() && matrix(),
		}
	}
}


// vim: ts=4
