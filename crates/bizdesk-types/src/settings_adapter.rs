//! Settings store adapter and the flat settings record
//!
//! The settings store is an external collaborator holding one flat record:
//! `module_<name>_enabled` flags, the `module_permissions` matrix and any other
//! configuration fields the front end keeps there.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

use crate::error::BdResult;
use crate::matrix::PermissionMatrix;
use crate::module::ModuleName;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsRecord {
	#[serde(default)]
	pub module_permissions: Option<PermissionMatrix>,

	/// Every other field, preserved verbatim (module flags included)
	#[serde(flatten)]
	pub fields: Map<String, Value>,
}

impl SettingsRecord {
	/// Value of `module_<name>_enabled`, `None` if absent or not a boolean
	pub fn module_enabled(&self, module: ModuleName) -> Option<bool> {
		self.fields.get(&module.enabled_flag_key()).and_then(Value::as_bool)
	}

	pub fn set_module_enabled(&mut self, module: ModuleName, enabled: bool) {
		self.fields.insert(module.enabled_flag_key(), Value::Bool(enabled));
	}

	pub fn with_permissions(mut self, matrix: PermissionMatrix) -> Self {
		self.module_permissions = Some(matrix);
		self
	}
}

#[async_trait]
pub trait SettingsAdapter: Debug + Send + Sync {
	/// Reads the stored settings record, `None` if nothing was ever saved
	async fn read_settings(&self) -> BdResult<Option<SettingsRecord>>;

	/// Replaces the stored record as a whole
	async fn replace_settings(&self, record: &SettingsRecord) -> BdResult<()>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_record_shape() {
		let json = r#"{
			"module_tasks_enabled": true,
			"module_pos_enabled": false,
			"module_permissions": {"tasks": {"view": ["worker"]}},
			"company_name": "Acme"
		}"#;
		let record: SettingsRecord = serde_json::from_str(json).unwrap();

		assert_eq!(record.module_enabled(ModuleName::Tasks), Some(true));
		assert_eq!(record.module_enabled(ModuleName::Pos), Some(false));
		assert_eq!(record.module_enabled(ModuleName::Wiki), None);
		assert!(record.module_permissions.is_some());
		assert_eq!(record.fields.get("company_name"), Some(&Value::from("Acme")));
		assert!(!record.fields.contains_key("module_permissions"));
	}

	#[test]
	fn test_null_matrix() {
		let record: SettingsRecord =
			serde_json::from_str(r#"{"module_permissions": null}"#).unwrap();
		assert!(record.module_permissions.is_none());

		let record: SettingsRecord = serde_json::from_str("{}").unwrap();
		assert!(record.module_permissions.is_none());
	}

	#[test]
	fn test_non_bool_flag_is_ignored() {
		let record: SettingsRecord =
			serde_json::from_str(r#"{"module_chat_enabled": "yes"}"#).unwrap();
		assert_eq!(record.module_enabled(ModuleName::Chat), None);
	}
}

// vim: ts=4
