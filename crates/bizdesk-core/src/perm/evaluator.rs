//! Role/module/action permission evaluation
//!
//! Evaluation is a pure function of the matrix snapshot and the caller's role:
//! - no role (not loaded, unauthenticated, unknown role) denies
//! - `administrator` is allowed everything, whatever the matrix says
//! - otherwise the module/action pair must exist and list the role
//!
//! Missing data never grants access.

use serde::Serialize;

use crate::prelude::*;
use bizdesk_types::matrix::PermissionMatrix;

/// Core permission check
pub fn check_permission(
	matrix: Option<&PermissionMatrix>,
	role: Option<Role>,
	module: &str,
	action: &str,
) -> bool {
	let Some(role) = role else {
		return false;
	};
	if role.is_admin() {
		return true;
	}
	let Some(matrix) = matrix else {
		return false;
	};
	matrix.allowed_roles(module, action).is_some_and(|roles| roles.contains(role.as_str()))
}

/// Matrix snapshot bound to one role
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionContext<'a> {
	matrix: Option<&'a PermissionMatrix>,
	role: Option<Role>,
}

/// Actions a context allows on one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleCapabilities {
	pub module: ModuleName,
	pub actions: Vec<Action>,
}

impl<'a> PermissionContext<'a> {
	pub fn new(matrix: Option<&'a PermissionMatrix>, role: Option<Role>) -> Self {
		Self { matrix, role }
	}

	pub fn role(&self) -> Option<Role> {
		self.role
	}

	pub fn check_permission(&self, module: &str, action: &str) -> bool {
		check_permission(self.matrix, self.role, module, action)
	}

	pub fn allows(&self, module: ModuleName, action: Action) -> bool {
		self.check_permission(module.as_str(), action.as_str())
	}

	pub fn can_view_module(&self, module: &str) -> bool {
		self.check_permission(module, Action::View.as_str())
	}

	pub fn can_create(&self, module: &str) -> bool {
		self.check_permission(module, Action::Create.as_str())
	}

	pub fn can_edit(&self, module: &str) -> bool {
		self.check_permission(module, Action::Edit.as_str())
	}

	pub fn can_delete(&self, module: &str) -> bool {
		self.check_permission(module, Action::Delete.as_str())
	}

	pub fn can_send_message(&self, module: &str) -> bool {
		self.check_permission(module, Action::SendMessage.as_str())
	}

	/// Allowed actions for every known module
	pub fn capabilities(&self) -> Vec<ModuleCapabilities> {
		ModuleName::ALL
			.into_iter()
			.map(|module| ModuleCapabilities {
				module,
				actions: Action::ALL.into_iter().filter(|a| self.allows(module, *a)).collect(),
			})
			.collect()
	}

	/// Fails with `PermissionDenied` unless the action is allowed
	pub fn require(&self, module: ModuleName, action: Action) -> BdResult<()> {
		if self.allows(module, action) {
			Ok(())
		} else {
			debug!(role = ?self.role, module = %module, action = %action, "Permission denied");
			Err(Error::PermissionDenied)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const MODULES: &[&str] = &[
		"dashboard", "tasks", "tickets", "services", "products", "pos", "invoices", "reports",
		"users", "profile", "settings", "wiki", "chat", "unknown",
	];
	const ACTIONS: &[&str] = &["view", "create", "edit", "delete", "send_message", "archive"];

	fn matrix(json: &str) -> PermissionMatrix {
		serde_json::from_str(json).unwrap()
	}

	#[test]
	fn test_admin_always_allowed() {
		let empty = PermissionMatrix::new();
		let denying = matrix(r#"{"tasks": {"view": [], "delete": ["worker"]}}"#);
		for module in MODULES {
			for action in ACTIONS {
				assert!(check_permission(None, Some(Role::Administrator), module, action));
				assert!(check_permission(Some(&empty), Some(Role::Administrator), module, action));
				assert!(check_permission(Some(&denying), Some(Role::Administrator), module, action));
			}
		}
	}

	#[test]
	fn test_null_matrix_denies_non_admin() {
		for role in [Role::Client, Role::Worker] {
			for module in MODULES {
				for action in ACTIONS {
					assert!(!check_permission(None, Some(role), module, action));
				}
			}
		}
	}

	#[test]
	fn test_null_role_denies() {
		let m = PermissionMatrix::new().allow(ModuleName::Tasks, Action::View, &Role::ALL);
		for role in Role::ALL {
			assert!(check_permission(Some(&m), Some(role), "tasks", "view"));
		}
		assert!(!check_permission(Some(&m), None, "tasks", "view"));
		assert!(!check_permission(None, None, "tasks", "view"));
	}

	#[test]
	fn test_absent_entries_deny() {
		let m = matrix(r#"{"tasks": {"view": ["worker"]}}"#);
		assert!(!check_permission(Some(&m), Some(Role::Worker), "tasks", "edit"));
		assert!(!check_permission(Some(&m), Some(Role::Worker), "wiki", "view"));
	}

	#[test]
	fn test_membership() {
		let m = matrix(
			r#"{"tasks": {"view": ["worker", "client"], "edit": ["worker"], "delete": []}}"#,
		);
		for role in Role::ALL {
			for action in ["view", "edit", "delete"] {
				let expected = role.is_admin()
					|| m.allowed_roles("tasks", action).unwrap().contains(role.as_str());
				assert_eq!(check_permission(Some(&m), Some(role), "tasks", action), expected);
			}
		}
		assert!(check_permission(Some(&m), Some(Role::Client), "tasks", "view"));
		assert!(!check_permission(Some(&m), Some(Role::Client), "tasks", "edit"));
	}

	#[test]
	fn test_worker_view_but_not_delete() {
		let m = matrix(r#"{"tasks": {"view": ["worker"], "delete": []}}"#);
		let ctx = PermissionContext::new(Some(&m), Some(Role::Worker));
		assert!(ctx.can_view_module("tasks"));
		assert!(!ctx.can_delete("tasks"));
	}

	#[test]
	fn test_admin_with_empty_matrix() {
		let m = matrix("{}");
		let ctx = PermissionContext::new(Some(&m), Some(Role::Administrator));
		assert!(ctx.can_view_module("tasks"));
	}

	#[test]
	fn test_send_message() {
		let m = matrix(r#"{"chat": {"send_message": ["client", "worker"]}}"#);
		assert!(PermissionContext::new(Some(&m), Some(Role::Client)).can_send_message("chat"));
		assert!(!PermissionContext::new(Some(&m), None).can_send_message("chat"));
	}

	#[test]
	fn test_named_helpers() {
		let m = matrix(
			r#"{"invoices": {"create": ["worker"], "edit": ["worker"], "delete": ["worker"]}}"#,
		);
		let ctx = PermissionContext::new(Some(&m), Some(Role::Worker));
		assert!(!ctx.can_view_module("invoices"));
		assert!(ctx.can_create("invoices"));
		assert!(ctx.can_edit("invoices"));
		assert!(ctx.can_delete("invoices"));
		assert!(!ctx.can_send_message("invoices"));
	}

	#[test]
	fn test_idempotent() {
		let m = matrix(r#"{"wiki": {"view": ["client"]}}"#);
		let first = check_permission(Some(&m), Some(Role::Client), "wiki", "view");
		let second = check_permission(Some(&m), Some(Role::Client), "wiki", "view");
		assert_eq!(first, second);
		assert_eq!(m, matrix(r#"{"wiki": {"view": ["client"]}}"#));
	}

	#[test]
	fn test_capabilities() {
		let m = matrix(r#"{"tasks": {"view": ["client"], "create": ["client"]}}"#);
		let caps = PermissionContext::new(Some(&m), Some(Role::Client)).capabilities();
		assert_eq!(caps.len(), ModuleName::ALL.len());

		let tasks = caps.iter().find(|c| c.module == ModuleName::Tasks).unwrap();
		assert_eq!(tasks.actions, vec![Action::View, Action::Create]);
		let wiki = caps.iter().find(|c| c.module == ModuleName::Wiki).unwrap();
		assert!(wiki.actions.is_empty());

		let admin = PermissionContext::new(None, Some(Role::Administrator)).capabilities();
		assert!(admin.iter().all(|c| c.actions.len() == Action::ALL.len()));
	}

	#[test]
	fn test_require() {
		let ctx = PermissionContext::new(None, Some(Role::Worker));
		assert!(matches!(
			ctx.require(ModuleName::Tasks, Action::View),
			Err(Error::PermissionDenied)
		));
		let admin = PermissionContext::new(None, Some(Role::Administrator));
		assert!(admin.require(ModuleName::Settings, Action::Edit).is_ok());
	}
}

// vim: ts=4
