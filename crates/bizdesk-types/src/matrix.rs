//! Permission matrix: module -> action -> allowed role names
//!
//! Keys and role names are kept as plain strings so that stored data with
//! modules, actions or roles unknown to this build still loads. Unknown
//! entries never match anything during evaluation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{BdResult, Error};
use crate::identity::Role;
use crate::module::{Action, ModuleName};

pub type ActionRoles = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMatrix(BTreeMap<String, ActionRoles>);

impl PermissionMatrix {
	pub fn new() -> Self {
		Self::default()
	}

	/// Roles listed for a module/action pair, `None` if the pair has no entry
	pub fn allowed_roles(&self, module: &str, action: &str) -> Option<&BTreeSet<String>> {
		self.0.get(module)?.get(action)
	}

	/// Replaces the role set of a module/action pair
	pub fn set<I, S>(&mut self, module: &str, action: &str, roles: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.0
			.entry(module.to_string())
			.or_default()
			.insert(action.to_string(), roles.into_iter().map(Into::into).collect());
	}

	/// Builder-style variant of [`PermissionMatrix::set`] using the typed vocabulary
	pub fn allow(mut self, module: ModuleName, action: Action, roles: &[Role]) -> Self {
		self.set(module.as_str(), action.as_str(), roles.iter().map(|r| r.as_str()));
		self
	}

	/// Rejects module, action or role names outside the closed sets
	///
	/// Used before a matrix is written back to the settings store; reads stay
	/// lenient.
	pub fn validate(&self) -> BdResult<()> {
		for (module, actions) in &self.0 {
			if ModuleName::parse(module).is_none() {
				return Err(Error::ValidationError(format!("unknown module '{}'", module)));
			}
			for (action, roles) in actions {
				if Action::parse(action).is_none() {
					return Err(Error::ValidationError(format!(
						"unknown action '{}' in module '{}'",
						action, module
					)));
				}
				if let Some(role) = roles.iter().find(|r| Role::parse(r).is_none()) {
					return Err(Error::ValidationError(format!(
						"unknown role '{}' in {}.{}",
						role, module, action
					)));
				}
			}
		}
		Ok(())
	}

	/// Copy of the matrix where every present action set also lists `administrator`
	///
	/// Evaluation does not depend on this: administrators are allowed by a
	/// hardcoded override. This is for exporting an explicit matrix.
	pub fn with_implicit_admin(&self) -> Self {
		let mut matrix = self.clone();
		for actions in matrix.0.values_mut() {
			for roles in actions.values_mut() {
				roles.insert(Role::Administrator.as_str().to_string());
			}
		}
		matrix
	}
}


// vim: ts=4
