//! Roles and the authenticated user identity

use serde::{Deserialize, Serialize};

/// Closed set of user roles
///
/// `Administrator` is implicitly allowed everything; the other two roles only
/// get what the permission matrix grants them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	Client,
	Worker,
	Administrator,
}

impl Role {
	pub const ALL: [Role; 3] = [Role::Client, Role::Worker, Role::Administrator];

	pub fn as_str(self) -> &'static str {
		match self {
			Role::Client => "client",
			Role::Worker => "worker",
			Role::Administrator => "administrator",
		}
	}

	/// Parses a role name, returning `None` for anything outside the closed set
	pub fn parse(name: &str) -> Option<Role> {
		match name {
			"client" => Some(Role::Client),
			"worker" => Some(Role::Worker),
			"administrator" => Some(Role::Administrator),
			_ => None,
		}
	}

	pub fn is_admin(self) -> bool {
		self == Role::Administrator
	}
}

impl std::fmt::Display for Role {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Identity resolved by the auth layer from a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
	pub id: Box<str>,
	pub email: Box<str>,
	/// `None` when the provider issued a role outside the closed set
	pub role: Option<Role>,
	pub display_name: Box<str>,
}


// vim: ts=4
