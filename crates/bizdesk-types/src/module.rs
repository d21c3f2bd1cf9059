//! Module and action vocabulary

use serde::{Deserialize, Serialize};

/// Functional areas of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleName {
	Dashboard,
	Tasks,
	Tickets,
	Services,
	Products,
	Pos,
	Invoices,
	Reports,
	Users,
	Profile,
	Settings,
	Wiki,
	Chat,
}

impl ModuleName {
	pub const ALL: [ModuleName; 13] = [
		ModuleName::Dashboard,
		ModuleName::Tasks,
		ModuleName::Tickets,
		ModuleName::Services,
		ModuleName::Products,
		ModuleName::Pos,
		ModuleName::Invoices,
		ModuleName::Reports,
		ModuleName::Users,
		ModuleName::Profile,
		ModuleName::Settings,
		ModuleName::Wiki,
		ModuleName::Chat,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			ModuleName::Dashboard => "dashboard",
			ModuleName::Tasks => "tasks",
			ModuleName::Tickets => "tickets",
			ModuleName::Services => "services",
			ModuleName::Products => "products",
			ModuleName::Pos => "pos",
			ModuleName::Invoices => "invoices",
			ModuleName::Reports => "reports",
			ModuleName::Users => "users",
			ModuleName::Profile => "profile",
			ModuleName::Settings => "settings",
			ModuleName::Wiki => "wiki",
			ModuleName::Chat => "chat",
		}
	}

	pub fn parse(name: &str) -> Option<ModuleName> {
		Self::ALL.into_iter().find(|m| m.as_str() == name)
	}

	/// Key of the on/off flag in the flat settings record
	pub fn enabled_flag_key(self) -> String {
		format!("module_{}_enabled", self.as_str())
	}
}

impl std::fmt::Display for ModuleName {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Operations a user may attempt within a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
	View,
	Create,
	Edit,
	Delete,
	SendMessage,
}

impl Action {
	pub const ALL: [Action; 5] =
		[Action::View, Action::Create, Action::Edit, Action::Delete, Action::SendMessage];

	pub fn as_str(self) -> &'static str {
		match self {
			Action::View => "view",
			Action::Create => "create",
			Action::Edit => "edit",
			Action::Delete => "delete",
			Action::SendMessage => "send_message",
		}
	}

	pub fn parse(name: &str) -> Option<Action> {
		Self::ALL.into_iter().find(|a| a.as_str() == name)
	}
}

impl std::fmt::Display for Action {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}


// vim: ts=4
