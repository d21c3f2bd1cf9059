pub use crate::error::{BdResult, Error};
pub use crate::identity::{Role, UserIdentity};
pub use crate::module::{Action, ModuleName};
pub use crate::types::Timestamp;

// vim: ts=4
