//! Permission evaluation and module gating

pub mod evaluator;
pub mod gate;
pub mod handler;

pub use evaluator::{ModuleCapabilities, PermissionContext, check_permission};
pub use gate::ModuleGate;

// vim: ts=4
