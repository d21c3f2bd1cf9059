//! Chat: private conversation lookup and message records

pub mod handler;
pub mod lookup;
pub mod service;

pub use lookup::find_private_conversation;
pub use service::ChatService;

// vim: ts=4
