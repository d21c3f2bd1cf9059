//! Chat store adapter
//!
//! Conversations and messages live in an external store. Real-time delivery
//! is handled elsewhere; this trait only covers the records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::error::BdResult;
use crate::types::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationKind {
	Private,
	Group,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
	pub id: Box<str>,
	pub kind: ConversationKind,
	pub participants: Vec<Box<str>>,
	pub created_at: Timestamp,
}

impl Conversation {
	pub fn has_participant(&self, user_id: &str) -> bool {
		self.participants.iter().any(|p| p.as_ref() == user_id)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
	pub id: Box<str>,
	pub conversation_id: Box<str>,
	pub sender_id: Box<str>,
	pub body: String,
	pub created_at: Timestamp,
}

#[async_trait]
pub trait ChatAdapter: Debug + Send + Sync {
	/// Lists the conversations a user participates in
	async fn list_conversations(&self, user_id: &str) -> BdResult<Vec<Conversation>>;

	/// Reads one conversation
	async fn read_conversation(&self, conversation_id: &str) -> BdResult<Option<Conversation>>;

	/// Creates a conversation, returning the stored record
	async fn create_conversation(
		&self,
		kind: ConversationKind,
		participants: &[&str],
	) -> BdResult<Conversation>;

	/// Lists the messages of a conversation, oldest first
	async fn list_messages(&self, conversation_id: &str) -> BdResult<Vec<ChatMessage>>;

	/// Appends a message to a conversation
	async fn create_message(
		&self,
		conversation_id: &str,
		sender_id: &str,
		body: &str,
	) -> BdResult<ChatMessage>;
}

// vim: ts=4
