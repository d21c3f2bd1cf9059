//! Chat service: private conversation lookup and message posting
//!
//! Every operation is gated by the `chat` module permissions of the caller.
//! Delivery of new messages to other participants is not handled here.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::lookup::find_private_conversation;
use crate::perm::PermissionContext;
use crate::prelude::*;
use bizdesk_types::chat_adapter::{ChatAdapter, ChatMessage, Conversation, ConversationKind};

pub struct ChatService {
	adapter: Arc<dyn ChatAdapter>,
	/// Held across lookup and create so one pair never gets two private conversations
	open_lock: Mutex<()>,
}

impl ChatService {
	pub fn new(adapter: Arc<dyn ChatAdapter>) -> Self {
		Self { adapter, open_lock: Mutex::new(()) }
	}

	/// Returns the private conversation between `actor` and `peer`, creating it if needed
	pub async fn open_private(
		&self,
		perms: &PermissionContext<'_>,
		actor: &UserIdentity,
		peer: &str,
	) -> BdResult<Conversation> {
		perms.require(ModuleName::Chat, Action::View)?;
		let peer = peer.trim();
		if peer.is_empty() || peer == actor.id.as_ref() {
			return Err(Error::ValidationError("peer must be another user".into()));
		}

		let _guard = self.open_lock.lock().await;
		let conversations = self.adapter.list_conversations(&actor.id).await?;
		if let Some(existing) = find_private_conversation(&conversations, &actor.id, peer) {
			debug!(user_id = %actor.id, peer = %peer, conversation = %existing.id, "Reusing private conversation");
			return Ok(existing.clone());
		}

		let conversation = self
			.adapter
			.create_conversation(ConversationKind::Private, &[actor.id.as_ref(), peer])
			.await?;
		info!(user_id = %actor.id, peer = %peer, conversation = %conversation.id, "Private conversation created");
		Ok(conversation)
	}

	/// Messages of a conversation the actor participates in
	pub async fn messages(
		&self,
		perms: &PermissionContext<'_>,
		actor: &UserIdentity,
		conversation_id: &str,
	) -> BdResult<Vec<ChatMessage>> {
		perms.require(ModuleName::Chat, Action::View)?;
		self.participating(actor, conversation_id).await?;
		self.adapter.list_messages(conversation_id).await
	}

	/// Appends a message; the body must not be blank
	pub async fn post_message(
		&self,
		perms: &PermissionContext<'_>,
		actor: &UserIdentity,
		conversation_id: &str,
		body: &str,
	) -> BdResult<ChatMessage> {
		perms.require(ModuleName::Chat, Action::SendMessage)?;
		let body = body.trim();
		if body.is_empty() {
			return Err(Error::ValidationError("message body is empty".into()));
		}
		self.participating(actor, conversation_id).await?;
		self.adapter.create_message(conversation_id, &actor.id, body).await
	}

	async fn participating(
		&self,
		actor: &UserIdentity,
		conversation_id: &str,
	) -> BdResult<Conversation> {
		let conversation =
			self.adapter.read_conversation(conversation_id).await?.ok_or(Error::NotFound)?;
		if !conversation.has_participant(&actor.id) {
			warn!(user_id = %actor.id, conversation = %conversation_id, "Not a participant");
			return Err(Error::PermissionDenied);
		}
		Ok(conversation)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use bizdesk_types::matrix::PermissionMatrix;

	#[derive(Debug, Default)]
	struct MemoryChat {
		conversations: parking_lot::Mutex<Vec<Conversation>>,
		messages: parking_lot::Mutex<Vec<ChatMessage>>,
	}

	#[async_trait]
	impl ChatAdapter for MemoryChat {
		async fn list_conversations(&self, user_id: &str) -> BdResult<Vec<Conversation>> {
			// Lets a concurrent open run between lookup and create
			tokio::task::yield_now().await;
			let conversations = self.conversations.lock();
			Ok(conversations.iter().filter(|c| c.has_participant(user_id)).cloned().collect())
		}

		async fn read_conversation(&self, conversation_id: &str) -> BdResult<Option<Conversation>> {
			let conversations = self.conversations.lock();
			Ok(conversations.iter().find(|c| c.id.as_ref() == conversation_id).cloned())
		}

		async fn create_conversation(
			&self,
			kind: ConversationKind,
			participants: &[&str],
		) -> BdResult<Conversation> {
			let mut conversations = self.conversations.lock();
			let conversation = Conversation {
				id: format!("c{}", conversations.len() + 1).into(),
				kind,
				participants: participants.iter().map(|p| Box::from(*p)).collect(),
				created_at: Timestamp(0),
			};
			conversations.push(conversation.clone());
			Ok(conversation)
		}

		async fn list_messages(&self, conversation_id: &str) -> BdResult<Vec<ChatMessage>> {
			let messages = self.messages.lock();
			Ok(messages
				.iter()
				.filter(|m| m.conversation_id.as_ref() == conversation_id)
				.cloned()
				.collect())
		}

		async fn create_message(
			&self,
			conversation_id: &str,
			sender_id: &str,
			body: &str,
		) -> BdResult<ChatMessage> {
			let mut messages = self.messages.lock();
			let message = ChatMessage {
				id: format!("m{}", messages.len() + 1).into(),
				conversation_id: conversation_id.into(),
				sender_id: sender_id.into(),
				body: body.to_string(),
				created_at: Timestamp(0),
			};
			messages.push(message.clone());
			Ok(message)
		}
	}

	fn user(id: &str, role: Option<Role>) -> UserIdentity {
		UserIdentity {
			id: id.into(),
			email: format!("{}@example.com", id).into(),
			role,
			display_name: id.into(),
		}
	}

	fn matrix() -> PermissionMatrix {
		PermissionMatrix::new()
			.allow(ModuleName::Chat, Action::View, &[Role::Client, Role::Worker])
			.allow(ModuleName::Chat, Action::SendMessage, &[Role::Worker])
	}

	#[tokio::test]
	async fn test_open_private_reuses_existing() {
		let service = ChatService::new(Arc::new(MemoryChat::default()));
		let matrix = matrix();
		let alice = user("alice", Some(Role::Worker));
		let bob = user("bob", Some(Role::Client));

		let first = service
			.open_private(&PermissionContext::new(Some(&matrix), alice.role), &alice, "bob")
			.await
			.unwrap();
		let second = service
			.open_private(&PermissionContext::new(Some(&matrix), bob.role), &bob, "alice")
			.await
			.unwrap();
		assert_eq!(first.id, second.id);
		assert_eq!(first.kind, ConversationKind::Private);

		let padded = service
			.open_private(&PermissionContext::new(Some(&matrix), alice.role), &alice, " bob ")
			.await
			.unwrap();
		assert_eq!(padded.id, first.id);
	}

	#[tokio::test]
	async fn test_concurrent_open_creates_one() {
		let adapter = Arc::new(MemoryChat::default());
		let service = ChatService::new(adapter.clone());
		let matrix = matrix();
		let alice = user("alice", Some(Role::Worker));
		let bob = user("bob", Some(Role::Client));
		let as_alice = PermissionContext::new(Some(&matrix), alice.role);
		let as_bob = PermissionContext::new(Some(&matrix), bob.role);

		let (a, b) = tokio::join!(
			service.open_private(&as_alice, &alice, "bob"),
			service.open_private(&as_bob, &bob, "alice"),
		);
		assert_eq!(a.unwrap().id, b.unwrap().id);
		assert_eq!(adapter.conversations.lock().len(), 1);
	}

	#[tokio::test]
	async fn test_open_private_validation() {
		let service = ChatService::new(Arc::new(MemoryChat::default()));
		let matrix = matrix();
		let alice = user("alice", Some(Role::Worker));
		let perms = PermissionContext::new(Some(&matrix), alice.role);

		assert!(matches!(
			service.open_private(&perms, &alice, "").await,
			Err(Error::ValidationError(_))
		));
		assert!(matches!(
			service.open_private(&perms, &alice, "   ").await,
			Err(Error::ValidationError(_))
		));
		assert!(matches!(
			service.open_private(&perms, &alice, "alice").await,
			Err(Error::ValidationError(_))
		));
		assert!(matches!(
			service.open_private(&perms, &alice, " alice ").await,
			Err(Error::ValidationError(_))
		));

		let denied = PermissionContext::new(None, alice.role);
		assert!(matches!(
			service.open_private(&denied, &alice, "bob").await,
			Err(Error::PermissionDenied)
		));
	}

	#[tokio::test]
	async fn test_post_message_rules() {
		let service = ChatService::new(Arc::new(MemoryChat::default()));
		let matrix = matrix();
		let alice = user("alice", Some(Role::Worker));
		let bob = user("bob", Some(Role::Client));
		let carol = user("carol", Some(Role::Worker));
		let as_alice = PermissionContext::new(Some(&matrix), alice.role);
		let as_bob = PermissionContext::new(Some(&matrix), bob.role);
		let as_carol = PermissionContext::new(Some(&matrix), carol.role);

		let conv = service.open_private(&as_alice, &alice, "bob").await.unwrap();

		let msg = service.post_message(&as_alice, &alice, &conv.id, " hi ").await.unwrap();
		assert_eq!(msg.body, "hi");
		assert!(matches!(
			service.post_message(&as_alice, &alice, &conv.id, "  ").await,
			Err(Error::ValidationError(_))
		));
		assert!(matches!(
			service.post_message(&as_bob, &bob, &conv.id, "hello").await,
			Err(Error::PermissionDenied)
		));
		assert!(matches!(
			service.post_message(&as_carol, &carol, &conv.id, "hello").await,
			Err(Error::PermissionDenied)
		));
		assert!(matches!(
			service.messages(&as_alice, &alice, "nope").await,
			Err(Error::NotFound)
		));

		let messages = service.messages(&as_bob, &bob, &conv.id).await.unwrap();
		assert_eq!(messages.len(), 1);
	}
}

// vim: ts=4
