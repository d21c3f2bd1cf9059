//! JSON-file store for the settings record and chat records
//!
//! Layout under the base directory:
//! - `settings.json`: the settings record
//! - `chat/conversations.json`: all conversations
//! - `chat/messages/<conversation id>.json`: messages of one conversation

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::{
	fs::{create_dir_all, read, rename, write},
	sync::Mutex,
};
use tracing::{debug, info};

use bizdesk::{
	chat_adapter::{ChatAdapter, ChatMessage, Conversation, ConversationKind},
	prelude::*,
	settings_adapter::{SettingsAdapter, SettingsRecord},
};

const SETTINGS_FILE: &str = "settings.json";
const CONVERSATIONS_FILE: &str = "conversations.json";

/// Conversation ids are generated here; anything else cannot name a file
fn valid_id(id: &str) -> bool {
	!id.is_empty() && id.len() <= 64 && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> BdResult<Option<T>> {
	match read(path).await {
		Ok(buf) => Ok(Some(serde_json::from_slice(&buf)?)),
		Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
		Err(err) => Err(err.into()),
	}
}

/// Writes to a temp file next to `path`, then renames over it
async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> BdResult<()> {
	let tmp_path = path.with_extension(format!("tmp-{}", uuid::Uuid::new_v4()));
	write(&tmp_path, serde_json::to_vec_pretty(value)?).await?;
	rename(&tmp_path, path).await?;
	Ok(())
}

#[derive(Debug)]
pub struct StoreAdapterFs {
	base_dir: Box<Path>,
	write_lock: Mutex<()>,
}

impl StoreAdapterFs {
	pub async fn new(base_dir: Box<Path>) -> BdResult<Self> {
		create_dir_all(base_dir.join("chat").join("messages")).await?;
		info!("Store directory: {:?}", base_dir);
		Ok(Self { base_dir, write_lock: Mutex::new(()) })
	}

	fn settings_path(&self) -> PathBuf {
		self.base_dir.join(SETTINGS_FILE)
	}

	fn conversations_path(&self) -> PathBuf {
		self.base_dir.join("chat").join(CONVERSATIONS_FILE)
	}

	fn messages_path(&self, conversation_id: &str) -> BdResult<PathBuf> {
		if !valid_id(conversation_id) {
			return Err(Error::NotFound);
		}
		Ok(self.base_dir.join("chat").join("messages").join(format!("{}.json", conversation_id)))
	}

	async fn conversations(&self) -> BdResult<Vec<Conversation>> {
		Ok(read_json(&self.conversations_path()).await?.unwrap_or_default())
	}
}

#[async_trait]
impl SettingsAdapter for StoreAdapterFs {
	async fn read_settings(&self) -> BdResult<Option<SettingsRecord>> {
		read_json(&self.settings_path()).await
	}

	async fn replace_settings(&self, record: &SettingsRecord) -> BdResult<()> {
		let _guard = self.write_lock.lock().await;
		write_json(&self.settings_path(), record).await?;
		debug!("settings.json replaced");
		Ok(())
	}
}

#[async_trait]
impl ChatAdapter for StoreAdapterFs {
	async fn list_conversations(&self, user_id: &str) -> BdResult<Vec<Conversation>> {
		let mut conversations = self.conversations().await?;
		conversations.retain(|conv| conv.has_participant(user_id));
		Ok(conversations)
	}

	async fn read_conversation(&self, conversation_id: &str) -> BdResult<Option<Conversation>> {
		let conversations = self.conversations().await?;
		Ok(conversations.into_iter().find(|conv| conv.id.as_ref() == conversation_id))
	}

	async fn create_conversation(
		&self,
		kind: ConversationKind,
		participants: &[&str],
	) -> BdResult<Conversation> {
		let _guard = self.write_lock.lock().await;
		let mut conversations = self.conversations().await?;

		let conversation = Conversation {
			id: uuid::Uuid::new_v4().to_string().into(),
			kind,
			participants: participants.iter().map(|p| Box::from(*p)).collect(),
			created_at: Timestamp::now(),
		};
		conversations.push(conversation.clone());
		write_json(&self.conversations_path(), &conversations).await?;

		debug!(conversation = %conversation.id, "Conversation stored");
		Ok(conversation)
	}

	async fn list_messages(&self, conversation_id: &str) -> BdResult<Vec<ChatMessage>> {
		Ok(read_json(&self.messages_path(conversation_id)?).await?.unwrap_or_default())
	}

	async fn create_message(
		&self,
		conversation_id: &str,
		sender_id: &str,
		body: &str,
	) -> BdResult<ChatMessage> {
		let path = self.messages_path(conversation_id)?;
		let _guard = self.write_lock.lock().await;
		let mut messages: Vec<ChatMessage> = read_json(&path).await?.unwrap_or_default();

		let message = ChatMessage {
			id: uuid::Uuid::new_v4().to_string().into(),
			conversation_id: conversation_id.into(),
			sender_id: sender_id.into(),
			body: body.to_string(),
			created_at: Timestamp::now(),
		};
		messages.push(message.clone());
		write_json(&path, &messages).await?;

		Ok(message)
	}
}


// vim: ts=4
