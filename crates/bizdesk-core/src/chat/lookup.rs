//! Private conversation lookup

use bizdesk_types::chat_adapter::{Conversation, ConversationKind};

/// First private conversation whose participants are exactly `a` and `b`
///
/// Participant order does not matter. Group conversations never match, even
/// with the same two members, and a user has no private conversation with
/// themselves.
pub fn find_private_conversation<'a>(
	conversations: &'a [Conversation],
	a: &str,
	b: &str,
) -> Option<&'a Conversation> {
	if a == b {
		return None;
	}
	conversations.iter().find(|conv| {
		conv.kind == ConversationKind::Private
			&& conv.participants.len() == 2
			&& conv.has_participant(a)
			&& conv.has_participant(b)
	})
}


// vim: ts=4
