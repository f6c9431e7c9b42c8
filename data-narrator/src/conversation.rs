//! Role-tagged chat messages and the append-only conversation that carries them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Ordered messages sent to the chat service. Messages can only be appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The assistant reply, if one has been appended.
    pub fn reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.as_str())
    }
}

/// Task description and context as system turns, then one user turn per chunk.
pub fn build<S: AsRef<str>>(chunks: &[S], task_description: &str, context: &str) -> Conversation {
    let mut conversation = Conversation::new();
    conversation.push(Message::system(task_description));
    conversation.push(Message::system(context));
    for chunk in chunks {
        conversation.push(Message::user(chunk.as_ref()));
    }
    conversation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_turns_precede_chunks_in_order() {
        let chunks = ["CreditScore  Geography", "        619     France", "        608      Spain"];
        let conversation = build(&chunks, "task", "context");

        assert_eq!(conversation.len(), chunks.len() + 2);
        assert_eq!(conversation.messages()[0], Message::system("task"));
        assert_eq!(conversation.messages()[1], Message::system("context"));
        for (message, chunk) in conversation.messages()[2..].iter().zip(chunks) {
            assert_eq!(message.role, Role::User);
            assert_eq!(message.content, chunk);
        }
        assert_eq!(conversation.reply(), None);
    }

    #[test]
    fn no_chunks_leaves_only_system_turns() {
        let conversation = build::<String>(&[], "task", "context");
        assert_eq!(conversation.len(), 2);
        assert!(conversation.messages().iter().all(|m| m.role == Role::System));
    }

    #[test]
    fn messages_serialize_with_lowercase_roles() {
        let json = serde_json::to_value(Message::assistant("ok")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "assistant", "content": "ok"}));
    }
}
