use crate::service::Backend;
use crate::types::{ChatMessage, Sender};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

pub const GREETING: &str = "Hello! I'm your innovation assistant. How can I help you today?";
pub const APOLOGY: &str =
    "Sorry, I'm having trouble processing your request. Please try again.";

/// Transcript with the innovation assistant.
pub struct ChatPanel {
    backend: Arc<dyn Backend>,
    pub is_loading: bool,
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatPanel {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let mut panel = Self {
            backend,
            is_loading: false,
            messages: Vec::new(),
            next_id: 0,
        };
        panel.push(Sender::Ai, GREETING.into());
        panel
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    fn push(&mut self, sender: Sender, content: String) {
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id: self.next_id,
            content,
            sender,
            timestamp: Utc::now(),
        });
    }

    /// Sends `input` and appends the reply. Blank input is ignored and
    /// returns `None`. A backend failure appends an apology instead.
    pub async fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        self.push(Sender::User, text.into());
        self.is_loading = true;
        let reply = self.backend.send_chat_message(text).await;
        self.is_loading = false;

        match reply {
            Ok(content) => {
                info!(chars = content.len(), "assistant replied");
                self.push(Sender::Ai, content);
            }
            Err(e) => {
                error!(error = %e, "error sending message");
                self.push(Sender::Ai, APOLOGY.into());
            }
        }
        self.messages.last()
    }

    /// Starts over with only the greeting.
    pub fn new_conversation(&mut self) {
        self.messages.clear();
        self.push(Sender::Ai, GREETING.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::{FlakyBackend, mock};
    use crate::service::mock::CHAT_RESPONSES;

    #[test]
    fn starts_with_greeting() {
        let panel = ChatPanel::new(mock());
        assert_eq!(panel.messages().len(), 1);
        assert_eq!(panel.messages()[0].content, GREETING);
        assert_eq!(panel.messages()[0].sender, Sender::Ai);
    }

    #[tokio::test(start_paused = true)]
    async fn send_appends_user_and_reply() {
        let mut panel = ChatPanel::new(mock());
        let reply = panel.send("  how do we grow?  ").await.unwrap();
        assert_eq!(reply.sender, Sender::Ai);
        assert!(CHAT_RESPONSES.contains(&reply.content.as_str()));
        let msgs = panel.messages();
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[1].content, "how do we grow?");
        assert_eq!(msgs[1].sender, Sender::User);
        assert!(msgs.windows(2).all(|w| w[0].id < w[1].id));
        assert!(!panel.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_is_ignored() {
        let mut panel = ChatPanel::new(mock());
        assert!(panel.send("   ").await.is_none());
        assert_eq!(panel.messages().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn backend_error_becomes_apology() {
        let mut panel = ChatPanel::new(Arc::new(FlakyBackend::new(&["chat"])));
        let reply = panel.send("hello").await.unwrap();
        assert_eq!(reply.content, APOLOGY);
        assert!(!panel.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn new_conversation_resets_transcript() {
        let mut panel = ChatPanel::new(mock());
        panel.send("one").await;
        panel.new_conversation();
        assert_eq!(panel.messages().len(), 1);
        assert_eq!(panel.messages()[0].content, GREETING);
    }
}
