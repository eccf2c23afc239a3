//! Chat widget: per-partner append-only transcripts.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};

pub const AUTO_REPLY: &str = "Thanks for your message. How can I assist you further?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConversationId {
    DrSmith,
    Pharmacy,
    AiAssistant,
}

impl ConversationId {
    pub const ALL: [ConversationId; 3] = [
        ConversationId::DrSmith,
        ConversationId::Pharmacy,
        ConversationId::AiAssistant,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ConversationId::DrSmith => "dr-smith",
            ConversationId::Pharmacy => "pharmacy",
            ConversationId::AiAssistant => "ai-assistant",
        }
    }

    /// Name shown in the chat header.
    pub fn header(self) -> &'static str {
        match self {
            ConversationId::DrSmith => "Dr. Smith",
            ConversationId::Pharmacy => "Pharmacy #123",
            ConversationId::AiAssistant => "MI_CARE AI",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Local,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    /// Display time, `HH:MM`.
    pub time: String,
}

impl ChatMessage {
    fn at(sender: Sender, text: impl Into<String>, when: DateTime<Local>) -> Self {
        Self {
            sender,
            text: text.into(),
            time: when.format("%H:%M").to_string(),
        }
    }
}

/// All transcripts plus the conversation currently open.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    transcripts: BTreeMap<ConversationId, Vec<ChatMessage>>,
    active: Option<ConversationId>,
}

impl ChatLog {
    pub fn open(&mut self, conversation: ConversationId) {
        self.active = Some(conversation);
    }

    pub fn active(&self) -> Option<ConversationId> {
        self.active
    }

    /// Header label for the open conversation.
    pub fn header(&self) -> &'static str {
        self.active.map(ConversationId::header).unwrap_or("Chat")
    }

    /// Append a local message. Returns `None` for blank input.
    pub fn push_local(
        &mut self,
        conversation: ConversationId,
        text: &str,
        when: DateTime<Local>,
    ) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let log = self.transcripts.entry(conversation).or_default();
        log.push(ChatMessage::at(Sender::Local, text, when));
        log.last()
    }

    pub fn push_reply(&mut self, conversation: ConversationId, when: DateTime<Local>) {
        self.transcripts
            .entry(conversation)
            .or_default()
            .push(ChatMessage::at(Sender::Remote, AUTO_REPLY, when));
    }

    pub fn transcript(&self, conversation: ConversationId) -> &[ChatMessage] {
        self.transcripts
            .get(&conversation)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
