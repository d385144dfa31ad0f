//! The visible chat log.
//!
//! An append-only sequence of message nodes plus a single slot for the
//! "thinking" placeholder shown while a request is in flight. Every append
//! scrolls the log to its latest entry.

use crate::format::escape_html;
use crate::i18n;
use crate::language::UiLanguage;
use crate::state::{ChatMessage, ChatRole};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptNode {
    Message(ChatMessage),
    Thinking { label: String },
}

impl TranscriptNode {
    pub fn to_html(&self) -> String {
        match self {
            TranscriptNode::Message(msg) => msg.to_html(),
            TranscriptNode::Thinking { label } => format!(
                r#"<div class="message bot-message"><div class="message-content thinking-message"><div class="thinking-spinner"></div><span>{}</span></div></div>"#,
                escape_html(label)
            ),
        }
    }
}

#[derive(Debug, Default)]
pub struct Transcript {
    nodes: Vec<(u64, TranscriptNode)>,
    next_id: u64,
    thinking: Option<u64>,
    scroll_top: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: TranscriptNode) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.push((id, node));
        self.scroll_to_latest();
        id
    }

    pub fn append_user_message(&mut self, text: &str) {
        self.push(TranscriptNode::Message(ChatMessage::user(text)));
    }

    pub fn append_bot_message(&mut self, text: &str) {
        self.push(TranscriptNode::Message(ChatMessage::assistant(text)));
    }

    /// Show the placeholder unless one is already present.
    pub fn show_thinking(&mut self, lang: UiLanguage) {
        if self.thinking.is_some() {
            return;
        }
        let label = i18n::translate(lang, "processing").to_string();
        let id = self.push(TranscriptNode::Thinking { label });
        self.thinking = Some(id);
    }

    pub fn hide_thinking(&mut self) {
        if let Some(id) = self.thinking.take() {
            self.nodes.retain(|(node_id, _)| *node_id != id);
            self.scroll_top = self.scroll_top.min(self.scroll_height());
        }
    }

    pub fn has_thinking(&self) -> bool {
        self.thinking.is_some()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TranscriptNode> {
        self.nodes.iter().map(|(_, node)| node)
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.nodes().filter_map(|node| match node {
            TranscriptNode::Message(msg) => Some(msg),
            TranscriptNode::Thinking { .. } => None,
        })
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages().last()
    }

    pub fn count_role(&self, role: ChatRole) -> usize {
        self.messages().filter(|m| m.role == role).count()
    }

    pub fn user_message_count(&self) -> usize {
        self.count_role(ChatRole::User)
    }

    pub fn assistant_message_count(&self) -> usize {
        self.count_role(ChatRole::Assistant)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // Scroll positions count nodes; `scroll_height` is the maximum extent.

    pub fn scroll_height(&self) -> usize {
        self.nodes.len()
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn scroll_to(&mut self, offset: usize) {
        self.scroll_top = offset.min(self.scroll_height());
    }

    pub fn scroll_to_latest(&mut self) {
        self.scroll_top = self.scroll_height();
    }

    pub fn is_at_latest(&self) -> bool {
        self.scroll_top >= self.scroll_height()
    }

    pub fn to_html(&self) -> String {
        self.nodes().map(TranscriptNode::to_html).collect()
    }
}
