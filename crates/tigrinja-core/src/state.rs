//! UI-agnostic message types
//!
//! These are shared by every front end and don't depend on any specific UI
//! framework. Messages are immutable once created.

use crate::format::{self, escape_html, FormattedBlock, RichText};

/// A message in the chat transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub raw_text: String,
    pub blocks: Vec<FormattedBlock>,
}

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatMessage {
    /// User text is kept verbatim as a single plain paragraph; markup is never interpreted.
    pub fn user(text: &str) -> Self {
        Self {
            role: ChatRole::User,
            raw_text: text.to_string(),
            blocks: vec![FormattedBlock::Paragraph(RichText::plain(text))],
        }
    }

    pub fn assistant(text: &str) -> Self {
        Self {
            role: ChatRole::Assistant,
            raw_text: text.to_string(),
            blocks: format::format(text),
        }
    }

    /// Inner HTML of the message content.
    pub fn content_html(&self) -> String {
        match self.role {
            ChatRole::User => format!("<p>{}</p>", escape_html(&self.raw_text)),
            ChatRole::Assistant => format::to_html(&self.blocks),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.role {
            ChatRole::User => "message user-message",
            ChatRole::Assistant => "message bot-message",
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="{}"><div class="message-content">{}</div></div>"#,
            self.css_class(),
            self.content_html()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_not_formatted() {
        let msg = ChatMessage::user("**not a heading**\n* not a list");
        assert_eq!(msg.blocks.len(), 1);
        assert_eq!(
            msg.content_html(),
            "<p>**not a heading**\n* not a list</p>"
        );
    }

    #[test]
    fn test_assistant_message_is_formatted() {
        let msg = ChatMessage::assistant("**Hi**: there");
        assert_eq!(msg.role, ChatRole::Assistant);
        assert_eq!(
            msg.to_html(),
            r#"<div class="message bot-message"><div class="message-content"><h3>Hi</h3><p>there</p></div></div>"#
        );
    }
}
