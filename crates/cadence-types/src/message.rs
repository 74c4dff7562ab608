//! Outgoing notification messages queued on an entity.
//!
//! The action core never talks to the network. It pushes
//! [`OutgoingMessage`] values into the target entity's queue and the
//! messaging layer decides how to deliver them.

use serde::{Deserialize, Serialize};

/// Chat channel a text message is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Local chat, visible to the entity and those nearby.
    Local,
    /// Server-wide announcements.
    Server,
}

/// Display colour for raw text messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextColor {
    /// Light blue, used for activity notices.
    Blue1,
    /// Light green, used for rewards.
    Green1,
    /// Light red, used for warnings.
    Red1,
    /// Neutral grey.
    Grey1,
}

/// A message waiting in an entity's outgoing queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutgoingMessage {
    /// Plain text shown in a chat channel.
    RawText {
        /// Channel the text is shown in.
        channel: Channel,
        /// Display colour.
        color: TextColor,
        /// The text itself.
        text: String,
    },
}

impl OutgoingMessage {
    /// Build a raw text message.
    pub fn raw_text(channel: Channel, color: TextColor, text: impl Into<String>) -> Self {
        Self::RawText {
            channel,
            color,
            text: text.into(),
        }
    }

    /// Notice sent when a harvest of `item_name` is canceled.
    pub fn stopped_harvesting(item_name: &str) -> Self {
        Self::raw_text(
            Channel::Local,
            TextColor::Blue1,
            format!("You stopped harvesting {item_name}"),
        )
    }

    /// Notice sent when a harvest roll grants `item_name`.
    pub fn harvested(item_name: &str) -> Self {
        Self::raw_text(
            Channel::Local,
            TextColor::Green1,
            format!("You harvested {item_name}"),
        )
    }

    /// The text content of the message.
    pub fn text(&self) -> &str {
        match self {
            Self::RawText { text, .. } => text,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn stopped_harvesting_is_blue_local_chat() {
        let msg = OutgoingMessage::stopped_harvesting("Log");
        assert_eq!(
            msg,
            OutgoingMessage::RawText {
                channel: Channel::Local,
                color: TextColor::Blue1,
                text: String::from("You stopped harvesting Log"),
            }
        );
        assert_eq!(msg.text(), "You stopped harvesting Log");
    }

    #[test]
    fn serialized_form_is_tagged() {
        let msg = OutgoingMessage::harvested("Berry");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "raw_text");
        assert_eq!(json["channel"], "Local");
        assert_eq!(json["text"], "You harvested Berry");
    }
}
