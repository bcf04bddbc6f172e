//! Outbound interaction replies
//!
//! Replies travel back in the webhook's HTTP response. Ephemeral replies
//! are visible only to the invoking member; buttons carry composite custom
//! ids the next event round-trips.

use serde::Serialize;

/// A button attached to a reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonSpec {
    pub custom_id: String,
    pub label: String,
}

/// The reply rendered for one interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionReply {
    pub content: String,
    pub ephemeral: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<ButtonSpec>,
}

impl InteractionReply {
    /// A reply everyone in the channel can see
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
            buttons: Vec::new(),
        }
    }

    /// A reply only the invoking member can see
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
            buttons: Vec::new(),
        }
    }

    /// Attach accept/reject style buttons
    pub fn with_buttons(mut self, buttons: Vec<ButtonSpec>) -> Self {
        self.buttons = buttons;
        self
    }
}
