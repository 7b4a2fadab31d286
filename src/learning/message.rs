use serde::{Deserialize, Serialize};

use crate::workspace::Keymap;

const ACTION_OPEN: &str = "<action>";
const ACTION_CLOSE: &str = "</action>";

/// One segment of an instructional message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum MessagePart {
    Text(String),
    /// Reference to an editor action, resolved to its shortcut text
    Action { id: String, shortcut: String },
}

/// Structured instructional message emitted to the presentation surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub parts: Vec<MessagePart>,
    pub sent_at: chrono::DateTime<chrono::Utc>,
}

/// Markup for referencing an action inside message text
pub fn action_ref(action_id: &str) -> String {
    format!("{ACTION_OPEN}{action_id}{ACTION_CLOSE}")
}

impl Message {
    /// Parse raw message text, splitting out embedded `<action>Id</action>`
    /// references and resolving each to its shortcut via the keymap.
    /// An unterminated reference is kept as literal text.
    pub fn parse(raw: &str, keymap: &Keymap) -> Self {
        let mut parts = Vec::new();
        let mut rest = raw;

        while let Some(start) = rest.find(ACTION_OPEN) {
            let after = &rest[start + ACTION_OPEN.len()..];
            let Some(end) = after.find(ACTION_CLOSE) else {
                break;
            };
            if start > 0 {
                parts.push(MessagePart::Text(rest[..start].to_string()));
            }
            let id = &after[..end];
            parts.push(MessagePart::Action {
                id: id.to_string(),
                shortcut: keymap.shortcut_text(id),
            });
            rest = &after[end + ACTION_CLOSE.len()..];
        }
        if !rest.is_empty() {
            parts.push(MessagePart::Text(rest.to_string()));
        }

        Self {
            parts,
            sent_at: chrono::Utc::now(),
        }
    }

    /// Rendered plain-text form, with action references shown as shortcuts
    pub fn plain_text(&self) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                MessagePart::Text(text) => text.clone(),
                MessagePart::Action { shortcut, .. } => shortcut.clone(),
            })
            .collect()
    }
}
