use dashmap::DashMap;

/// Mapping from action ids to human-readable shortcut text, used when
/// rendering action references inside lesson messages.
pub struct Keymap {
    bindings: DashMap<String, String>,
}

impl Keymap {
    pub fn new() -> Self {
        Self {
            bindings: DashMap::new(),
        }
    }

    /// Bind `action_id` to a shortcut label, replacing any previous binding
    pub fn bind(&self, action_id: impl Into<String>, shortcut: impl Into<String>) {
        self.bindings.insert(action_id.into(), shortcut.into());
    }

    /// Shortcut text for `action_id`; unmapped ids render as the id itself
    pub fn shortcut_text(&self, action_id: &str) -> String {
        self.bindings
            .get(action_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| action_id.to_string())
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}
