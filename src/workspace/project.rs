use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of the project a lesson session operates on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    /// Language tag used for lesson filtering (e.g. "ruby", "swift")
    pub lang: String,
}

impl Project {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            lang: lang.into(),
        }
    }
}
