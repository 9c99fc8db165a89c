use chrono::{DateTime, Utc};
use platform::datastore::{Entity, Key, Value};

pub const GREETING_KIND: &str = "Greeting";

/// Singleton ancestor key of every greeting. Queries scoped to it observe
/// prior writes immediately.
pub fn guestbook_key() -> Key {
    Key::named("Guestbook", "default_guestbook")
}

/// One signed guestbook entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Greeting {
    /// Display string of the signing principal; empty when anonymous.
    pub author: String,
    pub content: String,
    pub date: DateTime<Utc>,
}

impl Greeting {
    /// Entity under a fresh child key of the guestbook ancestor.
    pub fn to_entity(&self) -> Entity {
        Entity::new(Key::incomplete(GREETING_KIND, Some(guestbook_key())))
            .with("Author", self.author.as_str())
            .with("Content", self.content.as_str())
            .with("Date", self.date)
    }

    pub fn from_entity(entity: &Entity) -> Self {
        Self {
            author: entity
                .get("Author")
                .and_then(Value::as_text)
                .unwrap_or_default()
                .to_string(),
            content: entity
                .get("Content")
                .and_then(Value::as_text)
                .unwrap_or_default()
                .to_string(),
            date: entity
                .get("Date")
                .and_then(Value::as_timestamp)
                .unwrap_or(DateTime::UNIX_EPOCH),
        }
    }
}
