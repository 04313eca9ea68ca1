//! Data models for topics and cards

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Row keys arrive as integers or text depending on the table definition
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Int(i64),
    Text(String),
}

fn deserialize_key<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawKey::deserialize(deserializer)? {
        RawKey::Int(n) => n.to_string(),
        RawKey::Text(s) => s,
    })
}

macro_rules! row_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserialize_key(deserializer).map(Self)
            }
        }
    };
}

row_key!(
    /// Key of a row in the `topics` table
    TopicId
);
row_key!(
    /// Key of a row in the `cards` table
    CardId
);

/// A user-owned grouping of flashcards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A question/answer pair belonging to a topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub topic_id: TopicId,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

/// Client-side validation failures, reported before any provider call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed.to_string())
}

/// Insert payload for `topics`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTopic {
    pub name: String,
    pub user_id: Uuid,
}

impl NewTopic {
    pub fn new(name: &str, user_id: Uuid) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("Topic name", name)?,
            user_id,
        })
    }
}

/// Insert payload for `cards`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCard {
    pub topic_id: TopicId,
    pub question: String,
    pub answer: String,
}

impl NewCard {
    pub fn new(topic_id: TopicId, question: &str, answer: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            topic_id,
            question: required("Question", question)?,
            answer: required("Answer", answer)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_with_integer_key() {
        let json = r#"{"id":42,"name":"Biology","user_id":"6f1c8f3e-8a43-4d4e-9a8e-1f0b7c1d2e3f",
            "created_at":"2024-05-01T10:00:00.123456+00:00"}"#;
        let topic: Topic = serde_json::from_str(json).unwrap();
        assert_eq!(topic.id, TopicId::new("42"));
        assert_eq!(topic.name, "Biology");
    }

    #[test]
    fn test_card_with_text_keys() {
        let json = r#"{"id":"c-1","topic_id":"t-1","question":"Q","answer":"A",
            "created_at":"2024-05-01T10:00:00Z"}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.id.as_str(), "c-1");
        assert_eq!(card.topic_id.to_string(), "t-1");
    }

    #[test]
    fn test_new_topic_trims_and_requires_name() {
        let owner = Uuid::new_v4();
        assert_eq!(NewTopic::new("  Biology ", owner).unwrap().name, "Biology");
        assert_eq!(
            NewTopic::new("   ", owner).unwrap_err(),
            ValidationError::Required("Topic name")
        );
    }

    #[test]
    fn test_new_card_requires_both_sides() {
        let topic = TopicId::new("1");
        assert!(NewCard::new(topic.clone(), "Q", "A").is_ok());
        assert_eq!(
            NewCard::new(topic.clone(), "", "A").unwrap_err(),
            ValidationError::Required("Question")
        );
        assert_eq!(
            NewCard::new(topic, "Q", " \t").unwrap_err(),
            ValidationError::Required("Answer")
        );
    }

    #[test]
    fn test_topic_id_serializes_as_text() {
        let card = NewCard::new(TopicId::new("7"), "Q", "A").unwrap();
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["topic_id"], "7");
    }
}
