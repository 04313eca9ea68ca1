//! Topic and card operations over the data provider
//!
//! Tables:
//! ```text
//! topics (id, name, user_id, created_at)
//! cards  (id, topic_id, question, answer, created_at)
//! ```
//! Lists are ordered newest first; rows sharing a `created_at` fall back to
//! descending `id`.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::models::*;
use crate::provider::{DataBackend, ProviderError, SelectQuery};
use crate::session::Session;

pub const TOPICS_TABLE: &str = "topics";
pub const CARDS_TABLE: &str = "cards";

#[derive(Error, Debug)]
pub enum FlashcardError {
    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Unexpected row format: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlashcardError>;

/// Typed access to the `topics` and `cards` tables
pub struct FlashcardStore {
    backend: Arc<dyn DataBackend>,
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(FlashcardError::from))
        .collect()
}

impl FlashcardStore {
    pub fn new(backend: Arc<dyn DataBackend>) -> Self {
        Self { backend }
    }

    // ==================== Topic Operations ====================

    /// List the signed-in user's topics, newest first
    pub async fn list_topics(&self, session: &Session) -> Result<Vec<Topic>> {
        let query = SelectQuery::from(TOPICS_TABLE)
            .eq("user_id", session.user_id())
            .order_desc("created_at")
            .order_desc("id");

        let rows = self.backend.select(&query, &session.access_token).await?;
        decode_rows(rows)
    }

    /// Get a single topic
    pub async fn get_topic(&self, session: &Session, topic_id: &TopicId) -> Result<Topic> {
        let query = SelectQuery::from(TOPICS_TABLE).eq("id", topic_id).single();

        let rows = self.backend.select(&query, &session.access_token).await?;
        let mut topics: Vec<Topic> = decode_rows(rows)?;
        match topics.len() {
            1 => Ok(topics.remove(0)),
            n => Err(ProviderError::Api {
                status: 406,
                message: format!(
                    "JSON object requested, multiple (or no) rows returned ({} rows)",
                    n
                ),
            }
            .into()),
        }
    }

    /// Create a topic owned by the signed-in user
    pub async fn create_topic(&self, session: &Session, name: &str) -> Result<()> {
        let topic = NewTopic::new(name, session.user_id())?;
        let row = serde_json::to_value(&topic)?;

        self.backend
            .insert(TOPICS_TABLE, vec![row], &session.access_token)
            .await?;
        log::info!("Created topic \"{}\"", topic.name);
        Ok(())
    }

    // ==================== Card Operations ====================

    /// List the cards of a topic, newest first
    pub async fn list_cards(&self, session: &Session, topic_id: &TopicId) -> Result<Vec<Card>> {
        let query = SelectQuery::from(CARDS_TABLE)
            .eq("topic_id", topic_id)
            .order_desc("created_at")
            .order_desc("id");

        let rows = self.backend.select(&query, &session.access_token).await?;
        decode_rows(rows)
    }

    /// Add a card to a topic
    pub async fn create_card(
        &self,
        session: &Session,
        topic_id: &TopicId,
        question: &str,
        answer: &str,
    ) -> Result<()> {
        let card = NewCard::new(topic_id.clone(), question, answer)?;
        let row = serde_json::to_value(&card)?;

        self.backend
            .insert(CARDS_TABLE, vec![row], &session.access_token)
            .await?;
        log::info!("Created card in topic {}", topic_id);
        Ok(())
    }
}
