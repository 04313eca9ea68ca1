use super::{FlashcardView, Notice, Outcome};
use crate::app::Services;
use crate::flashcards::{Topic, TopicId};
use crate::router::Route;

/// One topic's cards with a create form
#[derive(Debug)]
pub struct TopicScreen {
    topic_id: TopicId,
    topic: Option<Topic>,
    cards: Vec<FlashcardView>,
    pub question: String,
    pub answer: String,
}

impl TopicScreen {
    pub fn new(topic_id: TopicId) -> Self {
        Self {
            topic_id,
            topic: None,
            cards: Vec::new(),
            question: String::new(),
            answer: String::new(),
        }
    }

    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    /// The topic row, once loaded
    pub fn topic(&self) -> Option<&Topic> {
        self.topic.as_ref()
    }

    pub fn cards(&self) -> &[FlashcardView] {
        &self.cards
    }

    pub fn flip(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(index) {
            card.flip();
        }
    }

    /// Read the topic heading and its cards
    pub async fn load(&mut self, services: &Services) -> Outcome {
        let session = match services.session.active_session().await {
            Ok(session) => session,
            Err(e) => return Outcome::notice(Notice::error(e)),
        };

        let mut outcome = Outcome::none();
        match services.flashcards.get_topic(&session, &self.topic_id).await {
            Ok(topic) => self.topic = Some(topic),
            Err(e) => outcome.push(Notice::error(e)),
        }
        if let Some(notice) = self.fetch_cards(services).await {
            outcome.push(notice);
        }
        outcome
    }

    async fn fetch_cards(&mut self, services: &Services) -> Option<Notice> {
        let session = match services.session.active_session().await {
            Ok(session) => session,
            Err(e) => return Some(Notice::error(e)),
        };
        match services.flashcards.list_cards(&session, &self.topic_id).await {
            Ok(cards) => {
                self.cards = cards.into_iter().map(FlashcardView::new).collect();
                None
            }
            Err(e) => Some(Notice::error(e)),
        }
    }

    /// Create a card from `question`/`answer`, then refetch the cards
    pub async fn add_card(&mut self, services: &Services) -> Outcome {
        let session = match services.session.active_session().await {
            Ok(session) => session,
            Err(e) => return Outcome::notice(Notice::error(e)),
        };

        match services
            .flashcards
            .create_card(&session, &self.topic_id, &self.question, &self.answer)
            .await
        {
            Ok(()) => {
                self.question.clear();
                self.answer.clear();
                match self.fetch_cards(services).await {
                    Some(notice) => Outcome::notice(notice),
                    None => Outcome::none(),
                }
            }
            Err(e) => Outcome::notice(Notice::error(e)),
        }
    }

    pub fn back(&self) -> Outcome {
        Outcome::navigate(Route::Dashboard)
    }
}
