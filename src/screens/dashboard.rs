use super::{Notice, Outcome};
use crate::app::Services;
use crate::flashcards::Topic;
use crate::router::Route;

/// The signed-in user's topic list with a create form
#[derive(Debug, Default)]
pub struct DashboardScreen {
    topics: Vec<Topic>,
    pub new_topic: String,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Read the topic list. Failures are logged and the old list kept.
    pub async fn load(&mut self, services: &Services) -> Outcome {
        let session = match services.session.active_session().await {
            Ok(session) => session,
            Err(e) => {
                log::error!("Dashboard load without a session: {}", e);
                return Outcome::none();
            }
        };

        match services.flashcards.list_topics(&session).await {
            Ok(topics) => self.topics = topics,
            Err(e) => log::error!("Failed to load topics: {}", e),
        }
        Outcome::none()
    }

    /// Create a topic from `new_topic`, then refetch
    pub async fn add_topic(&mut self, services: &Services) -> Outcome {
        let session = match services.session.active_session().await {
            Ok(session) => session,
            Err(e) => return Outcome::notice(Notice::error(e)),
        };

        match services
            .flashcards
            .create_topic(&session, &self.new_topic)
            .await
        {
            Ok(()) => {
                self.new_topic.clear();
                self.load(services).await
            }
            Err(e) => Outcome::notice(Notice::error(e)),
        }
    }

    pub fn open(&self, index: usize) -> Outcome {
        match self.topics.get(index) {
            Some(topic) => Outcome::navigate(Route::Topic(topic.id.clone())),
            None => Outcome::none(),
        }
    }

    pub async fn sign_out(&mut self, services: &Services) -> Outcome {
        match services.session.sign_out().await {
            Ok(()) => Outcome::navigate(Route::Login),
            Err(e) => Outcome::notice(Notice::error(e)),
        }
    }
}
