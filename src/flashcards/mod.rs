//! Topics and flashcards for Flipdeck
//!
//! This module provides:
//! - Topic and card models as stored by the data provider
//! - Client-side validation of new topics and cards
//! - `FlashcardStore`: owner-scoped list/insert operations

pub mod models;
pub mod store;

pub use models::*;
pub use store::{FlashcardError, FlashcardStore, CARDS_TABLE, TOPICS_TABLE};
