use crate::flashcards::Card;

/// Which side of a card is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Question,
    Answer,
}

/// A card with its local flip state. Flipping never touches the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct FlashcardView {
    pub card: Card,
    flipped: bool,
}

impl FlashcardView {
    pub fn new(card: Card) -> Self {
        Self {
            card,
            flipped: false,
        }
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn face(&self) -> Face {
        if self.flipped {
            Face::Answer
        } else {
            Face::Question
        }
    }

    /// Text of the visible face
    pub fn text(&self) -> &str {
        match self.face() {
            Face::Question => &self.card.question,
            Face::Answer => &self.card.answer,
        }
    }
}
