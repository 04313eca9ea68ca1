//! Flipdeck: flashcard study client for a hosted auth + table backend
//!
//! Users register, sign in, group flashcards into topics and flip through
//! them. All persistence lives behind the provider's HTTP APIs.

pub mod app;
pub mod config;
pub mod flashcards;
pub mod provider;
pub mod router;
pub mod screens;
pub mod session;

#[cfg(test)]
mod testing;

pub use app::{App, Screen, Services};
