pub mod cards;
pub mod login;
pub mod logout;
pub mod new_card;
pub mod new_topic;
pub mod register;
pub mod topics;
pub mod whoami;
