pub mod command;
pub mod config;
pub mod error;
pub mod family100;
pub mod minigame;
pub mod player;
pub mod question;
pub mod registry;
pub mod reply;
pub mod session;
pub mod store;

pub use crate::{config::Family100Config, family100::Family100};
