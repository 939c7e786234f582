pub mod bot;
pub mod communicator;
pub mod connector;
pub mod health;
pub mod macros;
pub mod module;
