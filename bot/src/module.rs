use crate::{bot::command::BotCommandInfo, communicator::Communicate};
use api::proto::Message;
use async_trait::async_trait;
use std::sync::Arc;

/// A feature plugged into the bot. Every text message is offered to every module,
/// a module ignores what it does not recognise.
#[async_trait]
pub trait Module: Send {
    async fn try_execute_command(
        &mut self,
        comm: &Arc<dyn Communicate>,
        cmd: &BotCommandInfo,
        message: &Message,
    ) -> eyre::Result<()>;
}
