use crate::{
    bot::{command::BotCommandInfo, config::BotConfig},
    communicator::{Communicate, Communicator},
    connector::{
        polling::{PollingConnector, PollingConnectorConfig},
        Connector,
    },
    module::Module,
    skip, ward,
};
use api::{
    basic_types::UpdateId,
    proto::{Message, Update},
};
use compact_str::CompactString;
use futures_util::future::join_all;
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::sync::mpsc::Receiver;

pub mod command;
pub mod config;

pub struct Bot {
    last_update_id: UpdateId,
    connector: Box<dyn Connector>,
    communicator: Arc<dyn Communicate>,
    modules: Vec<(CompactString, Box<dyn Module>)>,
    state_rx: Receiver<State>,
    skip_missed_updates: bool,
}

#[derive(Debug)]
pub enum State {
    Shutdown,
}

impl Bot {
    pub fn new(token: &str, state_rx: Receiver<State>) -> Self {
        Self::with_config(token, state_rx, Default::default())
    }

    pub fn with_config(token: &str, state_rx: Receiver<State>, config: BotConfig) -> Self {
        let connector_config = PollingConnectorConfig {
            allowed_updates: config.allowed_updates.into_iter().collect(),
            limit: config.update_limit,
            timeout: config.polling_timeout,
            drop_pending_updates: config.skip_missed_updates,
        };
        Self {
            connector: Box::new(PollingConnector::with_config(token, connector_config)),
            communicator: Arc::new(Communicator::new(token)),
            last_update_id: 0,
            modules: Default::default(),
            state_rx,
            skip_missed_updates: config.skip_missed_updates,
        }
    }

    /// Each module has to have a unique name
    pub fn add_module(&mut self, name: &str, module: impl Module + 'static) {
        if self.modules.iter().any(|(n, _)| n == name) {
            error!("failed to insert '{name}' as the module with that name is present already");
        } else {
            self.modules.push((name.into(), Box::new(module)));
        }
    }

    async fn handle_message_update(&mut self, message: Message) {
        if message.is_from_bot() {
            debug!("ignoring message from a bot in chat {}", message.chat.id);
            return;
        }
        let cmd = ward!(BotCommandInfo::try_from(&message).ok(), {
            debug!("ignoring non-text message in chat {}", message.chat.id);
            return;
        });

        let (comm, cmd, msg) = (&self.communicator, &cmd, &message);
        let results = join_all(self.modules.iter_mut().map(|(name, module)| async move {
            (name.as_str(), module.try_execute_command(comm, cmd, msg).await)
        }))
        .await;

        for (name, result) in results {
            if let Err(report) = result {
                error!("module '{name}' failed, message = {message:?}: {report:?}");
            }
        }
    }

    fn check_is_old_update(&mut self, id: UpdateId) -> bool {
        if self.last_update_id >= id {
            true
        } else if self.last_update_id != 0 && self.last_update_id < id - 1 {
            warn!(
                "some updates skipped! last update id = {}, new update id = {}",
                self.last_update_id, id
            );
            self.last_update_id = id;
            false
        } else {
            self.last_update_id = id;
            false
        }
    }

    pub async fn start(mut self) -> eyre::Result<()> {
        self.connector.on_startup().await?;
        info!("bot started with {} module(s)", self.modules.len());

        loop {
            let updates = tokio::select! {
                state = self.state_rx.recv() => {
                    match state {
                        Some(State::Shutdown) => info!("shutdown signal received"),
                        None => warn!("bot signal channel closed, shutting down"),
                    }
                    return Ok(());
                }
                updates = self.connector.fetch_updates() => skip!(updates),
            };

            if self.last_update_id == 0 && self.skip_missed_updates {
                if let Some(id) = updates.iter().map(|u| u.id).max() {
                    self.last_update_id = id;
                }
                continue;
            }

            for update in updates {
                if self.check_is_old_update(update.id) {
                    continue;
                }
                match update.data {
                    Update::MessageUpdate(message) => {
                        self.handle_message_update(message).await;
                    }
                    other => {
                        debug!("update {} not handled: {other:?}", update.id);
                    }
                };
            }
        }
    }
}
