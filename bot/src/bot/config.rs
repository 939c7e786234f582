use api::proto::UpdateType;
use std::collections::HashSet;

#[derive(Debug)]
pub struct BotConfig {
    pub allowed_updates: HashSet<UpdateType>,
    pub update_limit: Option<u32>,
    pub polling_timeout: Option<u32>,
    pub skip_missed_updates: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            allowed_updates: [UpdateType::Message].into(),
            update_limit: None,
            polling_timeout: Some(30),
            skip_missed_updates: false,
        }
    }
}
