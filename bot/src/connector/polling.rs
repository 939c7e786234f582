use crate::connector::{send_request, Connector};
use api::{
    basic_types::UpdateId,
    endpoints::{DeleteWebhook, GetUpdates},
    proto::{CommonUpdate, UpdateType},
    request::{DeleteWebhookRequest, GetUpdatesRequest},
    response::CommonResponse,
};
use async_trait::async_trait;
use compact_str::{CompactString, ToCompactString};
use log::{error, info};
use reqwest::Client;

pub struct PollingConnector {
    token: CompactString,
    client: Client,
    last_update_id: Option<UpdateId>,
    config: PollingConnectorConfig,
}

#[derive(Debug, Default)]
pub struct PollingConnectorConfig {
    pub allowed_updates: Vec<UpdateType>,
    pub limit: Option<u32>,
    /// Long polling timeout in seconds, 0 means short polling
    pub timeout: Option<u32>,
    pub drop_pending_updates: bool,
}

impl PollingConnector {
    pub fn with_config(token: &str, config: PollingConnectorConfig) -> Self {
        Self {
            token: token.to_compact_string(),
            client: Client::new(),
            last_update_id: None,
            config,
        }
    }

    fn next_request(&self) -> GetUpdatesRequest {
        GetUpdatesRequest {
            offset: self.last_update_id.map(|id| id + 1),
            limit: self.config.limit,
            timeout: self.config.timeout,
            allowed_updates: Some(self.config.allowed_updates.clone()),
        }
    }
}

#[async_trait]
impl Connector for PollingConnector {
    async fn on_startup(&mut self) -> eyre::Result<()> {
        let request = DeleteWebhookRequest {
            drop_pending_updates: Some(self.config.drop_pending_updates),
        };
        match send_request::<DeleteWebhook>(&self.client, self.token.as_str(), &request).await? {
            CommonResponse::Ok(_) => {
                info!("webhook deleted, polling for updates");
            }
            CommonResponse::Err(err) => {
                error!("{err}");
            }
        };
        Ok(())
    }

    async fn fetch_updates(&mut self) -> eyre::Result<Vec<CommonUpdate>> {
        let request = self.next_request();

        let updates = send_request::<GetUpdates>(&self.client, self.token.as_str(), &request)
            .await?
            .into_result()?;

        if let Some(last_update_id) = updates.iter().map(|u| u.id).max() {
            self.last_update_id.replace(last_update_id);
        };

        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_follows_last_seen_update() {
        let mut connector = PollingConnector::with_config(
            "token",
            PollingConnectorConfig {
                allowed_updates: vec![UpdateType::Message],
                timeout: Some(30),
                ..Default::default()
            },
        );
        let request = connector.next_request();
        assert_eq!(request.offset, None);
        assert_eq!(request.timeout, Some(30));

        connector.last_update_id = Some(41);
        assert_eq!(connector.next_request().offset, Some(42));
    }
}
