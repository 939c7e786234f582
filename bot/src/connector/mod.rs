pub mod polling;

use api::{endpoints::Endpoint, proto::CommonUpdate, response::CommonResponse};
use async_trait::async_trait;
use eyre::eyre;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

const BASE_URL: &str = "https://api.telegram.org";

/// Source of updates for the bot loop.
#[async_trait]
pub trait Connector: Send {
    async fn on_startup(&mut self) -> eyre::Result<()>;

    async fn fetch_updates(&mut self) -> eyre::Result<Vec<CommonUpdate>>;
}

fn query_url<E: Endpoint>(token: &str) -> String {
    format!("{}/bot{}/{}", BASE_URL, token, E::PATH)
}

pub(crate) async fn send_request<E>(
    client: &Client,
    token: &str,
    data: &E::Request,
) -> eyre::Result<CommonResponse<E::Response>>
where
    E: Endpoint,
    E::Request: Serialize,
    E::Response: DeserializeOwned,
{
    let url = query_url::<E>(token);
    let request = client.request(E::METHOD, url).json(data).build()?;
    let text = client.execute(request).await?.text().await?;
    let response =
        serde_json::from_str::<CommonResponse<E::Response>>(&text).map_err(|err| {
            eyre!(
                "{}, type = {:?}, response = {}",
                err,
                std::any::type_name::<CommonResponse<E::Response>>(),
                text
            )
        })?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::endpoints::{GetUpdates, SendMessage};

    #[test]
    fn endpoint_url() {
        assert_eq!(
            query_url::<SendMessage>("123:abc"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
        assert_eq!(
            query_url::<GetUpdates>("t"),
            "https://api.telegram.org/bott/getUpdates"
        );
    }
}
