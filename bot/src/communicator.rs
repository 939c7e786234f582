use crate::connector::send_request;
use api::{
    basic_types::MessageId,
    endpoints::SendMessage,
    proto::{ChatId, Message, ParseMode},
    request::SendMessageRequest,
    response::CommonResponse,
};
use async_trait::async_trait;
use compact_str::{CompactString, ToCompactString};
use reqwest::Client;
use std::sync::Arc;

/// Outbound side of the transport.
#[async_trait]
pub trait Communicate: Send + Sync {
    async fn send_message(
        &self,
        text: &str,
        chat_id: ChatId,
    ) -> eyre::Result<CommonResponse<Message>>;

    async fn reply_message(
        &self,
        text: &str,
        chat_id: ChatId,
        reply_to_message_id: MessageId,
        parse_mode: Option<ParseMode>,
    ) -> eyre::Result<CommonResponse<Message>>;
}

#[derive(Clone)]
pub struct Communicator {
    token: Arc<CompactString>,
    client: Client,
}

impl Communicator {
    pub fn new(token: &str) -> Self {
        Self {
            token: Arc::new(token.into()),
            client: Client::new(),
        }
    }

    fn request(
        text: &str,
        chat_id: ChatId,
        reply_to_message_id: Option<MessageId>,
        parse_mode: Option<ParseMode>,
    ) -> SendMessageRequest {
        SendMessageRequest {
            chat_id,
            message_thread_id: None,
            text: text.to_compact_string(),
            parse_mode,
            disable_web_page_preview: None,
            disable_notification: None,
            protect_content: None,
            reply_to_message_id,
            allow_sending_without_reply: reply_to_message_id.map(|_| true),
        }
    }
}

#[async_trait]
impl Communicate for Communicator {
    async fn send_message(
        &self,
        text: &str,
        chat_id: ChatId,
    ) -> eyre::Result<CommonResponse<Message>> {
        let request = Self::request(text, chat_id, None, None);
        send_request::<SendMessage>(&self.client, self.token.as_str(), &request).await
    }

    async fn reply_message(
        &self,
        text: &str,
        chat_id: ChatId,
        reply_to_message_id: MessageId,
        parse_mode: Option<ParseMode>,
    ) -> eyre::Result<CommonResponse<Message>> {
        let request = Self::request(text, chat_id, Some(reply_to_message_id), parse_mode);
        send_request::<SendMessage>(&self.client, self.token.as_str(), &request).await
    }
}
