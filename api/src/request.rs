use crate::basic_types::{MessageId, MessageThreadId};
use compact_str::CompactString;
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::proto::{ChatId, ParseMode, UpdateType};

/// Use this method to send text messages. On success, the sent Message is returned.
/// https://core.telegram.org/bots/api#sendmessage
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct SendMessageRequest {
    pub chat_id: ChatId,
    pub message_thread_id: Option<MessageThreadId>,
    pub text: CompactString,
    pub parse_mode: Option<ParseMode>,
    pub disable_web_page_preview: Option<bool>,
    pub disable_notification: Option<bool>,
    pub protect_content: Option<bool>,
    pub reply_to_message_id: Option<MessageId>,
    pub allow_sending_without_reply: Option<bool>,
}

#[skip_serializing_none]
#[derive(Debug, Default, Serialize)]
pub struct GetUpdatesRequest {
    pub offset: Option<i64>,
    pub limit: Option<u32>,
    pub timeout: Option<u32>,
    pub allowed_updates: Option<Vec<UpdateType>>,
}

#[skip_serializing_none]
#[derive(Debug, Default, Serialize)]
pub struct DeleteWebhookRequest {
    pub drop_pending_updates: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn send_message_skips_empty_fields() {
        let request = SendMessageRequest {
            chat_id: ChatId::from(-100),
            message_thread_id: None,
            text: "halo".into(),
            parse_mode: None,
            disable_web_page_preview: None,
            disable_notification: None,
            protect_content: None,
            reply_to_message_id: Some(7),
            allow_sending_without_reply: Some(true),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "chat_id": -100,
                "text": "halo",
                "reply_to_message_id": 7,
                "allow_sending_without_reply": true,
            })
        );
    }

    #[test]
    fn get_updates_lists_allowed_types() {
        let request = GetUpdatesRequest {
            offset: Some(42),
            allowed_updates: Some(vec![UpdateType::Message]),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "offset": 42, "allowed_updates": ["message"] })
        );
    }
}
