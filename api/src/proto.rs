use compact_str::CompactString;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use serde_json::Map;
use serde_with::skip_serializing_none;

use crate::basic_types::{ChatIntId, MessageId, UpdateId, UserId};

/// Unix time
pub type Date = u64;

#[derive(Debug, Copy, Clone, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    InlineQuery,
    CallbackQuery,
    MyChatMember,
    ChatMember,
}

#[derive(Debug)]
pub struct CommonUpdate {
    pub id: UpdateId,
    pub data: Update,
}

#[derive(Debug)]
pub enum Update {
    MessageUpdate(Message),
    EditedMessageUpdate(Message),
    ChannelPostUpdate(Message),
    EditedChannelPostUpdate(Message),
    /// Update kinds the bot does not model, kept by name for logging
    Unsupported(CompactString),
}

impl<'de> Deserialize<'de> for CommonUpdate {
    fn deserialize<D>(deserializer: D) -> Result<CommonUpdate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::deserialize(deserializer)?;

        let id = map
            .remove("update_id")
            .ok_or_else(|| de::Error::missing_field("update_id"))
            .map(Deserialize::deserialize)?
            .map_err(de::Error::custom)?;

        let (key, value) = map
            .into_iter()
            .next()
            .ok_or_else(|| de::Error::custom("update with no data"))?;

        let update = match key.as_str() {
            "message" => serde_json::from_value::<Message>(value).map(Update::MessageUpdate),
            "edited_message" => {
                serde_json::from_value::<Message>(value).map(Update::EditedMessageUpdate)
            }
            "channel_post" => {
                serde_json::from_value::<Message>(value).map(Update::ChannelPostUpdate)
            }
            "edited_channel_post" => {
                serde_json::from_value::<Message>(value).map(Update::EditedChannelPostUpdate)
            }
            other => Ok(Update::Unsupported(other.into())),
        }
        .map_err(de::Error::custom)?;
        Ok(CommonUpdate { id, data: update })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ChatId {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    Int(ChatIntId),
    Str(CompactString),
}

impl From<ChatIntId> for ChatId {
    fn from(id: ChatIntId) -> Self {
        Self::Int(id)
    }
}

impl From<CompactString> for ChatId {
    fn from(id: CompactString) -> Self {
        Self::Str(id)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
    Markdown,
    MarkdownV2,
}

/// This object represents a Telegram user or bot.
/// https://core.telegram.org/bots/api#user
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: CompactString,
    pub last_name: Option<CompactString>,
    pub username: Option<CompactString>,
    pub language_code: Option<CompactString>,
}

impl User {
    pub fn full_name(&self) -> CompactString {
        let mut name = self.first_name.clone();
        if let Some(s) = &self.last_name {
            name += " ";
            name += s.as_str();
        }
        name
    }
}

#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatType {
    Sender,
    #[default]
    Private,
    Group,
    Supergroup,
    Channel,
}

/// https://core.telegram.org/bots/api#chat
#[derive(Debug, Default, Deserialize)]
pub struct Chat {
    pub id: ChatIntId,
    #[serde(default, rename = "type")]
    pub chat_type: ChatType,
    pub title: Option<CompactString>,
    pub username: Option<CompactString>,
    pub first_name: Option<CompactString>,
    pub last_name: Option<CompactString>,
    pub is_forum: Option<bool>,
}

/// This object represents one special entity in a text message. For example, hashtags, usernames, URLs, etc.
/// https://core.telegram.org/bots/api#messageentity
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub entity_type: MessageEntityType,
    pub offset: i64,
    pub length: usize,
    pub url: Option<CompactString>,
    pub user: Option<User>,
    pub language: Option<CompactString>,
    pub custom_emoji_id: Option<CompactString>,
}

/// https://core.telegram.org/bots/api#messageentity
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageEntityType {
    Mention,
    Hashtag,
    Cashtag,
    BotCommand,
    Url,
    Email,
    PhoneNumber,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre,
    TextLink,
    TextMention,
    CustomEmoji,
    Blockquote,
    ExpandableBlockquote,
}

/// This object represents a message. Only the fields the bot reads are kept,
/// everything else in the payload is ignored.
/// https://core.telegram.org/bots/api#message
#[derive(Debug, Default, Deserialize)]
pub struct Message {
    pub message_id: MessageId,
    pub message_thread_id: Option<i64>,
    pub from: Option<User>,
    pub sender_chat: Option<Chat>,
    pub date: Date,
    pub chat: Chat,
    pub reply_to_message: Option<Box<Message>>,
    pub via_bot: Option<User>,
    pub edit_date: Option<i64>,
    pub text: Option<CompactString>,
    pub entities: Option<Vec<MessageEntity>>,
    pub caption: Option<CompactString>,
}

impl Message {
    pub fn is_of_entity(&self, entity: MessageEntityType) -> Option<MessageEntity> {
        self.entities
            .as_ref()?
            .iter()
            .find(|msg_entity| msg_entity.entity_type == entity)
            .cloned()
    }

    pub fn is_from_bot(&self) -> bool {
        self.from.as_ref().is_some_and(|user| user.is_bot)
    }
}

#[cfg(test)]
mod tests {
    use crate::proto::{CommonUpdate, MessageEntityType, Update};
    use assert2::{check, let_assert};

    #[test]
    fn deserialize_common_update() {
        let data = serde_json::json!({
            "message": {
                "chat": {
                    "first_name": "Test",
                    "id": 1111111,
                    "last_name": "Test Lastname",
                    "username": "Test"
                },
                "date": 1441645532,
                "from": {
                    "first_name": "Test",
                    "id": 1111111,
                    "last_name": "Test Lastname",
                    "username": "Test"
                },
                "message_id": 1365,
                "text": "/score",
                "entities": [{ "type": "bot_command", "offset": 0, "length": 6 }]
            },
            "update_id": 10000
        });
        let update = serde_json::from_value::<CommonUpdate>(data).unwrap();
        check!(update.id == 10000);
        let_assert!(Update::MessageUpdate(message) = update.data);
        check!(message.chat.id == 1111111);
        check!(!message.is_from_bot());
        let_assert!(Some(entity) = message.is_of_entity(MessageEntityType::BotCommand));
        check!(entity.length == 6);
    }

    #[test]
    fn unknown_update_kind_is_kept_by_name() {
        let data = serde_json::json!({
            "update_id": 7,
            "poll_answer": { "poll_id": "1", "option_ids": [0] }
        });
        let update = serde_json::from_value::<CommonUpdate>(data).unwrap();
        let_assert!(Update::Unsupported(kind) = update.data);
        check!(kind == "poll_answer");
    }

    #[test]
    fn quote_entity_is_not_a_command() {
        let data = serde_json::json!({
            "update_id": 8,
            "message": {
                "message_id": 1,
                "date": 0,
                "chat": { "id": -5, "type": "supergroup" },
                "text": "halo",
                "entities": [{ "type": "blockquote", "offset": 0, "length": 4 }]
            }
        });
        let update = serde_json::from_value::<CommonUpdate>(data).unwrap();
        let_assert!(Update::MessageUpdate(message) = update.data);
        check!(message.is_of_entity(MessageEntityType::BotCommand).is_none());
    }
}
