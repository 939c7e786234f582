use api::proto::{Message, MessageEntity, MessageEntityType};
use compact_str::{CompactString, ToCompactString};
use eyre::bail;

/// Text of an incoming message split into a command word and its query.
///
/// `/tambah@family_bot 5` and `tambah 5` both give name `tambah`, query `5`
/// and text `tambah 5`.
#[derive(Debug)]
pub struct BotCommandInfo {
    name: CompactString,
    query: CompactString,
    text: CompactString,
}

impl TryFrom<&Message> for BotCommandInfo {
    type Error = eyre::Report;

    fn try_from(message: &Message) -> Result<Self, Self::Error> {
        let Some(text) = message.text.as_ref() else {
            bail!("no text for bot command in {message:?}");
        };
        match message.is_of_entity(MessageEntityType::BotCommand) {
            Some(entity) if entity.offset == 0 && text.is_char_boundary(entity.length) => {
                Ok(Self::from_command(text, entity))
            }
            _ => Ok(Self::from_text(text)),
        }
    }
}

impl BotCommandInfo {
    pub fn name(&self) -> &CompactString {
        &self.name
    }

    pub fn query(&self) -> &CompactString {
        &self.query
    }

    /// Whole command text without the leading slash and bot mention
    pub fn text(&self) -> &CompactString {
        &self.text
    }

    fn from_command(text: &str, bot_command_entity: MessageEntity) -> Self {
        let (cmd, query) = text.split_at(bot_command_entity.length);
        let cmd = cmd
            .strip_prefix('/')
            .and_then(|c| c.split('@').next())
            .unwrap_or(cmd);
        Self::new(cmd, query)
    }

    fn from_text(text: &str) -> Self {
        let text = text.trim();
        let (cmd, query) = text.split_once(' ').unwrap_or((text, ""));
        Self::new(cmd, query)
    }

    fn new(cmd: &str, query: &str) -> Self {
        let query = query.trim();
        let text = if query.is_empty() {
            cmd.to_compact_string()
        } else {
            format!("{cmd} {query}").to_compact_string()
        };
        Self {
            name: cmd.to_lowercase().to_compact_string(),
            query: query.into(),
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::proto::Chat;

    fn message(text: &str, command_len: Option<usize>) -> Message {
        Message {
            text: Some(text.into()),
            entities: command_len.map(|length| {
                vec![MessageEntity {
                    entity_type: MessageEntityType::BotCommand,
                    offset: 0,
                    length,
                    url: None,
                    user: None,
                    language: None,
                    custom_emoji_id: None,
                }]
            }),
            chat: Chat {
                id: 1,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn plain_text() {
        let cmd = BotCommandInfo::try_from(&message("  Family 100 ", None)).unwrap();
        assert_eq!(cmd.name(), "family");
        assert_eq!(cmd.query(), "100");
        assert_eq!(cmd.text(), "Family 100");
    }

    #[test]
    fn slash_command_with_mention() {
        let cmd = BotCommandInfo::try_from(&message("/tambah@family_bot 5", Some(18))).unwrap();
        assert_eq!(cmd.name(), "tambah");
        assert_eq!(cmd.query(), "5");
        assert_eq!(cmd.text(), "tambah 5");
    }

    #[test]
    fn single_word() {
        let cmd = BotCommandInfo::try_from(&message("/score", Some(6))).unwrap();
        assert_eq!(cmd.name(), "score");
        assert!(cmd.query().is_empty());
        assert_eq!(cmd.text(), "score");
    }

    #[test]
    fn message_without_text() {
        let mut msg = message("", None);
        msg.text = None;
        assert!(BotCommandInfo::try_from(&msg).is_err());
    }
}
