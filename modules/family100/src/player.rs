use api::{
    basic_types::UserId,
    proto::{Message, User},
};
use compact_str::{CompactString, ToCompactString};

/// Someone who answers questions or collects points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: UserId,
    pub name: CompactString,
}

impl Player {
    pub fn new(id: UserId, name: impl Into<CompactString>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Key of the player in the score file
    pub fn key(&self) -> CompactString {
        self.id.to_compact_string()
    }

    /// The sender of a message, or the chat itself when the sender is unknown
    /// (channel posts, anonymous admins).
    pub fn from_message(message: &Message) -> Self {
        if let Some(user) = message.from.as_ref() {
            return user.into();
        }
        let chat = &message.chat;
        let name = chat
            .title
            .clone()
            .or_else(|| chat.username.clone())
            .or_else(|| chat.first_name.clone())
            .unwrap_or_else(|| chat.id.to_compact_string());
        Self::new(chat.id, name)
    }
}

impl From<&User> for Player {
    fn from(user: &User) -> Self {
        let name = user.username.clone().unwrap_or_else(|| user.full_name());
        Self::new(user.id, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::proto::Chat;

    #[test]
    fn prefers_username() {
        let user = User {
            id: 42,
            first_name: "Budi".into(),
            last_name: Some("Santoso".into()),
            username: Some("budi_s".into()),
            ..Default::default()
        };
        assert_eq!(Player::from(&user), Player::new(42, "budi_s"));

        let user = User {
            username: None,
            ..user
        };
        assert_eq!(Player::from(&user).name, "Budi Santoso");
    }

    #[test]
    fn falls_back_to_chat() {
        let message = Message {
            chat: Chat {
                id: -100,
                title: Some("Keluarga".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let player = Player::from_message(&message);
        assert_eq!(player, Player::new(-100, "Keluarga"));
        assert_eq!(player.key(), "-100");
    }
}
