use derive_more::Display;

/// Failures caused by what a user typed, answered with a short reply
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[display(fmt = "a game is already running in this chat")]
    AlreadyActive,
    #[display(fmt = "no game is running in this chat")]
    NotActive,
    #[display(fmt = "invalid argument for '{}'", _0)]
    InvalidFormat(Usage),
}

impl std::error::Error for GameError {}

/// Command whose argument failed to parse
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    #[display(fmt = "tambah")]
    AddPoints,
    #[display(fmt = "tebak")]
    Guess,
    #[display(fmt = "suit")]
    Suit,
}
