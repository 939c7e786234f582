use crate::{
    error::{GameError, Usage},
    minigame::{Hand, GUESS_RANGE},
    question::normalize,
};
use std::str::FromStr;

/// Everything a user can ask for outside of answering a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartGame,
    Stop,
    Score,
    Leaderboard,
    AddPoints(i64),
    Guess(u8),
    Suit(Hand),
    Help,
}

impl FromStr for Command {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = normalize(s);
        let (word, arg) = match text.split_once(' ') {
            Some((word, arg)) => (word, Some(arg)),
            None => (text.as_str(), None),
        };

        match (word, arg) {
            ("family", Some("100")) => Ok(Command::StartGame),
            ("stop", None) => Ok(Command::Stop),
            ("score", None) => Ok(Command::Score),
            ("leaderboard", None) => Ok(Command::Leaderboard),
            ("tambah", Some(arg)) => arg
                .trim()
                .parse::<i64>()
                .map(Command::AddPoints)
                .map_err(|_| GameError::InvalidFormat(Usage::AddPoints)),
            ("tebak", Some(arg)) => match arg.trim().parse::<u8>() {
                Ok(n) if GUESS_RANGE.contains(&n) => Ok(Command::Guess(n)),
                _ => Err(GameError::InvalidFormat(Usage::Guess)),
            },
            ("suit", Some(arg)) => arg.trim().parse::<Hand>().map(Command::Suit),
            _ => Ok(Command::Help),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Command, GameError> {
        s.parse::<Command>()
    }

    #[test]
    fn vocabulary() {
        assert_eq!(parse("family 100"), Ok(Command::StartGame));
        assert_eq!(parse("  FAMILY 100 "), Ok(Command::StartGame));
        assert_eq!(parse("Stop"), Ok(Command::Stop));
        assert_eq!(parse("score"), Ok(Command::Score));
        assert_eq!(parse("leaderboard"), Ok(Command::Leaderboard));
        assert_eq!(parse("tambah 5"), Ok(Command::AddPoints(5)));
        assert_eq!(parse("tambah -3"), Ok(Command::AddPoints(-3)));
        assert_eq!(parse("tebak 10"), Ok(Command::Guess(10)));
        assert_eq!(parse("suit Kertas"), Ok(Command::Suit(Hand::Paper)));
    }

    #[test]
    fn bad_arguments() {
        let add = Err(GameError::InvalidFormat(Usage::AddPoints));
        assert_eq!(parse("tambah abc"), add);
        assert_eq!(parse("tambah -"), add);
        assert_eq!(parse("tambah 5abc"), add);
        assert_eq!(parse("tambah  7"), Ok(Command::AddPoints(7)));

        let guess = Err(GameError::InvalidFormat(Usage::Guess));
        assert_eq!(parse("tebak 0"), guess);
        assert_eq!(parse("tebak 11"), guess);
        assert_eq!(parse("tebak tujuh"), guess);

        assert_eq!(
            parse("suit pedang"),
            Err(GameError::InvalidFormat(Usage::Suit))
        );
    }

    #[test]
    fn everything_else_is_help() {
        assert_eq!(parse("halo"), Ok(Command::Help));
        assert_eq!(parse("family"), Ok(Command::Help));
        assert_eq!(parse("family  100"), Ok(Command::Help));
        assert_eq!(parse("family\t100"), Ok(Command::Help));
        assert_eq!(parse("tambah"), Ok(Command::Help));
        assert_eq!(parse("suit"), Ok(Command::Help));
        assert_eq!(parse("stop sekarang"), Ok(Command::Help));
        assert_eq!(parse("score 5"), Ok(Command::Help));
        assert_eq!(parse(""), Ok(Command::Help));
    }
}
