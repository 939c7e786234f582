use crate::error::{GameError, Usage};
use derive_more::Display;
use rand::Rng;
use std::{ops::RangeInclusive, str::FromStr};

pub const GUESS_RANGE: RangeInclusive<u8> = 1..=10;
pub const GUESS_BONUS: i64 = 3;
pub const SUIT_BONUS: i64 = 5;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    #[display(fmt = "batu")]
    Rock,
    #[display(fmt = "gunting")]
    Scissors,
    #[display(fmt = "kertas")]
    Paper,
}

impl Hand {
    pub const ALL: [Hand; 3] = [Hand::Rock, Hand::Scissors, Hand::Paper];

    pub fn beats(self, other: Hand) -> bool {
        matches!(
            (self, other),
            (Hand::Rock, Hand::Scissors) | (Hand::Scissors, Hand::Paper) | (Hand::Paper, Hand::Rock)
        )
    }
}

impl FromStr for Hand {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "batu" => Ok(Hand::Rock),
            "gunting" => Ok(Hand::Scissors),
            "kertas" => Ok(Hand::Paper),
            _ => Err(GameError::InvalidFormat(Usage::Suit)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duel {
    Win,
    Draw,
    Lose,
}

/// Outcome from the player's side
pub fn duel(player: Hand, bot: Hand) -> Duel {
    if player == bot {
        Duel::Draw
    } else if player.beats(bot) {
        Duel::Win
    } else {
        Duel::Lose
    }
}

pub fn roll_number(rng: &mut impl Rng) -> u8 {
    rng.gen_range(GUESS_RANGE)
}

pub fn pick_hand(rng: &mut impl Rng) -> Hand {
    Hand::ALL[rng.gen_range(0..Hand::ALL.len())]
}
