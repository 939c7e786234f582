use crate::{
    player::Player,
    question::{normalize, QuestionBank, QuestionItem},
};
use api::basic_types::UserId;
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use std::{collections::HashSet, sync::Arc};

pub type SessionId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLine {
    pub player: Player,
    pub points: u32,
}

/// Points earned in one game, in the order players first scored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionScores(Vec<ScoreLine>);

impl SessionScores {
    fn add(&mut self, player: &Player, points: u32) {
        match self.0.iter_mut().find(|line| line.player.id == player.id) {
            Some(line) => {
                line.points += points;
                line.player.name = player.name.clone();
            }
            None => self.0.push(ScoreLine {
                player: player.clone(),
                points,
            }),
        }
    }

    pub fn get(&self, id: UserId) -> Option<u32> {
        self.0
            .iter()
            .find(|line| line.player.id == id)
            .map(|line| line.points)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreLine> {
        self.0.iter()
    }
}

/// Result of one answer attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The answer was found earlier for this question
    Duplicate,
    Correct {
        points: u32,
        found: usize,
        total: usize,
    },
    /// The last missing answer, the game moved on to the next question
    QuestionAdvanced {
        points: u32,
        total: usize,
        next_prompt: CompactString,
        next_total: usize,
    },
    /// The last missing answer of the last question
    GameCompleted {
        points: u32,
        total: usize,
        scores: SessionScores,
    },
    AlmostCorrect,
    Incorrect,
}

/// One running Family 100 game in a chat
#[derive(Debug)]
pub struct GameSession {
    id: SessionId,
    started_at: DateTime<Utc>,
    question_index: usize,
    scores: SessionScores,
    found: HashSet<CompactString>,
    bank: Arc<QuestionBank>,
}

impl GameSession {
    pub fn new(id: SessionId, bank: Arc<QuestionBank>) -> Self {
        Self {
            id,
            started_at: Utc::now(),
            question_index: 0,
            scores: Default::default(),
            found: Default::default(),
            bank,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn current_question(&self) -> Option<&QuestionItem> {
        self.bank.get(self.question_index)
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    pub fn scores(&self) -> &SessionScores {
        &self.scores
    }

    pub fn is_completed(&self) -> bool {
        self.question_index >= self.bank.len()
    }

    pub fn submit_answer(&mut self, player: &Player, raw: &str) -> AnswerOutcome {
        let bank = Arc::clone(&self.bank);
        // completed sessions are dropped by the registry, nothing to answer
        let Some(question) = bank.get(self.question_index) else {
            return AnswerOutcome::Incorrect;
        };
        let answer = normalize(raw);

        if self.found.contains(&answer) {
            return AnswerOutcome::Duplicate;
        }

        if question.answers().contains(&answer) {
            let points = question.points_per_answer();
            let total = question.total();
            self.scores.add(player, points);
            self.found.insert(answer);
            if self.found.len() < total {
                return AnswerOutcome::Correct {
                    points,
                    found: self.found.len(),
                    total,
                };
            }

            self.found.clear();
            self.question_index += 1;
            return match bank.get(self.question_index) {
                Some(next) => AnswerOutcome::QuestionAdvanced {
                    points,
                    total,
                    next_prompt: next.prompt().clone(),
                    next_total: next.total(),
                },
                None => AnswerOutcome::GameCompleted {
                    points,
                    total,
                    scores: self.scores.clone(),
                },
            };
        }

        // an empty guess is a substring of everything
        if answer.is_empty() {
            return AnswerOutcome::Incorrect;
        }
        let almost = question
            .answers()
            .iter()
            .any(|a| a.contains(answer.as_str()) || answer.contains(a.as_str()));
        if almost {
            AnswerOutcome::AlmostCorrect
        } else {
            AnswerOutcome::Incorrect
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    fn bank() -> Arc<QuestionBank> {
        Arc::new(
            QuestionBank::new(vec![
                QuestionItem::new("Warna pelangi", ["merah", "kuning", "hijau"], 2).unwrap(),
                QuestionItem::new("Buah berwarna kuning", ["pisang", "nanas"], 1).unwrap(),
            ])
            .unwrap(),
        )
    }

    fn session() -> GameSession {
        GameSession::new(1, bank())
    }

    #[test]
    fn rainbow_scenario() {
        let mut game = session();
        let a = Player::new(1, "a");
        let b = Player::new(2, "b");

        check!(
            game.submit_answer(&a, "Merah")
                == AnswerOutcome::Correct {
                    points: 2,
                    found: 1,
                    total: 3
                }
        );
        check!(game.submit_answer(&b, "merah") == AnswerOutcome::Duplicate);
        check!(game.scores().get(2).is_none());
        check!(
            game.submit_answer(&a, "kuning")
                == AnswerOutcome::Correct {
                    points: 2,
                    found: 2,
                    total: 3
                }
        );
        check!(
            game.submit_answer(&a, " HIJAU ")
                == AnswerOutcome::QuestionAdvanced {
                    points: 2,
                    total: 3,
                    next_prompt: "Buah berwarna kuning".into(),
                    next_total: 2,
                }
        );
        check!(game.question_index() == 1);
        check!(game.found_count() == 0);
        check!(game.scores().get(1) == Some(6));
    }

    #[test]
    fn answers_of_a_finished_question_are_not_duplicates() {
        let mut game = session();
        let a = Player::new(1, "a");
        for answer in ["merah", "kuning", "hijau"] {
            game.submit_answer(&a, answer);
        }
        check!(game.submit_answer(&a, "merah") == AnswerOutcome::Incorrect);
    }

    #[test]
    fn almost_correct_and_incorrect() {
        let mut game = session();
        let a = Player::new(1, "a");
        check!(game.submit_answer(&a, "mer") == AnswerOutcome::AlmostCorrect);
        check!(game.submit_answer(&a, "merah delima") == AnswerOutcome::AlmostCorrect);
        check!(game.submit_answer(&a, "biru") == AnswerOutcome::Incorrect);
        check!(game.submit_answer(&a, "   ") == AnswerOutcome::Incorrect);
        check!(game.found_count() == 0);
        check!(game.scores().is_empty());
    }

    #[test]
    fn last_answer_completes_the_game() {
        let mut game = session();
        let a = Player::new(1, "a");
        let b = Player::new(2, "b");
        game.submit_answer(&b, "hijau");
        game.submit_answer(&a, "merah");
        game.submit_answer(&a, "kuning");
        game.submit_answer(&a, "pisang");

        let_assert!(
            AnswerOutcome::GameCompleted {
                points,
                total,
                scores
            } = game.submit_answer(&b, "nanas")
        );
        check!(points == 1);
        check!(total == 2);
        let lines: Vec<_> = scores.iter().map(|l| (l.player.id, l.points)).collect();
        check!(lines == vec![(2, 3), (1, 5)]);
        check!(game.is_completed());
        check!(game.current_question().is_none());
    }
}
