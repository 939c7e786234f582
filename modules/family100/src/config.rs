use eyre::ensure;
use std::{path::PathBuf, time::Duration};

#[derive(Debug, Clone)]
pub struct Family100Config {
    pub questions_file: PathBuf,
    pub score_file: PathBuf,
    pub game_duration: Duration,
    pub leaderboard_size: usize,
}

impl Family100Config {
    pub fn verify(&self) -> eyre::Result<()> {
        ensure!(
            !self.game_duration.is_zero(),
            "game duration must be positive"
        );
        ensure!(
            matches!(self.leaderboard_size, 1..=50),
            "leaderboard can only show 1-50 entries"
        );
        Ok(())
    }
}

impl Default for Family100Config {
    fn default() -> Self {
        Self {
            questions_file: "family100-questions.json".into(),
            score_file: "database.json".into(),
            game_duration: Duration::from_secs(3 * 60),
            leaderboard_size: 5,
        }
    }
}
