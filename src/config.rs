use compact_str::CompactString;
use eyre::{ensure, WrapErr};
use serde::Deserialize;
use std::path::Path;

/// Contents of `config.xml` in the work dir
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GlobalConfig {
    pub data_file_name: CompactString,
    pub questions_file_name: CompactString,
    pub game_duration_secs: u64,
    pub leaderboard_size: usize,
    pub skip_missed_updates: bool,
    pub polling_timeout: Option<u32>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            data_file_name: "database.json".into(),
            questions_file_name: "family100-questions.json".into(),
            game_duration_secs: 180,
            leaderboard_size: 5,
            skip_missed_updates: false,
            polling_timeout: None,
        }
    }
}

impl GlobalConfig {
    fn validate(&self) -> eyre::Result<()> {
        ensure!(
            !self.data_file_name.is_empty(),
            "data file name cannot be empty"
        );
        ensure!(
            !self.questions_file_name.is_empty(),
            "questions file name cannot be empty"
        );
        ensure!(self.game_duration_secs > 0, "game duration must be positive");
        ensure!(
            matches!(self.leaderboard_size, 1..=50),
            "leaderboard size is strictly 1-50"
        );
        Ok(())
    }

    pub fn parse(contents: &str) -> eyre::Result<Self> {
        let config = serde_xml_rs::from_str::<Self>(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {path:?}"))?;
        Self::parse(contents.as_str()).wrap_err_with(|| format!("bad config {path:?}"))
    }
}
