use crate::player::Player;
use compact_str::CompactString;
use eyre::WrapErr;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::sync::Mutex;

/// Total points of one player across all games
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub key: CompactString,
    pub name: Option<CompactString>,
    pub score: i64,
}

impl ScoreRecord {
    /// Stored name, or the part of the key before `@` for ids such as `628123@s.whatsapp.net`
    pub fn display_name(&self) -> &str {
        match self.name.as_ref() {
            Some(name) => name.as_str(),
            None => self.key.split('@').next().unwrap_or(self.key.as_str()),
        }
    }
}

/// Either shape found in score files: a bare number or `{"score": n}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredScore {
    Legacy(i64),
    Current {
        score: i64,
        #[serde(default)]
        name: Option<CompactString>,
    },
}

#[derive(Serialize)]
struct StoredRecord<'a> {
    score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

/// Persistent per-user points, kept in a single JSON document.
///
/// Every operation reads the whole file and, when it changes something, rewrites it.
/// Operations are serialized, so concurrent additions never overwrite each other.
#[derive(Debug)]
pub struct ScoreStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn score(&self, key: &str) -> eyre::Result<i64> {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;
        Ok(records
            .iter()
            .find(|r| r.key == key)
            .map_or(0, |r| r.score))
    }

    /// Adds `delta` (which may be negative) and returns the new total
    pub async fn add(&self, player: &Player, delta: i64) -> eyre::Result<i64> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let key = player.key();
        let total = match records.iter_mut().find(|r| r.key == key) {
            Some(record) => {
                record.score = record.score.saturating_add(delta);
                record.name = Some(player.name.clone());
                record.score
            }
            None => {
                records.push(ScoreRecord {
                    key,
                    name: Some(player.name.clone()),
                    score: delta,
                });
                delta
            }
        };
        self.save(&records).await?;
        Ok(total)
    }

    /// Best `n` players, highest first; equal scores keep file order
    pub async fn top(&self, n: usize) -> eyre::Result<Vec<ScoreRecord>> {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;
        Ok(records
            .into_iter()
            .sorted_by(|a, b| b.score.cmp(&a.score))
            .take(n)
            .collect())
    }

    async fn load(&self) -> eyre::Result<Vec<ScoreRecord>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => {
                return Err(err).wrap_err_with(|| format!("failed to read {:?}", self.path))
            }
        };
        if text.trim().is_empty() {
            return Ok(vec![]);
        }
        let map = serde_json::from_str::<Map<String, Value>>(&text)
            .wrap_err_with(|| format!("score file {:?} is not a JSON object", self.path))?;
        map.into_iter()
            .map(|(key, value)| {
                let stored = serde_json::from_value::<StoredScore>(value)
                    .wrap_err_with(|| format!("invalid score entry for '{key}'"))?;
                let (score, name) = match stored {
                    StoredScore::Legacy(score) => (score, None),
                    StoredScore::Current { score, name } => (score, name),
                };
                Ok(ScoreRecord {
                    key: key.into(),
                    name,
                    score,
                })
            })
            .collect()
    }

    /// Writes next to the target first, so a failed write leaves the old file untouched
    async fn save(&self, records: &[ScoreRecord]) -> eyre::Result<()> {
        let mut map = Map::new();
        for record in records {
            let stored = StoredRecord {
                score: record.score,
                name: record.name.as_deref(),
            };
            map.insert(record.key.to_string(), serde_json::to_value(stored)?);
        }
        let text = serde_json::to_string_pretty(&Value::Object(map))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, text)
            .await
            .wrap_err_with(|| format!("failed to write {tmp:?}"))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .wrap_err_with(|| format!("failed to replace {:?}", self.path))?;
        Ok(())
    }
}
