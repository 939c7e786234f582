use compact_str::{CompactString, ToCompactString};
use eyre::{ensure, WrapErr};
use serde::Deserialize;
use std::path::Path;

/// Lowercased, trimmed form used for every answer comparison
pub fn normalize(text: &str) -> CompactString {
    text.trim().to_lowercase().to_compact_string()
}

/// One Family 100 question with every answer that counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionItem {
    prompt: CompactString,
    answers: Vec<CompactString>,
    points_per_answer: u32,
}

impl QuestionItem {
    pub fn new<S: AsRef<str>>(
        prompt: &str,
        answers: impl IntoIterator<Item = S>,
        points_per_answer: u32,
    ) -> eyre::Result<Self> {
        let prompt = prompt.trim();
        ensure!(!prompt.is_empty(), "question prompt cannot be empty");
        ensure!(
            points_per_answer >= 1,
            "'{prompt}': points per answer must be at least 1"
        );
        let mut unique: Vec<CompactString> = vec![];
        for answer in answers {
            let answer = normalize(answer.as_ref());
            ensure!(!answer.is_empty(), "'{prompt}': blank answer");
            if !unique.contains(&answer) {
                unique.push(answer);
            }
        }
        ensure!(!unique.is_empty(), "'{prompt}': no answers");
        Ok(Self {
            prompt: prompt.into(),
            answers: unique,
            points_per_answer,
        })
    }

    pub fn prompt(&self) -> &CompactString {
        &self.prompt
    }

    /// Normalized answers, in file order
    pub fn answers(&self) -> &[CompactString] {
        &self.answers
    }

    pub fn points_per_answer(&self) -> u32 {
        self.points_per_answer
    }

    pub fn total(&self) -> usize {
        self.answers.len()
    }
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    answers: Vec<String>,
    #[serde(rename = "pointsPerAnswer", default = "default_points")]
    points_per_answer: u32,
}

fn default_points() -> u32 {
    1
}

/// Ordered, read-only list of questions, played front to back
#[derive(Debug)]
pub struct QuestionBank {
    items: Vec<QuestionItem>,
}

impl QuestionBank {
    pub fn new(items: Vec<QuestionItem>) -> eyre::Result<Self> {
        ensure!(!items.is_empty(), "question bank is empty");
        Ok(Self { items })
    }

    pub fn from_json(text: &str) -> eyre::Result<Self> {
        let raw = serde_json::from_str::<Vec<RawQuestion>>(text)?;
        let items = raw
            .into_iter()
            .map(|q| QuestionItem::new(&q.question, q.answers, q.points_per_answer))
            .collect::<eyre::Result<Vec<_>>>()?;
        Self::new(items)
    }

    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read questions from {path:?}"))?;
        Self::from_json(&contents).wrap_err_with(|| format!("invalid question file {path:?}"))
    }

    pub fn get(&self, index: usize) -> Option<&QuestionItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_json() {
        let bank = QuestionBank::from_json(
            r#"[
                {"question": "Warna pelangi", "answers": ["Merah", " kuning ", "HIJAU"], "pointsPerAnswer": 2},
                {"question": "Hewan berkaki empat", "answers": ["kucing", "Kucing", "anjing"]}
            ]"#,
        )
        .unwrap();
        assert_eq!(bank.len(), 2);

        let first = bank.get(0).unwrap();
        assert_eq!(first.prompt(), "Warna pelangi");
        assert_eq!(first.answers(), ["merah", "kuning", "hijau"]);
        assert_eq!(first.points_per_answer(), 2);

        let second = bank.get(1).unwrap();
        assert_eq!(second.total(), 2);
        assert_eq!(second.points_per_answer(), 1);
        assert!(bank.get(2).is_none());
    }

    #[test]
    fn rejects_broken_questions() {
        assert!(QuestionBank::from_json("[]").is_err());
        assert!(QuestionBank::from_json(r#"[{"question": "Kosong", "answers": []}]"#).is_err());
        assert!(QuestionBank::from_json(r#"[{"question": "Spasi", "answers": ["  "]}]"#).is_err());
        assert!(QuestionBank::from_json(
            r#"[{"question": "Nol", "answers": ["a"], "pointsPerAnswer": 0}]"#
        )
        .is_err());
        assert!(QuestionItem::new("  ", ["a"], 1).is_err());
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Merah Putih \n"), "merah putih");
    }

    #[test]
    fn bundled_question_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../family100-questions.json");
        let bank = QuestionBank::from_file(path).unwrap();
        assert_eq!(bank.get(0).unwrap().total(), 7);
        assert!(QuestionBank::from_file("no-such-file.json").is_err());
    }
}
