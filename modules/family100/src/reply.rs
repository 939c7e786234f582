//! Texts the bot sends back to a chat.

use crate::{
    error::{GameError, Usage},
    minigame::{Duel, Hand, GUESS_BONUS, SUIT_BONUS},
    session::SessionScores,
    store::ScoreRecord,
};
use std::fmt::Write;

pub const BUSY: &str =
    "🚫 Game Family 100 sedang berlangsung di chat ini! Jawab dulu pertanyaan yang aktif.";
pub const STOPPED: &str = "🛑 Game Family 100 dihentikan.";
pub const NOT_ACTIVE: &str = "⚠️ Tidak ada game yang sedang berlangsung di chat ini.";
pub const ALMOST: &str = "🤏 Hampir benar, coba lagi!";
pub const WRONG: &str = "❌ Salah, coba lagi!";
pub const TIME_UP: &str = "⏰ Waktu habis! Game selesai.";
pub const STORE_FAILED: &str = "⚠️ Skor gagal disimpan, coba lagi nanti.";

pub const HELP: &str = "🕹️ Bot Family 100\n\n\
    Ketik command:\n\
    • family 100 - Mulai main Family 100\n\
    • stop - Hentikan game yang sedang berjalan\n\
    • score - Cek skor\n\
    • tambah <angka> - Tambah poin\n\
    • leaderboard - Lihat papan skor\n\
    • tebak <1-10> - Tebak angka, menang +3 poin\n\
    • suit <batu|gunting|kertas> - Suit lawan bot, menang +5 poin\n";

pub fn question(prompt: &str, found: usize, total: usize) -> String {
    format!(
        "❓ Family 100:\n{prompt}\n\nJawaban yang sudah ditemukan: {found}/{total}\nKetik jawaban kamu!"
    )
}

pub fn next_question(prompt: &str, total: usize) -> String {
    format!("🎮 Soal berikutnya:\n{prompt}\n\nJawaban yang sudah ditemukan: 0/{total}")
}

pub fn duplicate(raw: &str) -> String {
    format!("⚠️ Jawaban \"{raw}\" sudah dijawab sebelumnya.")
}

pub fn correct(name: &str, points: u32, found: usize, total: usize) -> String {
    format!("✅ Benar dari {name}! +{points} poin.\nJawaban ditemukan: {found}/{total}")
}

pub fn final_scores(scores: &SessionScores) -> String {
    let mut text = String::from("🏆 Skor akhir:\n");
    if scores.is_empty() {
        text += "Tidak ada yang mendapat poin.";
    }
    for line in scores.iter() {
        let _ = writeln!(text, "- {}: {}", line.player.name, line.points);
    }
    text
}

pub fn completed(scores: &SessionScores) -> String {
    format!("🎉 Semua soal selesai!\n{}", final_scores(scores))
}

pub fn score(total: i64) -> String {
    format!("🎯 Skor kamu: {total}")
}

pub fn added(total: i64) -> String {
    format!("✅ Skor kamu sekarang: {total}")
}

pub fn leaderboard(records: &[ScoreRecord]) -> String {
    let mut text = String::from("🏆 Leaderboard:");
    if records.is_empty() {
        text += "\nBelum ada skor.";
    }
    for (i, record) in records.iter().enumerate() {
        let _ = write!(text, "\n{}. {}: {}", i + 1, record.display_name(), record.score);
    }
    text
}

pub fn guess(picked: u8, rolled: u8, total: Option<i64>) -> String {
    match total {
        Some(total) => format!(
            "🎲 Angka saya {rolled}. Tebakan kamu benar! +{GUESS_BONUS} poin.\nSkor kamu sekarang: {total}"
        ),
        None => format!("🎲 Angka saya {rolled}, bukan {picked}. Coba lagi!"),
    }
}

pub fn suit(player: Hand, bot: Hand, duel: Duel, total: Option<i64>) -> String {
    let head = format!("✊ Kamu: {player}, bot: {bot}.");
    match (duel, total) {
        (Duel::Win, Some(total)) => {
            format!("{head} Kamu menang! +{SUIT_BONUS} poin.\nSkor kamu sekarang: {total}")
        }
        (Duel::Win, None) => format!("{head} Kamu menang!"),
        (Duel::Draw, _) => format!("{head} Seri!"),
        (Duel::Lose, _) => format!("{head} Kamu kalah!"),
    }
}

pub fn game_error(err: GameError) -> &'static str {
    match err {
        GameError::AlreadyActive => BUSY,
        GameError::NotActive => NOT_ACTIVE,
        GameError::InvalidFormat(Usage::AddPoints) => "❌ Format salah. Contoh: tambah 5",
        GameError::InvalidFormat(Usage::Guess) => "❌ Format salah. Contoh: tebak 7 (angka 1-10)",
        GameError::InvalidFormat(Usage::Suit) => {
            "❌ Format salah. Contoh: suit batu (batu/gunting/kertas)"
        }
    }
}
