use crate::{
    error::GameError,
    player::Player,
    question::QuestionBank,
    reply,
    session::{AnswerOutcome, GameSession, SessionId, SessionScores},
};
use api::basic_types::ChatIntId;
use bot::communicator::Communicate;
use chrono::Utc;
use compact_str::CompactString;
use log::{debug, error, info};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::{sync::Mutex, task::JoinHandle};

struct ActiveSession {
    session: GameSession,
    expiry: JoinHandle<()>,
}

#[derive(Default)]
struct Sessions {
    last_id: SessionId,
    active: HashMap<ChatIntId, ActiveSession>,
}

/// Question shown to a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub prompt: CompactString,
    pub found: usize,
    pub total: usize,
}

/// Read-only view of a running game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub question_index: usize,
    pub question: Option<QuestionView>,
    pub scores: SessionScores,
}

/// Running games, at most one per chat.
///
/// Each game owns a timer task that ends it after the configured duration. The
/// timer and the map entry are inserted and removed under the same lock.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<Sessions>>,
    bank: Arc<QuestionBank>,
    duration: Duration,
}

impl SessionRegistry {
    pub fn new(bank: Arc<QuestionBank>, duration: Duration) -> Self {
        Self {
            sessions: Default::default(),
            bank,
            duration,
        }
    }

    /// Starts a game and arms its expiry timer, returns the first question
    pub async fn start(
        &self,
        chat_id: ChatIntId,
        comm: &Arc<dyn Communicate>,
    ) -> Result<QuestionView, GameError> {
        let mut sessions = self.sessions.lock().await;
        if sessions.active.contains_key(&chat_id) {
            return Err(GameError::AlreadyActive);
        }
        sessions.last_id += 1;
        let id = sessions.last_id;

        let session = GameSession::new(id, self.bank.clone());
        let first = view(&session).ok_or(GameError::NotActive)?;
        let expiry = tokio::spawn(expire_after(
            self.sessions.clone(),
            comm.clone(),
            chat_id,
            id,
            self.duration,
        ));
        sessions
            .active
            .insert(chat_id, ActiveSession { session, expiry });
        info!("game {id} started in chat {chat_id}");
        Ok(first)
    }

    pub async fn stop(&self, chat_id: ChatIntId) -> Result<(), GameError> {
        let active = self
            .sessions
            .lock()
            .await
            .active
            .remove(&chat_id)
            .ok_or(GameError::NotActive)?;
        active.expiry.abort();
        info!("game {} stopped in chat {chat_id}", active.session.id());
        Ok(())
    }

    pub async fn is_active(&self, chat_id: ChatIntId) -> bool {
        self.sessions.lock().await.active.contains_key(&chat_id)
    }

    pub async fn snapshot(&self, chat_id: ChatIntId) -> Option<SessionSnapshot> {
        let sessions = self.sessions.lock().await;
        let session = &sessions.active.get(&chat_id)?.session;
        Some(SessionSnapshot {
            id: session.id(),
            question_index: session.question_index(),
            question: view(session),
            scores: session.scores().clone(),
        })
    }

    /// Evaluates an answer for the chat's game, `None` when no game is running.
    /// A completed game is removed together with its timer.
    pub async fn submit_answer(
        &self,
        chat_id: ChatIntId,
        player: &Player,
        text: &str,
    ) -> Option<AnswerOutcome> {
        let mut sessions = self.sessions.lock().await;
        let active = sessions.active.get_mut(&chat_id)?;
        let outcome = active.session.submit_answer(player, text);
        debug!("chat {chat_id}: '{text}' from {} -> {outcome:?}", player.id);

        if matches!(outcome, AnswerOutcome::GameCompleted { .. }) {
            if let Some(done) = sessions.active.remove(&chat_id) {
                done.expiry.abort();
                info!("game {} completed in chat {chat_id}", done.session.id());
            }
        }
        Some(outcome)
    }
}

fn view(session: &GameSession) -> Option<QuestionView> {
    session.current_question().map(|q| QuestionView {
        prompt: q.prompt().clone(),
        found: session.found_count(),
        total: q.total(),
    })
}

async fn expire_after(
    sessions: Arc<Mutex<Sessions>>,
    comm: Arc<dyn Communicate>,
    chat_id: ChatIntId,
    id: SessionId,
    duration: Duration,
) {
    tokio::time::sleep(duration).await;

    let expired = {
        let mut sessions = sessions.lock().await;
        match sessions.active.get(&chat_id) {
            Some(active) if active.session.id() == id => sessions.active.remove(&chat_id),
            _ => None,
        }
    };
    let Some(expired) = expired else {
        debug!("timer of game {id} in chat {chat_id} fired after the game ended");
        return;
    };

    let lasted = Utc::now() - expired.session.started_at();
    info!(
        "game {id} expired in chat {chat_id} after {}s",
        lasted.num_seconds()
    );
    for text in [
        reply::TIME_UP.to_string(),
        reply::final_scores(expired.session.scores()),
    ] {
        if let Err(err) = announce(comm.as_ref(), chat_id, &text).await {
            error!("failed to announce the end of game {id} in chat {chat_id}: {err:?}");
        }
    }
}

async fn announce(comm: &dyn Communicate, chat_id: ChatIntId, text: &str) -> eyre::Result<()> {
    comm.send_message(text, chat_id.into()).await?.into_result()?;
    Ok(())
}
