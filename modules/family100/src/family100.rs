use crate::{
    command::Command,
    config::Family100Config,
    minigame::{self, Duel, GUESS_BONUS, SUIT_BONUS},
    player::Player,
    question::QuestionBank,
    registry::SessionRegistry,
    reply,
    session::AnswerOutcome,
    store::ScoreStore,
};
use api::{basic_types::ChatIntId, proto::Message};
use async_trait::async_trait;
use bot::{bot::command::BotCommandInfo, communicator::Communicate, module::Module};
use eyre::WrapErr;
use log::{debug, error, info};
use rand::{rngs::StdRng, SeedableRng};
use std::{str::FromStr, sync::Arc};

/// Family 100 quiz with the score commands and mini-games around it
pub struct Family100 {
    registry: SessionRegistry,
    store: ScoreStore,
    config: Family100Config,
    rng: StdRng,
}

impl Family100 {
    pub fn new(config: Family100Config) -> eyre::Result<Self> {
        let bank = QuestionBank::from_file(&config.questions_file)?;
        info!(
            "loaded {} questions from {:?}",
            bank.len(),
            config.questions_file
        );
        Self::with_bank(config, bank, StdRng::from_entropy())
    }

    pub fn with_bank(
        config: Family100Config,
        bank: QuestionBank,
        rng: StdRng,
    ) -> eyre::Result<Self> {
        config.verify().wrap_err("invalid family 100 config")?;
        Ok(Self {
            registry: SessionRegistry::new(Arc::new(bank), config.game_duration),
            store: ScoreStore::new(config.score_file.clone()),
            config,
            rng,
        })
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// `family 100` and `stop` first, then answers of a running game, then the rest
    async fn route(&mut self, chat: &Chat<'_>, player: &Player, text: &str) -> eyre::Result<()> {
        let command = Command::from_str(text);
        match command {
            Ok(Command::StartGame) => {
                return match self.registry.start(chat.id, chat.comm).await {
                    Ok(first) => {
                        chat.say(&reply::question(&first.prompt, first.found, first.total))
                            .await
                    }
                    Err(err) => chat.reply(reply::game_error(err)).await,
                };
            }
            Ok(Command::Stop) => {
                return match self.registry.stop(chat.id).await {
                    Ok(()) => chat.say(reply::STOPPED).await,
                    Err(err) => chat.reply(reply::game_error(err)).await,
                };
            }
            _ => {}
        }

        if let Some(outcome) = self.registry.submit_answer(chat.id, player, text).await {
            return announce(chat, player, text, outcome).await;
        }

        debug!("chat {}: idle command {command:?}", chat.id);
        match command {
            Ok(command) => self.execute(chat, player, command).await,
            Err(err) => chat.reply(reply::game_error(err)).await,
        }
    }

    async fn execute(
        &mut self,
        chat: &Chat<'_>,
        player: &Player,
        command: Command,
    ) -> eyre::Result<()> {
        let stored = match command {
            Command::StartGame | Command::Stop => return Ok(()),
            Command::Help => return chat.reply(reply::HELP).await,
            Command::Score => self.store.score(&player.key()).await.map(reply::score),
            Command::AddPoints(delta) => self.store.add(player, delta).await.map(reply::added),
            Command::Leaderboard => self
                .store
                .top(self.config.leaderboard_size)
                .await
                .map(|records| reply::leaderboard(&records)),
            Command::Guess(picked) => {
                let rolled = minigame::roll_number(&mut self.rng);
                if picked == rolled {
                    self.store
                        .add(player, GUESS_BONUS)
                        .await
                        .map(|total| reply::guess(picked, rolled, Some(total)))
                } else {
                    Ok(reply::guess(picked, rolled, None))
                }
            }
            Command::Suit(hand) => {
                let bot_hand = minigame::pick_hand(&mut self.rng);
                match minigame::duel(hand, bot_hand) {
                    Duel::Win => self
                        .store
                        .add(player, SUIT_BONUS)
                        .await
                        .map(|total| reply::suit(hand, bot_hand, Duel::Win, Some(total))),
                    duel => Ok(reply::suit(hand, bot_hand, duel, None)),
                }
            }
        };

        match stored {
            Ok(text) => chat.reply(&text).await,
            Err(err) => {
                error!(
                    "score store {:?} failed for {}: {err:?}",
                    self.store.path(),
                    player.key()
                );
                chat.reply(reply::STORE_FAILED).await
            }
        }
    }
}

async fn announce(
    chat: &Chat<'_>,
    player: &Player,
    text: &str,
    outcome: AnswerOutcome,
) -> eyre::Result<()> {
    match outcome {
        AnswerOutcome::Duplicate => chat.reply(&reply::duplicate(text)).await,
        AnswerOutcome::AlmostCorrect => chat.reply(reply::ALMOST).await,
        AnswerOutcome::Incorrect => chat.reply(reply::WRONG).await,
        AnswerOutcome::Correct {
            points,
            found,
            total,
        } => {
            chat.reply(&reply::correct(&player.name, points, found, total))
                .await
        }
        AnswerOutcome::QuestionAdvanced {
            points,
            total,
            next_prompt,
            next_total,
        } => {
            chat.reply(&reply::correct(&player.name, points, total, total))
                .await?;
            chat.say(&reply::next_question(&next_prompt, next_total))
                .await
        }
        AnswerOutcome::GameCompleted {
            points,
            total,
            scores,
        } => {
            chat.reply(&reply::correct(&player.name, points, total, total))
                .await?;
            chat.say(&reply::completed(&scores)).await
        }
    }
}

/// Where the answers to one incoming message go
struct Chat<'a> {
    id: ChatIntId,
    message: &'a Message,
    comm: &'a Arc<dyn Communicate>,
}

impl Chat<'_> {
    async fn say(&self, text: &str) -> eyre::Result<()> {
        self.comm
            .send_message(text, self.id.into())
            .await?
            .into_result()?;
        Ok(())
    }

    async fn reply(&self, text: &str) -> eyre::Result<()> {
        self.comm
            .reply_message(text, self.id.into(), self.message.message_id, None)
            .await?
            .into_result()?;
        Ok(())
    }
}

#[async_trait]
impl Module for Family100 {
    async fn try_execute_command(
        &mut self,
        comm: &Arc<dyn Communicate>,
        cmd: &BotCommandInfo,
        message: &Message,
    ) -> eyre::Result<()> {
        let chat = Chat {
            id: message.chat.id,
            message,
            comm,
        };
        let player = Player::from_message(message);
        self.route(&chat, &player, cmd.text()).await
    }
}
