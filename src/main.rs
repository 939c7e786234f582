mod config;

use crate::config::GlobalConfig;
use bot::{
    bot::{config::BotConfig, Bot, State},
    health,
};
use eyre::WrapErr;
use family100::{Family100, Family100Config};
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;
use std::{path::Path, time::Duration};
use tokio::{signal, sync::mpsc};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let token = dotenv::var("TOKEN").wrap_err("no TOKEN in env")?;

    SimpleLogger::new()
        .with_level(LevelFilter::Off)
        .with_module_level("family100_bot", LevelFilter::Debug)
        .with_module_level("bot", LevelFilter::Debug)
        .with_module_level("api", LevelFilter::Debug)
        .with_module_level("family100", LevelFilter::Debug)
        .init()?;

    let work_dir = dotenv::var("WORK_DIR").unwrap_or_else(|_| ".".into());
    let work_dir = Path::new(work_dir.as_str());
    let config = GlobalConfig::from_file(work_dir.join("config.xml"))?;
    info!("config loaded from {work_dir:?}: {config:?}");

    let family100 = Family100::new(Family100Config {
        questions_file: work_dir.join(config.questions_file_name.as_str()),
        score_file: work_dir.join(config.data_file_name.as_str()),
        game_duration: Duration::from_secs(config.game_duration_secs),
        leaderboard_size: config.leaderboard_size,
    })?;

    let (tx, rx) = mpsc::channel::<State>(1);

    let bot_config = BotConfig {
        skip_missed_updates: config.skip_missed_updates,
        polling_timeout: config.polling_timeout.or(BotConfig::default().polling_timeout),
        ..Default::default()
    };
    let mut bot = Bot::with_config(token.as_str(), rx, bot_config);
    bot.add_module("family100", family100);

    let port = health::port_from_env();
    tokio::spawn(async move {
        if let Err(err) = health::serve(port).await {
            error!("liveness endpoint on port {port} failed: {err:?}");
        }
    });

    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                if tx.send(State::Shutdown).await.is_err() {
                    error!("bot stopped before the shutdown signal");
                }
            }
            Err(err) => error!("unable to listen for shutdown signal: {err}"),
        };
    });

    bot.start().await
}
