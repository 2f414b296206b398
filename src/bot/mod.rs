//! Telegram front end: command parsing, authorization, rendering, and the
//! supervised long-poll loop.

pub mod auth;
pub mod command;
pub mod handler;
pub mod keyboard;
pub mod render;
pub mod supervisor;

use std::sync::Arc;
use std::time::Duration;

use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::RelayStats;
use crate::relay::{EndpointRegistry, FailoverFetcher, HttpGateway, StatusProber};

use self::handler::BotContext;
use self::supervisor::BackoffPolicy;

/// Wire up dependencies and run the bot until shutdown or supervisor
/// exhaustion.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let registry = EndpointRegistry::from_config(&config.api)?;
    let gateway = Arc::new(HttpGateway::new()?);

    let fetcher = FailoverFetcher::new(
        gateway.clone(),
        registry.clone(),
        Duration::from_secs(config.api.send_timeout_secs),
    );
    let prober = StatusProber::new(
        gateway,
        registry.clone(),
        Duration::from_secs(config.api.probe_timeout_secs),
    );
    let stats = Arc::new(RelayStats::new());

    let bot = Bot::new(&config.telegram.bot_token);

    let me = bot.get_me().await?;
    info!(
        username = me.username(),
        bot_id = me.user.id.0,
        admin_id = config.telegram.admin_id,
        "Bot identity confirmed"
    );

    if let Err(err) = register_bot_commands(&bot).await {
        warn!(error = %err, "Failed to register bot commands with Telegram");
    }

    let ctx = Arc::new(BotContext {
        fetcher,
        prober,
        stats,
        registry,
        admin_id: config.telegram.admin_id,
        me,
    });

    supervisor::supervise(BackoffPolicy::default(), || {
        run_dispatcher(bot.clone(), ctx.clone())
    })
    .await
}

/// One long-poll run; the supervisor restarts it on failure.
async fn run_dispatcher(bot: Bot, ctx: Arc<BotContext>) -> anyhow::Result<()> {
    info!("Starting long-poll dispatcher");

    Dispatcher::builder(bot, handler::update_handler())
        .dependencies(dptree::deps![ctx])
        .default_handler(|update| async move {
            tracing::trace!(update_id = update.id.0, "Unhandled update kind");
        })
        .error_handler(LoggingErrorHandler::with_custom_text("Update handler error"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    // dispatch() only returns on shutdown; a premature return is a failure
    // the supervisor should handle.
    anyhow::bail!("long-poll dispatcher stopped")
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = command::bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
