//! Update handling: message/callback routing and command execution.

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, Me, Message, ParseMode};
use tracing::{error, info, warn};

use crate::bot::auth::is_admin;
use crate::bot::command::{self, Command, CommandParseError};
use crate::bot::keyboard::{self, EMOTE_CALLBACK_PREFIX};
use crate::bot::render;
use crate::domain::catalog;
use crate::domain::{EmoteRequest, RelayStats};
use crate::relay::{EndpointRegistry, FailoverFetcher, FetchOutcome, StatusProber};

/// Length limit for the unexpected-error text shown to users.
const ERROR_DISPLAY_CHARS: usize = 200;

/// Shared dependencies injected into every handler invocation.
pub struct BotContext {
    pub fetcher: FailoverFetcher,
    pub prober: StatusProber,
    pub stats: Arc<RelayStats>,
    pub registry: EndpointRegistry,
    pub admin_id: u64,
    pub me: Me,
}

/// Build the dptree update handler: messages plus inline-button callbacks.
pub fn update_handler() -> UpdateHandler<anyhow::Error> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback))
}

async fn handle_message(bot: Bot, msg: Message, ctx: Arc<BotContext>) -> anyhow::Result<()> {
    if let Some(members) = msg.new_chat_members() {
        return handle_new_members(&bot, &msg, &ctx, members).await;
    }

    let Some(text) = msg.text() else {
        return Ok(());
    };

    match command::parse_message(text) {
        Ok(cmd) => {
            // Catch everything at the command boundary so a single bad
            // update can never take down the polling loop.
            if let Err(err) = execute_command(&bot, &msg, &ctx, cmd).await {
                error!(error = %err, "Command handler failed");
                let reason: String = err.to_string().chars().take(ERROR_DISPLAY_CHARS).collect();
                let _ = reply(&bot, &msg, format!("❌ Unexpected error: `{reason}`")).await;
            }
            Ok(())
        }
        Err(CommandParseError::NotACommand | CommandParseError::UnknownCommand(_)) => {
            // Only one-to-one chats get the fallback; group chatter is
            // none of our business.
            if msg.chat.is_private() {
                bot.send_message(msg.chat.id, render::unknown_text())
                    .parse_mode(ParseMode::Markdown)
                    .reply_markup(keyboard::main_menu())
                    .await?;
            }
            Ok(())
        }
        Err(CommandParseError::EmoteUsage) => {
            reply(&bot, &msg, render::invalid_format_text()).await?;
            Ok(())
        }
        Err(CommandParseError::InvalidRequest(_)) => {
            reply(&bot, &msg, render::not_numeric_text()).await?;
            Ok(())
        }
        Err(CommandParseError::MissingBroadcastText) => {
            // The admin gate still applies to a malformed /broadcast.
            let text = if is_admin(msg.from.as_ref(), ctx.admin_id) {
                "❌ Usage: `/broadcast <message>`".to_string()
            } else {
                render::access_denied_text()
            };
            reply(&bot, &msg, text).await?;
            Ok(())
        }
    }
}

async fn execute_command(
    bot: &Bot,
    msg: &Message,
    ctx: &BotContext,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Start => {
            let first_name = msg
                .from
                .as_ref()
                .map_or("there", |user| user.first_name.as_str());
            bot.send_message(msg.chat.id, render::welcome_text(first_name))
                .parse_mode(ParseMode::Markdown)
                .reply_markup(keyboard::main_menu())
                .await?;
        }
        Command::Help => {
            reply(bot, msg, render::help_text()).await?;
        }
        Command::SendEmoteMenu => {
            bot.send_message(msg.chat.id, render::send_emote_menu_text())
                .parse_mode(ParseMode::Markdown)
                .reply_markup(keyboard::quick_emotes())
                .await?;
        }
        Command::PopularEmotes => {
            reply(bot, msg, render::popular_emotes_text()).await?;
        }
        Command::Cancel => {
            bot.send_message(msg.chat.id, render::cancelled_text())
                .parse_mode(ParseMode::Markdown)
                .reply_markup(keyboard::main_menu())
                .await?;
        }
        Command::Emote(request) => {
            handle_emote(bot, msg, ctx, &request).await?;
        }
        Command::Status => {
            handle_status(bot, msg, ctx).await?;
        }
        Command::Stats => {
            if !is_admin(msg.from.as_ref(), ctx.admin_id) {
                reply(bot, msg, render::access_denied_text()).await?;
                return Ok(());
            }
            let text = render::stats_text(&ctx.stats.snapshot(), ctx.admin_id, &ctx.registry);
            reply(bot, msg, text).await?;
        }
        Command::Broadcast(text) => {
            if !is_admin(msg.from.as_ref(), ctx.admin_id) {
                reply(bot, msg, render::access_denied_text()).await?;
                return Ok(());
            }
            // No user registry exists, so there is nobody to fan out to;
            // the text is echoed back to the admin.
            reply(bot, msg, render::broadcast_echo_text(&text)).await?;
        }
    }

    Ok(())
}

async fn handle_emote(
    bot: &Bot,
    msg: &Message,
    ctx: &BotContext,
    request: &EmoteRequest,
) -> anyhow::Result<()> {
    ctx.stats.record_request();

    if request.uid_length_unusual() {
        reply(bot, msg, render::uid_advisory_text()).await?;
    }

    let processing = reply(bot, msg, render::processing_text(request)).await?;

    let outcome = ctx.fetcher.send_emote(request).await;

    // The transient notice goes away exactly once, whatever the outcome.
    if let Err(err) = bot.delete_message(msg.chat.id, processing.id).await {
        warn!(error = %err, "Failed to delete processing notice");
    }

    match outcome {
        FetchOutcome::Success(success) => {
            ctx.stats.record_success();
            info!(
                endpoint = success.endpoint,
                uid = request.uid(),
                emote = request.emote_id(),
                "Emote relayed"
            );
            reply(bot, msg, render::success_text(request, &success)).await?;
        }
        FetchOutcome::Failure(failure) => {
            ctx.stats.record_failure();
            reply(bot, msg, render::failure_text(&failure)).await?;
        }
    }

    Ok(())
}

async fn handle_status(bot: &Bot, msg: &Message, ctx: &BotContext) -> anyhow::Result<()> {
    let notice = reply(bot, msg, render::checking_status_text()).await?;

    let health = ctx.prober.probe_all().await;
    let snapshot = ctx.stats.snapshot();

    if let Err(err) = bot.delete_message(msg.chat.id, notice.id).await {
        warn!(error = %err, "Failed to delete status notice");
    }

    reply(bot, msg, render::status_text(&health, &snapshot)).await?;
    Ok(())
}

async fn handle_new_members(
    bot: &Bot,
    msg: &Message,
    ctx: &BotContext,
    members: &[teloxide::types::User],
) -> anyhow::Result<()> {
    if members.iter().any(|member| member.id == ctx.me.user.id) {
        info!(chat_id = msg.chat.id.0, "Added to a group chat");
        bot.send_message(msg.chat.id, render::group_welcome_text())
            .parse_mode(ParseMode::Markdown)
            .await?;
    }
    Ok(())
}

async fn handle_callback(bot: Bot, q: CallbackQuery, _ctx: Arc<BotContext>) -> anyhow::Result<()> {
    let Some(data) = q.data.clone() else {
        return Ok(());
    };
    let Some(emote_id) = data.strip_prefix(EMOTE_CALLBACK_PREFIX) else {
        return Ok(());
    };

    let name = catalog::emote_name(emote_id).unwrap_or("Unknown");

    bot.answer_callback_query(q.id.clone())
        .text(render::callback_ack_text(name))
        .await?;

    if let Some(message) = q.regular_message() {
        bot.send_message(message.chat.id, render::emote_selected_text(emote_id, name))
            .parse_mode(ParseMode::Markdown)
            .await?;
    }

    Ok(())
}

async fn reply(bot: &Bot, msg: &Message, text: String) -> Result<Message, teloxide::RequestError> {
    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Markdown)
        .await
}
