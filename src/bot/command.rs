//! Inbound command parsing.
//!
//! Both slash commands and the main-menu button labels are parsed here, so
//! the handler deals in one typed [`Command`] value either way.

use crate::domain::request::{EmoteRequest, RequestError};

/// Supported bot commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Emote(EmoteRequest),
    Status,
    Stats,
    Broadcast(String),
    /// "🎮 Send Emote" menu button: usage text plus the quick-pick keyboard.
    SendEmoteMenu,
    /// "🔥 Popular Emotes" menu button.
    PopularEmotes,
    /// "❌ Cancel" menu button.
    Cancel,
}

/// Parse error for inbound messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
    /// /e invoked with the wrong number of arguments.
    EmoteUsage,
    /// /e argument failed digit-only validation.
    InvalidRequest(RequestError),
    /// /broadcast invoked without text.
    MissingBroadcastText,
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => write!(f, "unknown command `{cmd}`"),
            Self::EmoteUsage => {
                write!(f, "usage: /e <team_code> <uid> <emote_id>")
            }
            Self::InvalidRequest(err) => write!(f, "{err}"),
            Self::MissingBroadcastText => write!(f, "usage: /broadcast <message>"),
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse an inbound message into a bot command.
///
/// Menu-button labels are matched on the whole trimmed text; slash commands
/// accept an `@botname` suffix and space-separated arguments.
pub fn parse_message(text: &str) -> Result<Command, CommandParseError> {
    let text = text.trim();

    match text {
        "🎮 Send Emote" => return Ok(Command::SendEmoteMenu),
        "📊 Status" => return Ok(Command::Status),
        "❓ Help" => return Ok(Command::Help),
        "🔥 Popular Emotes" => return Ok(Command::PopularEmotes),
        "❌ Cancel" => return Ok(Command::Cancel),
        _ => {}
    }

    let mut parts = text.split_whitespace();
    let Some(raw_command) = parts.next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    match command {
        "/start" => Ok(Command::Start),
        "/help" => Ok(Command::Help),
        "/status" => Ok(Command::Status),
        "/stats" => Ok(Command::Stats),
        "/e" | "/emote" => {
            let args: Vec<&str> = parts.collect();
            let [team_code, uid, emote_id] = args.as_slice() else {
                return Err(CommandParseError::EmoteUsage);
            };

            EmoteRequest::new(*team_code, *uid, *emote_id)
                .map(Command::Emote)
                .map_err(CommandParseError::InvalidRequest)
        }
        "/broadcast" => {
            let rest = text
                .split_once(char::is_whitespace)
                .map(|(_, rest)| rest.trim())
                .unwrap_or("");
            if rest.is_empty() {
                return Err(CommandParseError::MissingBroadcastText);
            }
            Ok(Command::Broadcast(rest.to_string()))
        }
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("e", "Send an emote: /e <team_code> <uid> <emote_id>"),
        ("status", "Check emote API health"),
        ("stats", "Bot usage statistics (admin only)"),
        ("help", "Show the full guide"),
    ]
}
