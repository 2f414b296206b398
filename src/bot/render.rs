//! User-facing reply text.
//!
//! All texts use legacy Markdown, matching what the upstream bot sends; the
//! handler sets the parse mode once per message.

use chrono::Local;

use crate::domain::catalog;
use crate::domain::stats::StatsSnapshot;
use crate::domain::EmoteRequest;
use crate::relay::fetcher::{FetchFailure, FetchSuccess};
use crate::relay::probe::EndpointHealth;
use crate::relay::EndpointRegistry;

#[must_use]
pub fn welcome_text(first_name: &str) -> String {
    format!(
        "🎮 *Welcome to the Emote Relay Bot!*\n\n\
        Hello {first_name}! 👋\n\n\
        I relay in-game emotes for you, with a dual API and automatic failover.\n\n\
        ✨ *Features:*\n\
        • Dual API System (Auto Failover)\n\
        • Fast Response Time\n\
        • Popular Emotes Database\n\
        • Real-time Status Check\n\n\
        📱 *Get Started:*\n\
        Tap \"🎮 Send Emote\" below or use:\n\
        `/e <team_code> <uid> <emote_id>`\n\n\
        ⚡ *Example:*\n\
        `/e 8552785 11987556088 909000065`"
    )
}

#[must_use]
pub fn help_text() -> String {
    let mut text = String::from(
        "📚 *Complete Guide*\n\n\
        *Command List:*\n\n\
        1️⃣ *Send Emote:*\n\
        `/e <team_code> <uid> <emote_id>`\n\
        Example: `/e 8552785 11987556088 909000065`\n\n\
        2️⃣ *Check Status:*\n\
        `/status` - Check API health\n\n\
        3️⃣ *View Statistics:*\n\
        `/stats` - Bot usage stats (Admin only)\n\n\
        4️⃣ *Quick Help:*\n\
        `/help` - Show this message\n\n\
        *Popular Emote IDs:*\n",
    );
    for (id, name) in catalog::POPULAR_EMOTES {
        text.push_str(&format!("\n• `{id}` - {name}"));
    }
    text.push_str(
        "\n\n💡 *Tips:*\n\
        • Make sure all values are numbers\n\
        • Team Code is your lobby code\n\
        • UID is your in-game ID\n\
        • API may take 30s on first request (cold start)\n\n\
        ❓ Need help? Contact Admin",
    );
    text
}

#[must_use]
pub fn invalid_format_text() -> String {
    "❌ *Invalid Format!*\n\n\
    ✅ Correct Format:\n\
    `/e <team_code> <uid> <emote_id>`\n\n\
    📋 Example:\n\
    `/e 8552785 11987556088 909000065`\n\n\
    💡 Use `/help` for more info"
        .to_string()
}

#[must_use]
pub fn not_numeric_text() -> String {
    "❌ *Error:* All values must be numbers only!".to_string()
}

#[must_use]
pub fn uid_advisory_text() -> String {
    "⚠️ *Warning:* UID should be 8-12 digits".to_string()
}

#[must_use]
pub fn processing_text(request: &EmoteRequest) -> String {
    format!(
        "⏳ *Processing Request...*\n\n\
        👥 Team Code: `{}`\n\
        🆔 UID: `{}`\n\
        🎭 Emote ID: `{}`\n\n\
        🔄 Connecting to API...\n\
        ⏱️ This may take up to 60 seconds",
        request.team_code(),
        request.uid(),
        request.emote_id()
    )
}

#[must_use]
pub fn success_text(request: &EmoteRequest, success: &FetchSuccess) -> String {
    let emote_name = catalog::emote_name_or_default(request.emote_id());
    format!(
        "✅ *Emote Sent Successfully!*\n\n\
        📊 *Details:*\n\
        • 👥 Team Code: `{}`\n\
        • 🆔 User ID: `{}`\n\
        • 🎭 Emote: `{}` ({})\n\
        • 🌐 API Used: {}\n\
        • ⚡ Response Time: {:.2}s\n\
        • ⏰ Time: {}\n\n\
        🎮 Enjoy your emote!",
        request.team_code(),
        request.uid(),
        request.emote_id(),
        emote_name,
        success.endpoint,
        success.elapsed.as_secs_f64(),
        Local::now().format("%H:%M:%S")
    )
}

#[must_use]
pub fn failure_text(failure: &FetchFailure) -> String {
    format!(
        "❌ *Failed to Send Emote*\n\n\
        🔴 *Error Details:*\n\
        • Status: Both APIs Failed\n\
        • Reason: `{}`\n\n\
        💡 *Solutions:*\n\
        1. Check your Team Code\n\
        2. Verify UID is correct\n\
        3. Try again in 30 seconds\n\
        4. APIs might be sleeping (cold start)\n\n\
        🔄 Use `/status` to check API health",
        failure.summary()
    )
}

#[must_use]
pub fn checking_status_text() -> String {
    "⏳ *Checking API Status...*\nPlease wait...".to_string()
}

#[must_use]
pub fn status_text(health: &[EndpointHealth], snapshot: &StatsSnapshot) -> String {
    let mut lines = String::new();
    for entry in health {
        match &entry.result {
            Ok(reply) => lines.push_str(&format!(
                "🟢 {}: {} ({}ms)\n",
                entry.endpoint,
                reply.status,
                reply.latency.as_millis()
            )),
            Err(_) => lines.push_str(&format!("🔴 {}: Offline\n", entry.endpoint)),
        }
    }

    format!(
        "🚦 *System Status Report*\n\n\
        {lines}\n\
        📊 *Bot Statistics:*\n\
        • 📈 Total Requests: {}\n\
        • ✅ Successful: {}\n\
        • ❌ Failed: {}\n\
        • ⏱️ Uptime: {}\n\n\
        💡 *Note:* APIs may sleep when idle",
        snapshot.total_requests,
        snapshot.successful,
        snapshot.failed,
        snapshot.uptime_text(chrono::Utc::now())
    )
}

#[must_use]
pub fn stats_text(snapshot: &StatsSnapshot, admin_id: u64, registry: &EndpointRegistry) -> String {
    let mut endpoints = String::new();
    for endpoint in registry.iter() {
        endpoints.push_str(&format!("• {}\n", endpoint.name()));
    }

    format!(
        "🔐 *Admin Statistics*\n\n\
        📊 *Usage Stats:*\n\
        • Total Requests: `{}`\n\
        • Successful: `{}`\n\
        • Failed: `{}`\n\
        • Success Rate: `{:.1}%`\n\n\
        ⏱️ *System Info:*\n\
        • Uptime: `{}`\n\
        • Admin ID: `{admin_id}`\n\n\
        🌐 *API Endpoints:*\n\
        {endpoints}",
        snapshot.total_requests,
        snapshot.successful,
        snapshot.failed,
        snapshot.success_rate(),
        snapshot.uptime_text(chrono::Utc::now())
    )
}

#[must_use]
pub fn access_denied_text() -> String {
    "🚫 *Access Denied*\nThis command is for admin only!".to_string()
}

#[must_use]
pub fn broadcast_echo_text(text: &str) -> String {
    format!("📢 Broadcast sent:\n{text}")
}

#[must_use]
pub fn send_emote_menu_text() -> String {
    "🎮 *Send Emote*\n\n\
    Use command:\n\
    `/e <team_code> <uid> <emote_id>`\n\n\
    Or select popular emote below:"
        .to_string()
}

#[must_use]
pub fn popular_emotes_text() -> String {
    let mut text = String::from("🔥 *Popular Emotes*\n\nClick to copy ID:\n\n");
    for (id, name) in catalog::POPULAR_EMOTES {
        text.push_str(&format!("`{id}` - {name}\n"));
    }
    text.push_str("\n💡 Use: `/e <tc> <uid> <emote_id>`");
    text
}

#[must_use]
pub fn cancelled_text() -> String {
    "✅ Cancelled.".to_string()
}

#[must_use]
pub fn unknown_text() -> String {
    "❓ I didn't understand that.\n\n\
    Use buttons below or type `/help` for assistance."
        .to_string()
}

#[must_use]
pub fn emote_selected_text(emote_id: &str, name: &str) -> String {
    format!(
        "✅ Selected: *{name}*\n🎭 ID: `{emote_id}`\n\n\
        Now use:\n`/e <team_code> <uid> {emote_id}`"
    )
}

#[must_use]
pub fn callback_ack_text(name: &str) -> String {
    format!("Selected: {name}")
}

#[must_use]
pub fn group_welcome_text() -> String {
    "🎉 *Thanks for adding me!*\n\n\
    I'm the Emote Relay Bot!\n\n\
    📋 *How to use:*\n\
    `/e <team_code> <uid> <emote_id>`\n\n\
    ⚡ Example:\n\
    `/e 8552785 11987556088 909000065`\n\n\
    ❓ More help: `/help`\n\n\
    ⚠️ *Make me admin for best performance!*"
        .to_string()
}
