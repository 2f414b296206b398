//! Reply and inline keyboards.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::domain::catalog;

/// Callback-data prefix carried by quick-pick buttons.
pub const EMOTE_CALLBACK_PREFIX: &str = "emote_";

/// Buttons per row on the quick-pick keyboard.
const QUICK_PICK_ROW_WIDTH: usize = 3;

/// Persistent main-menu reply keyboard.
#[must_use]
pub fn main_menu() -> KeyboardMarkup {
    KeyboardMarkup::new([
        [
            KeyboardButton::new("🎮 Send Emote"),
            KeyboardButton::new("📊 Status"),
        ],
        [
            KeyboardButton::new("❓ Help"),
            KeyboardButton::new("🔥 Popular Emotes"),
        ],
    ])
    .resize_keyboard()
}

/// Inline keyboard offering the leading catalog entries as one-tap picks.
#[must_use]
pub fn quick_emotes() -> InlineKeyboardMarkup {
    let buttons: Vec<InlineKeyboardButton> = catalog::quick_picks()
        .iter()
        .map(|(id, name)| {
            InlineKeyboardButton::callback(*name, format!("{EMOTE_CALLBACK_PREFIX}{id}"))
        })
        .collect();

    let rows: Vec<Vec<InlineKeyboardButton>> = buttons
        .chunks(QUICK_PICK_ROW_WIDTH)
        .map(<[InlineKeyboardButton]>::to_vec)
        .collect();

    InlineKeyboardMarkup::new(rows)
}
