//! Static catalog of popular emotes.

/// Display name used when an emote id is not in the catalog.
pub const FALLBACK_EMOTE_NAME: &str = "Custom Emote";

/// Number of catalog entries offered on the inline quick-pick keyboard.
pub const QUICK_PICK_COUNT: usize = 6;

/// Popular emote ids and their display names, in menu order.
pub const POPULAR_EMOTES: &[(&str, &str)] = &[
    ("909000065", "Default Dance"),
    ("909000075", "Cobra Rising"),
    ("909000001", "Rage Emote"),
    ("909000002", "Heart Emote"),
    ("909000003", "Thumbs Up"),
    ("909000004", "Victory Dance"),
    ("909000005", "Laugh"),
    ("909000006", "Cry"),
    ("909000007", "Angry"),
    ("909000008", "Surprised"),
];

/// Look up the display name for an emote id.
#[must_use]
pub fn emote_name(emote_id: &str) -> Option<&'static str> {
    POPULAR_EMOTES
        .iter()
        .find(|(id, _)| *id == emote_id)
        .map(|(_, name)| *name)
}

/// Display name for an emote id, falling back to [`FALLBACK_EMOTE_NAME`].
#[must_use]
pub fn emote_name_or_default(emote_id: &str) -> &'static str {
    emote_name(emote_id).unwrap_or(FALLBACK_EMOTE_NAME)
}

/// The leading catalog entries shown as inline quick-pick buttons.
#[must_use]
pub fn quick_picks() -> &'static [(&'static str, &'static str)] {
    &POPULAR_EMOTES[..QUICK_PICK_COUNT.min(POPULAR_EMOTES.len())]
}
