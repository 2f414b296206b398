//! Authorization for admin-restricted commands.

use teloxide::types::User;
use tracing::warn;

/// Check whether the sender is the configured admin.
///
/// Messages without a sender (channel posts) are never admin.
pub fn is_admin(sender: Option<&User>, admin_id: u64) -> bool {
    let Some(user) = sender else {
        return false;
    };

    if user.id.0 == admin_id {
        return true;
    }

    warn!(
        user_id = user.id.0,
        "Ignoring admin command from non-admin user"
    );
    false
}
