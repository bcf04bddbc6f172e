//! Best-effort member notification
//!
//! Direct messages are a courtesy: a closed DM channel or a member who
//! left must never fail the operation that triggered the notice. The
//! outcome is typed so callers (and tests) can observe suppression without
//! scraping logs.

use tracing::debug;

use warden_core::{Delivery, Platform, Snowflake};

/// Send a DM, returning the typed outcome; failures are logged, not raised
pub(crate) async fn notify_member(
    platform: &dyn Platform,
    member: Snowflake,
    content: &str,
) -> Delivery {
    match platform.send_dm(member, content).await {
        Ok(()) => Delivery::Delivered,
        Err(e) => {
            debug!(member = %member, error = %e, "DM suppressed");
            Delivery::Suppressed(e.to_string())
        }
    }
}
