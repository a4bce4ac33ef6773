use std::time::Duration;

use tracing::Instrument;

use valour_shared::errors::AppResult;

use crate::bot::{Context, Reply};
use crate::models::Profile;

/// Upper bound on the partner handle lookup before the liker is answered.
pub const HANDLE_LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

pub fn match_message(partner: &str) -> String {
    format!("🎉 It's a match! You and {partner} liked each other ❤️\nStart chatting now!")
}

/// Tell both sides about a freshly formed match.
///
/// The liker is told synchronously and a failure there is an error. The
/// partner is told from a detached task; if that delivery fails it is only
/// logged.
pub async fn announce(ctx: &Context<'_>, owner_name: &str, partner: &Profile) -> AppResult<()> {
    let partner_id = partner.telegram_id;

    let partner_handle = tokio::time::timeout(
        HANDLE_LOOKUP_TIMEOUT,
        ctx.messenger().display_handle(partner_id),
    )
    .await
    .unwrap_or_else(|_| {
        tracing::debug!(partner_id, "handle lookup timed out");
        None
    })
    .unwrap_or_else(|| partner.name.clone());
    let owner_handle = ctx.sender.handle_or(owner_name);

    metrics::counter!("matches_formed_total").increment(1);
    tracing::info!(user_id = ctx.user_id(), partner_id, "match formed");

    ctx.reply(Reply::text(match_message(&partner_handle))).await?;

    let messenger = ctx.messenger().clone();
    let notice = Reply::text(match_message(&owner_handle));
    tokio::spawn(
        async move {
            if let Err(e) = messenger.deliver(partner_id, &notice).await {
                tracing::warn!(error = %e, partner_id, "match notification not delivered");
            }
        }
        .in_current_span(),
    );

    Ok(())
}
