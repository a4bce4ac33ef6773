use valour_shared::errors::AppResult;

use crate::bot::{Context, Keyboard, Reply, Session};
use crate::input::Input;
use crate::matching::{mutual, SwipeAction, SwipeDeck};
use crate::services::swipe_service::{self, LikeOutcome};
use crate::services::profile_service;

/// Load a fresh candidate list and show the first one.
pub async fn find_match(ctx: &Context<'_>) -> AppResult<()> {
    let me = profile_service::require_profile(ctx.db(), ctx.user_id())?;
    let candidates = swipe_service::find_candidates(ctx.db(), &me)?;

    tracing::debug!(candidates = candidates.len(), "browse started");
    if candidates.is_empty() {
        let text = "No new profiles to show right now. Check back later!";
        return ctx.reply(Reply::text(text).with_keyboard(Keyboard::Menu)).await;
    }

    present(ctx, SwipeDeck::new(me.name, candidates)).await
}

/// Show the candidate under the cursor, or end the browse when there is none.
async fn present(ctx: &Context<'_>, deck: SwipeDeck) -> AppResult<()> {
    let Some(candidate) = deck.current() else {
        let text = "That's everyone for now! No more candidates.";
        return ctx.reply(Reply::text(text).with_keyboard(Keyboard::Menu)).await;
    };

    let card = match candidate.photo() {
        Some(photo) => Reply::photo(photo, candidate.card_caption()),
        None => Reply::text(candidate.card_caption()),
    };
    ctx.put_session(Session::Swiping(deck));
    ctx.reply(card.with_keyboard(Keyboard::Swipe)).await
}

pub async fn continue_swipe(ctx: &Context<'_>, mut deck: SwipeDeck, input: Input) -> AppResult<()> {
    let Some(candidate) = deck.current().cloned() else {
        return present(ctx, deck).await;
    };

    let Some(action) = SwipeAction::from_input(&input) else {
        return present(ctx, deck).await;
    };

    let candidate_id = candidate.telegram_id;
    match action {
        SwipeAction::Stop => {
            tracing::info!(remaining = deck.remaining(), "browse stopped");
            let text = "Stopped browsing. Come back any time!";
            return ctx.reply(Reply::text(text).with_keyboard(Keyboard::Menu)).await;
        }
        SwipeAction::Skip => {
            if swipe_service::record_skip(ctx.db(), ctx.user_id(), candidate_id)? {
                metrics::counter!("skips_recorded_total").increment(1);
            }
            tracing::info!(candidate_id, "skipped");
        }
        SwipeAction::Like => {
            let outcome = swipe_service::like(ctx.db(), ctx.user_id(), candidate_id)?;
            tracing::info!(candidate_id, ?outcome, "liked");
            match outcome {
                LikeOutcome::Recorded => metrics::counter!("likes_recorded_total").increment(1),
                LikeOutcome::Mutual => {
                    metrics::counter!("likes_recorded_total").increment(1);
                    mutual::announce(ctx, deck.owner_name(), &candidate).await?;
                }
                LikeOutcome::Repeated | LikeOutcome::Gone => {}
            }
        }
    }

    deck.advance();
    present(ctx, deck).await
}
