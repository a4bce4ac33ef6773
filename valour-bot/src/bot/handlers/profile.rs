use valour_shared::errors::{AppError, AppResult};

use crate::bot::{Context, Keyboard, Reply, Session};
use crate::conversation::{prompts, Advance, ProfileSession};
use crate::input::Input;
use crate::services::profile_service;

pub async fn view(ctx: &Context<'_>) -> AppResult<()> {
    let profile = profile_service::require_profile(ctx.db(), ctx.user_id())?;

    let reply = match profile.photo() {
        Some(photo) => Reply::photo(photo, profile.owner_caption()),
        None => Reply::text(profile.owner_caption()),
    };
    ctx.reply(reply.with_keyboard(Keyboard::Menu)).await
}

pub async fn edit(ctx: &Context<'_>) -> AppResult<()> {
    let profile = profile_service::require_profile(ctx.db(), ctx.user_id())?;

    let session = ProfileSession::edit(profile.fields());
    let prompt = prompts::step_prompt(&session);
    ctx.put_session(Session::Profile(session));

    ctx.reply(prompts::edit_intro()).await?;
    ctx.reply(prompt).await
}

pub async fn delete(ctx: &Context<'_>) -> AppResult<()> {
    if !profile_service::delete_profile(ctx.db(), ctx.user_id())? {
        return Err(AppError::profile_not_found(ctx.user_id()));
    }

    metrics::counter!("profiles_deleted_total").increment(1);
    tracing::info!(user = %ctx.sender.display(), "profile deleted");

    let farewell = "🗑 Your profile has been deleted. Send /start whenever you want to come back.";
    ctx.reply(Reply::text(farewell).with_keyboard(Keyboard::Remove)).await
}

/// Feed one input into an open registration or edit.
pub async fn continue_session(ctx: &Context<'_>, mut session: ProfileSession, input: Input) -> AppResult<()> {
    match session.handle(&input) {
        Advance::Stay(err) => {
            tracing::debug!(step = ?session.step(), reason = %err, "profile input rejected");
            let reply = prompts::rejection(&session, &err);
            ctx.put_session(Session::Profile(session));
            ctx.reply(reply).await
        }
        Advance::Next(_) => {
            let reply = prompts::step_prompt(&session);
            ctx.put_session(Session::Profile(session));
            ctx.reply(reply).await
        }
        Advance::Commit(fields) => {
            let editing = session.is_editing();
            profile_service::upsert_profile(ctx.db(), ctx.user_id(), &fields)?;

            metrics::counter!("profiles_saved_total").increment(1);
            tracing::info!(user = %ctx.sender.display(), editing, "profile saved");

            ctx.reply(Reply::text("✅ Profile saved!").with_keyboard(Keyboard::Menu)).await
        }
    }
}
