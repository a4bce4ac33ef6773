use valour_shared::errors::AppResult;

use crate::bot::{Context, Keyboard, Reply, Session};
use crate::conversation::{prompts, ProfileSession};
use crate::services::profile_service;

const HELP: &str = "ValourMatch commands:\n\
/start - create your profile or open the menu\n\
/find - browse new profiles\n\
/help - show this message\n\n\
Use the menu buttons to view, edit or delete your profile.";

/// `/start`: registered users get the menu, everyone else begins
/// registration. Any open session is dropped first.
pub async fn start(ctx: &Context<'_>) -> AppResult<()> {
    ctx.clear_session();

    if let Some(profile) = profile_service::get_profile(ctx.db(), ctx.user_id())? {
        let greeting = format!("Welcome back, {}! What would you like to do?", profile.name);
        return ctx.reply(Reply::text(greeting).with_keyboard(Keyboard::Menu)).await;
    }

    tracing::info!(user = %ctx.sender.display(), "registration started");
    let session = ProfileSession::register();
    let prompt = prompts::step_prompt(&session);
    ctx.put_session(Session::Profile(session));

    ctx.reply(prompts::registration_intro()).await?;
    ctx.reply(prompt).await
}

pub async fn help(ctx: &Context<'_>) -> AppResult<()> {
    ctx.reply(Reply::text(HELP).with_keyboard(Keyboard::Menu)).await
}

pub async fn unknown(ctx: &Context<'_>) -> AppResult<()> {
    let hint = "I didn't get that. Pick an option from the menu, or send /help.";
    ctx.reply(Reply::text(hint).with_keyboard(Keyboard::Menu)).await
}
