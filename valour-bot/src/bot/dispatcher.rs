use valour_shared::errors::AppResult;

use crate::bot::handlers::{matching, profile, start};
use crate::bot::{Context, Session};
use crate::input::{Choice, Command, Input, MenuAction};

/// Route one input. Commands and menu choices always win over an open
/// session and discard it; anything else continues the session.
pub async fn route(ctx: &Context<'_>, input: Input) -> AppResult<()> {
    match input {
        Input::Command(Command::Start) => start::start(ctx).await,
        Input::Command(Command::Help) => {
            ctx.clear_session();
            start::help(ctx).await
        }
        Input::Command(Command::Unknown) => start::unknown(ctx).await,
        Input::Command(Command::Find) | Input::Choice(Choice::Menu(MenuAction::FindMatch)) => {
            ctx.clear_session();
            matching::find_match(ctx).await
        }
        Input::Choice(Choice::Menu(MenuAction::ViewProfile)) => {
            ctx.clear_session();
            profile::view(ctx).await
        }
        Input::Choice(Choice::Menu(MenuAction::EditProfile)) => {
            ctx.clear_session();
            profile::edit(ctx).await
        }
        Input::Choice(Choice::Menu(MenuAction::DeleteProfile)) => {
            ctx.clear_session();
            profile::delete(ctx).await
        }
        other => match ctx.take_session() {
            Some(Session::Profile(session)) => profile::continue_session(ctx, session, other).await,
            Some(Session::Swiping(deck)) => matching::continue_swipe(ctx, deck, other).await,
            None => start::unknown(ctx).await,
        },
    }
}
