//! Transport-independent bot core: one [`Bot`] handles every inbound event
//! through a per-request [`Context`].

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use valour_shared::clients::db::DbPool;
use valour_shared::clients::telegram::DeliveryError;
use valour_shared::errors::{AppError, AppResult};

use crate::input::{Inbound, Sender, UserId};

pub mod dispatcher;
mod handlers;
pub mod sessions;

pub use sessions::{Session, SessionRegistry};

pub const APOLOGY: &str = "😵 Oops, something went wrong. Please try again!";
pub const REGISTER_FIRST: &str = "You don't have a profile yet. Send /start to create one.";

/// Option sets attached to an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    Menu,
    Genders,
    GendersOrKeep,
    KeepCurrent,
    Swipe,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Photo reference; `text` becomes its caption.
    pub photo: Option<String>,
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), photo: None, keyboard: None }
    }

    pub fn photo(photo: impl Into<String>, caption: impl Into<String>) -> Self {
        Self { text: caption.into(), photo: Some(photo.into()), keyboard: None }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

/// Outbound side of the messaging transport.
#[axum::async_trait]
pub trait Messenger: Send + Sync {
    async fn deliver(&self, to: UserId, reply: &Reply) -> Result<(), DeliveryError>;

    /// `@username` when the transport knows one.
    async fn display_handle(&self, id: UserId) -> Option<String>;

    /// Confirm receipt of a pressed option. Best-effort.
    async fn acknowledge(&self, callback_id: &str);
}

#[derive(Clone)]
pub struct Bot {
    db: DbPool,
    sessions: SessionRegistry,
    messenger: Arc<dyn Messenger>,
}

impl Bot {
    pub fn new(db: DbPool, messenger: Arc<dyn Messenger>) -> Self {
        Self { db, sessions: SessionRegistry::default(), messenger }
    }

    /// Replace the session registry, e.g. to use a configured idle TTL.
    pub fn with_sessions(mut self, sessions: SessionRegistry) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn db(&self) -> &DbPool {
        &self.db
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Handle one inbound event. Failures are logged and answered here, never
    /// returned to the transport.
    pub async fn handle(&self, inbound: Inbound) {
        metrics::counter!("bot_updates_total").increment(1);

        let span = tracing::info_span!(
            "update",
            request_id = %Uuid::now_v7(),
            user_id = inbound.sender.id,
        );

        async move {
            if let Some(callback_id) = &inbound.callback_id {
                self.messenger.acknowledge(callback_id).await;
            }

            let ctx = Context { bot: self, sender: inbound.sender };
            if let Err(err) = dispatcher::route(&ctx, inbound.input).await {
                ctx.recover(err).await;
            }
        }
        .instrument(span)
        .await
    }
}

/// Everything a handler needs for one event.
pub struct Context<'a> {
    bot: &'a Bot,
    pub sender: Sender,
}

impl<'a> Context<'a> {
    pub fn user_id(&self) -> UserId {
        self.sender.id
    }

    pub fn db(&self) -> &DbPool {
        &self.bot.db
    }

    pub fn messenger(&self) -> &Arc<dyn Messenger> {
        &self.bot.messenger
    }

    pub async fn reply(&self, reply: Reply) -> AppResult<()> {
        self.bot.messenger.deliver(self.sender.id, &reply).await?;
        Ok(())
    }

    pub fn take_session(&self) -> Option<Session> {
        self.bot.sessions.take(self.sender.id)
    }

    pub fn put_session(&self, session: Session) {
        self.bot.sessions.put(self.sender.id, session);
    }

    pub fn clear_session(&self) {
        self.bot.sessions.clear(self.sender.id);
    }

    async fn recover(&self, err: AppError) {
        let reply = if err.is_not_found() {
            tracing::debug!(error = %err, "no profile for user");
            Reply::text(REGISTER_FIRST).with_keyboard(Keyboard::Remove)
        } else {
            tracing::error!(error = %err, user = %self.sender.display(), "failed to handle update");
            self.clear_session();
            Reply::text(APOLOGY).with_keyboard(Keyboard::Menu)
        };

        if let Err(e) = self.reply(reply).await {
            tracing::warn!(error = %e, "could not deliver error reply");
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Messenger that records every delivery. Ids in `unreachable` fail.
    #[derive(Default)]
    pub struct RecordingMessenger {
        pub sent: Mutex<Vec<(UserId, Reply)>>,
        pub acknowledged: Mutex<Vec<String>>,
        pub unreachable: Vec<UserId>,
        pub handles: Vec<(UserId, String)>,
        /// Delay before `display_handle` answers.
        pub handle_delay: Option<std::time::Duration>,
    }

    impl RecordingMessenger {
        pub fn sent_to(&self, id: UserId) -> Vec<Reply> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .filter(|(to, _)| *to == id)
                .map(|(_, r)| r.clone())
                .collect()
        }

        pub fn last_to(&self, id: UserId) -> Reply {
            self.sent_to(id).pop().expect("no reply delivered")
        }

        pub fn clear(&self) {
            self.sent.lock().unwrap().clear();
        }
    }

    #[axum::async_trait]
    impl Messenger for RecordingMessenger {
        async fn deliver(&self, to: UserId, reply: &Reply) -> Result<(), DeliveryError> {
            if self.unreachable.contains(&to) {
                return Err(DeliveryError::Api { code: 403, description: "Forbidden: bot was blocked by the user".into() });
            }
            self.sent.lock().unwrap().push((to, reply.clone()));
            Ok(())
        }

        async fn display_handle(&self, id: UserId) -> Option<String> {
            if let Some(delay) = self.handle_delay {
                tokio::time::sleep(delay).await;
            }
            self.handles.iter().find(|(i, _)| *i == id).map(|(_, h)| h.clone())
        }

        async fn acknowledge(&self, callback_id: &str) {
            self.acknowledged.lock().unwrap().push(callback_id.to_string());
        }
    }

    pub fn sender(id: UserId, first_name: &str) -> Sender {
        Sender { id, first_name: first_name.to_string(), username: None }
    }

    pub fn inbound(sender: &Sender, input: crate::input::Input) -> Inbound {
        Inbound { sender: sender.clone(), input, callback_id: None }
    }

    /// Let detached notification tasks run.
    pub async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }
}
