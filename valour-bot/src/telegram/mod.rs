//! Telegram transport: outbound [`Messenger`] over the Bot API and inbound
//! update conversion.

use valour_shared::clients::telegram::{DeliveryError, TelegramClient};

use crate::bot::{Messenger, Reply};
use crate::input::UserId;

pub mod convert;
pub mod markup;
pub mod polling;

pub struct TelegramMessenger {
    client: TelegramClient,
}

impl TelegramMessenger {
    pub fn new(client: TelegramClient) -> Self {
        Self { client }
    }
}

#[axum::async_trait]
impl Messenger for TelegramMessenger {
    async fn deliver(&self, to: UserId, reply: &Reply) -> Result<(), DeliveryError> {
        let markup = reply.keyboard.map(markup::reply_markup);

        match &reply.photo {
            Some(photo) => {
                self.client
                    .send_photo(to, photo, Some(&reply.text), markup.as_ref())
                    .await
            }
            None => self.client.send_message(to, &reply.text, markup.as_ref()).await,
        }
    }

    async fn display_handle(&self, id: UserId) -> Option<String> {
        match self.client.get_chat(id).await {
            Ok(chat) => chat.username.map(|u| format!("@{u}")),
            Err(e) => {
                tracing::debug!(error = %e, user_id = id, "chat lookup failed");
                None
            }
        }
    }

    async fn acknowledge(&self, callback_id: &str) {
        if let Err(e) = self.client.answer_callback_query(callback_id).await {
            tracing::debug!(error = %e, "callback acknowledgement failed");
        }
    }
}
