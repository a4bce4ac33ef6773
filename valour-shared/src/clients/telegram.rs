use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("telegram api error {code}: {description}")]
    Api { code: i32, description: String },

    #[error("telegram api returned ok without a result")]
    EmptyResult,
}

// --- Inbound wire types ---

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
    pub caption: Option<String>,
    #[serde(default)]
    pub photo: Vec<PhotoSize>,
}

impl Message {
    /// The `file_id` of the biggest rendition Telegram sent, if this is a photo.
    pub fn largest_photo(&self) -> Option<&str> {
        self.photo
            .iter()
            .max_by_key(|p| u64::from(p.width) * u64::from(p.height))
            .map(|p| p.file_id.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub data: Option<String>,
    pub message: Option<Message>,
}

// --- Outbound wire types ---

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Keyboard(ReplyKeyboardMarkup),
    Inline(InlineKeyboardMarkup),
    Remove(ReplyKeyboardRemove),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
    pub one_time_keyboard: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KeyboardButton {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReplyKeyboardRemove {
    pub remove_keyboard: bool,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a ReplyMarkup>,
}

#[derive(Debug, Serialize)]
struct SendPhoto<'a> {
    chat_id: i64,
    photo: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a ReplyMarkup>,
}

#[derive(Debug, Serialize)]
struct GetUpdates<'a> {
    offset: i64,
    timeout: u64,
    allowed_updates: &'a [&'a str],
}

#[derive(Debug, Serialize)]
struct GetChat {
    chat_id: i64,
}

#[derive(Debug, Serialize)]
struct AnswerCallbackQuery<'a> {
    callback_query_id: &'a str,
}

#[derive(Debug, Serialize)]
struct SetWebhook<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_token: Option<&'a str>,
    allowed_updates: &'a [&'a str],
}

#[derive(Debug, Serialize)]
struct DeleteWebhook {
    drop_pending_updates: bool,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i32>,
}

impl<T> ApiEnvelope<T> {
    fn into_result(self) -> Result<T, DeliveryError> {
        if !self.ok {
            return Err(DeliveryError::Api {
                code: self.error_code.unwrap_or_default(),
                description: self.description.unwrap_or_else(|| "unknown error".into()),
            });
        }
        self.result.ok_or(DeliveryError::EmptyResult)
    }
}

const ALLOWED_UPDATES: &[&str] = &["message", "callback_query"];

/// Thin client over the Telegram Bot HTTP API.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(api_url: &str, token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        }
    }

    async fn call<P, R>(&self, method: &str, params: &P, timeout: Duration) -> Result<R, DeliveryError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let envelope: ApiEnvelope<R> = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .timeout(timeout)
            .json(params)
            .send()
            .await?
            .json()
            .await?;

        let result = envelope.into_result();
        if let Err(e) = &result {
            tracing::debug!(method = %method, error = %e, "telegram call failed");
        }
        result
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<&ReplyMarkup>,
    ) -> Result<(), DeliveryError> {
        let params = SendMessage { chat_id, text, reply_markup };
        self.call::<_, serde_json::Value>("sendMessage", &params, REQUEST_TIMEOUT).await?;
        Ok(())
    }

    pub async fn send_photo(
        &self,
        chat_id: i64,
        photo: &str,
        caption: Option<&str>,
        reply_markup: Option<&ReplyMarkup>,
    ) -> Result<(), DeliveryError> {
        let params = SendPhoto { chat_id, photo, caption, reply_markup };
        self.call::<_, serde_json::Value>("sendPhoto", &params, REQUEST_TIMEOUT).await?;
        Ok(())
    }

    /// Long-poll for updates; the HTTP timeout is stretched past `timeout_secs`.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, DeliveryError> {
        let params = GetUpdates { offset, timeout: timeout_secs, allowed_updates: ALLOWED_UPDATES };
        let http_timeout = Duration::from_secs(timeout_secs) + REQUEST_TIMEOUT;
        self.call("getUpdates", &params, http_timeout).await
    }

    pub async fn get_chat(&self, chat_id: i64) -> Result<Chat, DeliveryError> {
        self.call("getChat", &GetChat { chat_id }, REQUEST_TIMEOUT).await
    }

    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), DeliveryError> {
        let params = AnswerCallbackQuery { callback_query_id };
        self.call::<_, bool>("answerCallbackQuery", &params, REQUEST_TIMEOUT).await?;
        Ok(())
    }

    pub async fn set_webhook(&self, url: &str, secret_token: Option<&str>) -> Result<(), DeliveryError> {
        let params = SetWebhook { url, secret_token, allowed_updates: ALLOWED_UPDATES };
        self.call::<_, bool>("setWebhook", &params, REQUEST_TIMEOUT).await?;
        tracing::info!(url = %url, "telegram webhook registered");
        Ok(())
    }

    pub async fn delete_webhook(&self) -> Result<(), DeliveryError> {
        let params = DeleteWebhook { drop_pending_updates: false };
        self.call::<_, bool>("deleteWebhook", &params, REQUEST_TIMEOUT).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_photo_update_and_picks_largest() {
        let json = r#"{
            "update_id": 10,
            "message": {
                "message_id": 5,
                "from": { "id": 77, "is_bot": false, "first_name": "Al", "username": "al" },
                "chat": { "id": 77, "type": "private" },
                "photo": [
                    { "file_id": "small", "file_unique_id": "a", "width": 90, "height": 90 },
                    { "file_id": "big", "file_unique_id": "b", "width": 1280, "height": 960 },
                    { "file_id": "mid", "file_unique_id": "c", "width": 320, "height": 240 }
                ]
            }
        }"#;

        let update: Update = serde_json::from_str(json).unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.largest_photo(), Some("big"));
        assert_eq!(message.from.unwrap().username.as_deref(), Some("al"));
        assert!(message.text.is_none());
    }

    #[test]
    fn parses_callback_query() {
        let json = r#"{
            "update_id": 11,
            "callback_query": {
                "id": "cb1",
                "from": { "id": 9, "first_name": "Bo" },
                "data": "keep"
            }
        }"#;

        let update: Update = serde_json::from_str(json).unwrap();
        let cb = update.callback_query.unwrap();
        assert_eq!(cb.data.as_deref(), Some("keep"));
        assert!(cb.message.is_none());
    }

    #[test]
    fn error_envelope_becomes_api_error() {
        let envelope: ApiEnvelope<bool> = serde_json::from_str(
            r#"{ "ok": false, "error_code": 403, "description": "Forbidden: bot was blocked by the user" }"#,
        )
        .unwrap();

        match envelope.into_result() {
            Err(DeliveryError::Api { code, description }) => {
                assert_eq!(code, 403);
                assert!(description.contains("blocked"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn markup_serializes_untagged() {
        let markup = ReplyMarkup::Inline(InlineKeyboardMarkup {
            inline_keyboard: vec![vec![InlineKeyboardButton {
                text: "Keep current".into(),
                callback_data: "keep".into(),
            }]],
        });
        let json = serde_json::to_value(&markup).unwrap();
        assert_eq!(json["inline_keyboard"][0][0]["callback_data"], "keep");

        let params = SendMessage { chat_id: 1, text: "hi", reply_markup: None };
        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("reply_markup").is_none());
    }

    #[test]
    fn base_url_trims_trailing_slash() {
        let client = TelegramClient::new("https://api.telegram.org/", "123:abc");
        assert_eq!(client.base_url, "https://api.telegram.org/bot123:abc");
    }
}
