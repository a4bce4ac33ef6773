use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};

use valour_shared::clients::telegram::Update;
use valour_shared::errors::{AppError, AppResult};

use crate::telegram::convert;
use crate::AppState;

pub const SECRET_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// POST /telegram/webhook - one update pushed by Telegram.
///
/// The secret header is checked before the body is parsed.
pub async fn telegram_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<StatusCode> {
    if let Some(expected) = state.config.webhook_secret.as_deref() {
        let given = headers.get(SECRET_HEADER).map(|v| v.as_bytes()).unwrap_or_default();
        if !secret_matches(given, expected.as_bytes()) {
            tracing::warn!("webhook call with bad secret token");
            return Err(AppError::unauthorized("invalid webhook secret"));
        }
    }

    let update: Update = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "malformed webhook body");
        AppError::bad_request("malformed update")
    })?;

    let update_id = update.update_id;
    match convert::to_inbound(update) {
        Some(inbound) => state.bot.handle(inbound).await,
        None => tracing::debug!(update_id, "ignoring update"),
    }

    Ok(StatusCode::OK)
}

/// Length-then-content comparison that inspects every byte.
fn secret_matches(given: &[u8], expected: &[u8]) -> bool {
    given.len() == expected.len()
        && given.iter().zip(expected).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::{router, testing};

    fn start_update() -> String {
        serde_json::json!({
            "update_id": 100,
            "message": {
                "message_id": 1,
                "from": { "id": 7, "is_bot": false, "first_name": "Al" },
                "chat": { "id": 7 },
                "text": "/start"
            }
        })
        .to_string()
    }

    fn post(secret: Option<&str>) -> Request<Body> {
        post_body(secret, start_update())
    }

    fn post_body(secret: Option<&str>, body: String) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/telegram/webhook")
            .header("content-type", "application/json");
        if let Some(secret) = secret {
            builder = builder.header(SECRET_HEADER, secret);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn update_is_handled_before_responding() {
        let (state, messenger) = testing::state(None);

        let response = router(state).oneshot(post(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(messenger.last_to(7).text, "1/6: What's your name?");
    }

    #[tokio::test]
    async fn matching_secret_is_accepted() {
        let (state, messenger) = testing::state(Some("s3cret"));

        let response = router(state).oneshot(post(Some("s3cret"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!messenger.sent_to(7).is_empty());
    }

    #[tokio::test]
    async fn wrong_or_missing_secret_is_unauthorized() {
        for secret in [None, Some("guess")] {
            let (state, messenger) = testing::state(Some("s3cret"));

            let response = router(state).oneshot(post(secret)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert!(messenger.sent_to(7).is_empty());
        }
    }

    #[tokio::test]
    async fn secret_is_checked_before_the_body() {
        let (state, _) = testing::state(Some("s3cret"));
        let response = router(state).oneshot(post_body(None, "not json".into())).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let (state, _) = testing::state(Some("s3cret"));
        let response = router(state).oneshot(post_body(Some("s3cret"), "not json".into())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn secret_comparison() {
        assert!(secret_matches(b"s3cret", b"s3cret"));
        assert!(!secret_matches(b"s3creT", b"s3cret"));
        assert!(!secret_matches(b"s3cre", b"s3cret"));
        assert!(!secret_matches(b"", b"s3cret"));
    }
}
