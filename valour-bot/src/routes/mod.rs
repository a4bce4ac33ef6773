use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use valour_shared::middleware::metrics_middleware;

use crate::AppState;

pub mod health;
pub mod webhook;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        .route("/telegram/webhook", post(webhook::telegram_webhook))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use metrics_exporter_prometheus::PrometheusBuilder;

    use crate::bot::testing::RecordingMessenger;
    use crate::bot::Bot;
    use crate::config::{AppConfig, RunMode};
    use crate::db::test_pool;
    use crate::AppState;

    pub fn state(webhook_secret: Option<&str>) -> (Arc<AppState>, Arc<RecordingMessenger>) {
        let messenger = Arc::new(RecordingMessenger::default());
        let config = AppConfig {
            telegram_token: "test-token".into(),
            telegram_api_url: "http://localhost".into(),
            database_url: ":memory:".into(),
            db_pool_size: 1,
            mode: RunMode::Webhook,
            port: 0,
            webhook_url: Some("https://bot.example.com/telegram/webhook".into()),
            webhook_secret: webhook_secret.map(str::to_string),
            poll_timeout_secs: 1,
            session_idle_secs: 60,
        };
        let state = AppState {
            bot: Bot::new(test_pool(), messenger.clone()),
            config,
            metrics_handle: PrometheusBuilder::new().build_recorder().handle(),
        };
        (Arc::new(state), messenger)
    }
}
