use std::sync::Arc;
use std::time::Duration;

use valour_bot::bot::sessions::{run_sweeper, SessionRegistry};
use valour_bot::bot::Bot;
use valour_bot::config::{AppConfig, RunMode};
use valour_bot::telegram::{polling, TelegramMessenger};
use valour_bot::{db, routes, AppState};
use valour_shared::clients::db::create_pool;
use valour_shared::clients::telegram::TelegramClient;

const SWEEP_EVERY: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    valour_shared::middleware::init_tracing("valour-bot");

    let config = AppConfig::load()?;
    let port = config.port;
    let mode = config.mode;

    let metrics_handle = valour_shared::middleware::init_metrics()?;

    let pool = create_pool(&config.database_url, config.db_pool_size)?;
    db::migrate(&pool, &config.database_url)?;

    let telegram = TelegramClient::new(&config.telegram_api_url, &config.telegram_token);
    let sessions = SessionRegistry::new(Duration::from_secs(config.session_idle_secs));
    let bot = Bot::new(pool, Arc::new(TelegramMessenger::new(telegram.clone()))).with_sessions(sessions.clone());
    let sweeper = tokio::spawn(run_sweeper(sessions, SWEEP_EVERY));

    let poller = match mode {
        RunMode::Webhook => {
            let url = config.webhook_url.as_deref().unwrap_or_default();
            telegram.set_webhook(url, config.webhook_secret.as_deref()).await?;
            None
        }
        RunMode::Polling => Some(tokio::spawn(polling::run_polling(
            bot.clone(),
            telegram.clone(),
            config.poll_timeout_secs,
        ))),
    };

    let state = Arc::new(AppState { bot, config, metrics_handle });
    let app = routes::router(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, mode = ?mode, "valour-bot starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(poller) = poller {
        poller.abort();
    }
    sweeper.abort();
    tracing::info!("valour-bot stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
