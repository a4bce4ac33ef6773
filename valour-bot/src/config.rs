use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Polling,
    Webhook,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub telegram_token: String,
    #[serde(default = "default_api_url")]
    pub telegram_api_url: String,
    #[serde(default = "default_db")]
    pub database_url: String,
    #[serde(default = "default_pool_size")]
    pub db_pool_size: u32,
    #[serde(default = "default_mode")]
    pub mode: RunMode,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL Telegram posts to; required in webhook mode.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Expected `X-Telegram-Bot-Api-Secret-Token` value.
    #[serde(default)]
    pub webhook_secret: Option<String>,
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
    /// Unfinished registrations, edits and browses are dropped after this long.
    #[serde(default = "default_session_idle")]
    pub session_idle_secs: u64,
}

fn default_api_url() -> String { "https://api.telegram.org".into() }
fn default_db() -> String { "valourmatch.db".into() }
fn default_pool_size() -> u32 { 4 }
fn default_mode() -> RunMode { RunMode::Polling }
fn default_port() -> u16 { 3010 }
fn default_poll_timeout() -> u64 { 30 }
fn default_session_idle() -> u64 { 1800 }

impl AppConfig {
    /// Read `VALOUR_BOT__*` variables, after loading `.env` if present.
    pub fn load() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("VALOUR_BOT").separator("__"))
            .build()?;
        Self::from_config(config)
    }

    pub fn from_config(config: config::Config) -> anyhow::Result<Self> {
        let app: AppConfig = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.telegram_token.trim().is_empty() {
            anyhow::bail!("VALOUR_BOT__TELEGRAM_TOKEN must be set");
        }
        if self.db_pool_size == 0 {
            anyhow::bail!("db_pool_size must be at least 1");
        }
        if self.session_idle_secs == 0 {
            anyhow::bail!("session_idle_secs must be at least 1");
        }
        if self.mode == RunMode::Webhook && self.webhook_url.as_deref().map_or(true, str::is_empty) {
            anyhow::bail!("webhook mode needs VALOUR_BOT__WEBHOOK_URL");
        }
        Ok(())
    }
}
