pub mod bot;
pub mod config;
pub mod conversation;
pub mod db;
pub mod input;
pub mod matching;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;
pub mod telegram;

pub struct AppState {
    pub bot: bot::Bot,
    pub config: config::AppConfig,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
