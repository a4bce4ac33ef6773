use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// JSON lines only when `VALOUR_ENV` is `production`.
    pub fn for_env(valour_env: Option<&str>) -> Self {
        match valour_env {
            Some("production") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Filter used when `RUST_LOG` is unset: the service's own crate at debug.
pub fn default_filter(service_name: &str) -> String {
    format!("info,{}=debug,tower_http=debug", service_name.replace('-', "_"))
}

pub fn init_tracing(service_name: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(service_name)));
    let format = LogFormat::for_env(std::env::var("VALOUR_ENV").ok().as_deref());

    let pretty = (format == LogFormat::Pretty).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
    });
    let json = (format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty)
        .with(json)
        .init();

    tracing::info!(service = service_name, ?format, "tracing initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_only_in_production() {
        assert_eq!(LogFormat::for_env(Some("production")), LogFormat::Json);
        assert_eq!(LogFormat::for_env(Some("staging")), LogFormat::Pretty);
        assert_eq!(LogFormat::for_env(None), LogFormat::Pretty);
    }

    #[test]
    fn default_filter_targets_the_crate() {
        assert_eq!(default_filter("valour-bot"), "info,valour_bot=debug,tower_http=debug");
    }
}
