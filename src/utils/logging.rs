use tracing::Level;
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt, Registry};

/// Installs the global subscriber. `LOG_LEVEL` applies to this library and to
/// `app_target`, the calling binary's crate name.
pub fn init_tracing(app_target: &str) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let tracing_layer = tracing_subscriber::fmt::layer();

    let _ = Registry::default()
        .with(tracing_layer)
        .with(log_filter(parse_level(&log_level), app_target))
        .try_init();
}

fn parse_level(raw: &str) -> Level {
    match raw.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

fn log_filter(level: Level, app_target: &str) -> filter::Targets {
    filter::Targets::new()
        .with_target("tower_http::trace::on_response", Level::TRACE)
        .with_target("tower_http::trace::on_request", Level::TRACE)
        .with_target("tower_http::trace::make_span", Level::DEBUG)
        .with_target("axum::rejection", Level::TRACE)
        .with_target(env!("CARGO_CRATE_NAME"), level)
        .with_target(app_target.to_string(), level)
        .with_default(Level::INFO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn level_applies_to_binary_target() {
        let targets = log_filter(Level::DEBUG, "populate_news");
        assert!(targets.would_enable("populate_news", &Level::DEBUG));
        assert!(targets.would_enable("fansite_api::utils::seed", &Level::DEBUG));
        assert!(!targets.would_enable("hyper", &Level::DEBUG));

        let quiet = log_filter(Level::WARN, "populate_news");
        assert!(!quiet.would_enable("populate_news", &Level::INFO));
    }
}
