use prometheus::register_counter_vec;
use prometheus::CounterVec;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUIZ_QUESTIONS_SERVED: CounterVec = register_counter_vec!(
        "quiz_questions_served_total",
        "Number of questions handed out by the quiz endpoint",
        &["category"]
    )
    .expect("quiz counter registered once");
}

/// Filter used when `LOG_LEVEL` is unset: request spans from `tower_http` at debug,
/// everything else at info.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

pub fn init_tracing() {
    let mut fmt_layer = fmt::layer();
    if std::env::var("INCLUDE_SPAN_EVENTS").is_ok_and(|value| value.eq_ignore_ascii_case("true")) {
        fmt_layer = fmt_layer.with_span_events(FmtSpan::ENTER | FmtSpan::EXIT);
    }
    let filter_layer = log_filter();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
