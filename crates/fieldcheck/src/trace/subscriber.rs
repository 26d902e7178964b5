use crate::state::Env;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    layer::SubscriberExt,
};

/// Initializes the global tracing subscriber.
///
/// The `filter` directive defaults to `debug,fieldcheck=trace` in `development`
/// and `info` elsewhere. Output is pretty-printed in `development` and formatted
/// as JSON otherwise. Returns `false` if a global subscriber has already been set.
pub fn init_subscriber(env: &Env, filter: Option<&str>) -> bool {
    let in_dev_mode = env.is_dev();
    let env_filter = filter.unwrap_or(if in_dev_mode {
        "debug,fieldcheck=trace"
    } else {
        "info"
    });
    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(env_filter);
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(in_dev_mode)
        .with_line_number(in_dev_mode);
    let result = if in_dev_mode {
        let subscriber = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer.pretty());
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer.json().with_current_span(true));
        tracing::subscriber::set_global_default(subscriber)
    };
    if result.is_err() {
        tracing::warn!("the tracing subscriber has already been initialized");
        return false;
    }
    tracing::info!(app_env = env.as_str(), "tracing subscriber initialized");
    true
}
