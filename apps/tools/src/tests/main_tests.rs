use super::*;
use tracing_subscriber::filter::LevelFilter;

#[test]
fn rust_log_directives_are_honoured() {
    let filter = log_filter(Some("debug".to_string()));
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
}

#[test]
fn missing_rust_log_falls_back_to_warn() {
    assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::WARN));
}

#[test]
fn unparseable_rust_log_falls_back_to_warn() {
    let filter = log_filter(Some("catalog=notalevel".to_string()));
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
}
