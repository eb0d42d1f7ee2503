use crate::cli::conf::config_error_hint;
use crate::conf::{AdapterConfig, ConfigError};
use std::str::FromStr;

fn hint_for(doc: &str) -> Option<&'static str> {
    let err = AdapterConfig::from_str(doc).unwrap_err();
    config_error_hint(&err)
}

#[test]
fn base_url_errors_show_an_example() {
    let hint = hint_for("[endpoint]\nbase_url = \"ftp://osmo\"\n").unwrap();
    assert!(hint.contains("[endpoint]"));
    assert!(hint.contains("base_url"));
}

#[test]
fn zero_limits_point_at_their_section() {
    assert!(hint_for("[stream]\nmax_entries = 0\n").unwrap().contains("[stream]"));
    assert!(
        hint_for("[histogram]\nmin_interval_secs = 0\n")
            .unwrap()
            .contains("[histogram]")
    );
}

#[test]
fn parse_errors_have_no_hint() {
    let err = AdapterConfig::from_str("[stream\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(config_error_hint(&err), None);
}
