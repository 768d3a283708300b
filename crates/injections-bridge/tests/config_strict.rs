#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use injections_bridge::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
capabilities:
  webln: true
  weblm: true # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.capabilities, config::CapabilityConfig::default());
    assert!(cfg.transport.request_timeout().is_none());
    assert!(!cfg.router.require_all_handlers);
}

#[test]
fn accepts_camel_case_fedi_internal() {
    let ok = r#"
version: 1
capabilities:
  fediInternal: true
  nostr: true
transport:
  request_timeout_ms: 1500
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert!(cfg.capabilities.fedi_internal);
    assert!(cfg.capabilities.nostr);
    assert!(!cfg.capabilities.webln);
    assert_eq!(cfg.transport.request_timeout(), Some(Duration::from_millis(1500)));
}

#[test]
fn rejects_out_of_range_timeout() {
    let bad = r#"
version: 1
transport:
  request_timeout_ms: 0
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("request_timeout_ms"));
}

#[test]
fn rejects_unknown_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}

#[test]
fn missing_file_is_a_config_error() {
    let err = config::load_from_file("does/not/exist.yaml").expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}
