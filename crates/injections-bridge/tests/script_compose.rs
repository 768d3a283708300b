#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use injections_bridge::config::CapabilityConfig;
use injections_bridge::script::{
    capability_scripts, generate_injection_js, ERUDA_JS, FEDI_INTERNAL_JS, NOSTR_JS, WEBLN_JS,
};
use injections_core::protocol::Capability;

#[test]
fn nothing_enabled_is_empty() {
    assert_eq!(generate_injection_js(&CapabilityConfig::default()), "");
}

#[test]
fn webln_only_is_exactly_the_webln_body() {
    let caps = CapabilityConfig {
        webln: true,
        ..Default::default()
    };
    assert_eq!(generate_injection_js(&caps), WEBLN_JS);
}

#[test]
fn all_flags_concatenate_in_fixed_order() {
    let js = generate_injection_js(&CapabilityConfig::all());
    let expected = [WEBLN_JS, ERUDA_JS, NOSTR_JS, FEDI_INTERNAL_JS].join("\n");
    assert_eq!(js, expected);

    let order: Vec<Capability> = capability_scripts(&CapabilityConfig::all())
        .into_iter()
        .map(|(c, _)| c)
        .collect();
    assert_eq!(order, Capability::ORDERED.to_vec());
}

#[test]
fn order_ignores_flag_combination() {
    let caps = CapabilityConfig {
        fedi_internal: true,
        webln: true,
        ..Default::default()
    };
    assert_eq!(
        generate_injection_js(&caps),
        format!("{WEBLN_JS}\n{FEDI_INTERNAL_JS}")
    );
    // Pure: same input, same output.
    assert_eq!(generate_injection_js(&caps), generate_injection_js(&caps));
}

#[test]
fn bodies_install_their_globals() {
    assert!(WEBLN_JS.contains("window.webln ="));
    assert!(NOSTR_JS.contains("window.nostr ="));
    assert!(FEDI_INTERNAL_JS.contains("window.fediInternal ="));
    assert!(ERUDA_JS.contains("eruda.init()"));
    for body in [WEBLN_JS, NOSTR_JS, FEDI_INTERNAL_JS] {
        assert!(body.contains("'fedi:message'"));
    }
}

#[test]
fn bodies_settle_string_details_and_malformed_errors() {
    for body in [WEBLN_JS, NOSTR_JS, FEDI_INTERNAL_JS] {
        assert!(body.contains("typeof msg === 'string'"));
        assert!(body.contains("JSON.parse(msg)"));
        assert!(body.contains("msg.error != null"));
        assert!(body.contains("'An unknown error occurred'"));
    }
}
