//! Injection script composition (host side).
//!
//! Script bodies are bundled at build time. Composition is a pure function of
//! the capability flags.

use injections_core::protocol::{Capability, MESSAGE_EVENT_NAME};

use crate::config::CapabilityConfig;

pub const WEBLN_JS: &str = include_str!("../../assets/webln.js");
pub const ERUDA_JS: &str = include_str!("../../assets/eruda.js");
pub const NOSTR_JS: &str = include_str!("../../assets/nostr.js");
pub const FEDI_INTERNAL_JS: &str = include_str!("../../assets/fedi-internal.js");

/// Bundled script body for a capability.
pub fn script_for(cap: Capability) -> &'static str {
    match cap {
        Capability::Webln => WEBLN_JS,
        Capability::Eruda => ERUDA_JS,
        Capability::Nostr => NOSTR_JS,
        Capability::FediInternal => FEDI_INTERNAL_JS,
    }
}

/// Enabled scripts in install order (webln, eruda, nostr, fediInternal).
pub fn capability_scripts(caps: &CapabilityConfig) -> Vec<(Capability, &'static str)> {
    caps.enabled().map(|c| (c, script_for(c))).collect()
}

/// Script text to inject into the page. Empty when nothing is enabled.
pub fn generate_injection_js(caps: &CapabilityConfig) -> String {
    capability_scripts(caps)
        .into_iter()
        .map(|(_, body)| body)
        .collect::<Vec<_>>()
        .join("\n")
}

const DISPATCH_PREFIX: &str = "window.dispatchEvent(new CustomEvent(\"";
const DISPATCH_DETAIL: &str = "\", { detail: ";
const DISPATCH_SUFFIX: &str = " }));";

/// Host -> page delivery: dispatch `detail_json` as a `fedi:message` event.
///
/// U+2028/U+2029 are valid inside JSON strings but end a line in older JS
/// engines, so they are escaped.
pub fn dispatch_event_js(detail_json: &str) -> String {
    let detail = detail_json
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029");
    format!("{DISPATCH_PREFIX}{MESSAGE_EVENT_NAME}{DISPATCH_DETAIL}{detail}{DISPATCH_SUFFIX}")
}

/// Inverse of [`dispatch_event_js`]: the JSON detail, if `script` is one of ours.
pub fn parse_dispatched_detail(script: &str) -> Option<&str> {
    script
        .strip_prefix(DISPATCH_PREFIX)?
        .strip_prefix(MESSAGE_EVENT_NAME)?
        .strip_prefix(DISPATCH_DETAIL)?
        .strip_suffix(DISPATCH_SUFFIX)
}
