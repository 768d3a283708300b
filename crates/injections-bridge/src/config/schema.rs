use std::time::Duration;

use serde::Deserialize;

use injections_core::error::{InjectionError, Result};
use injections_core::protocol::Capability;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    pub version: u32,

    #[serde(default)]
    pub capabilities: CapabilityConfig,

    #[serde(default)]
    pub transport: TransportConfig,

    #[serde(default)]
    pub router: RouterConfig,
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(InjectionError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.transport.validate()?;

        Ok(())
    }
}

/// Which capabilities the host opts into for a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapabilityConfig {
    #[serde(default)]
    pub webln: bool,
    #[serde(default)]
    pub eruda: bool,
    #[serde(default)]
    pub nostr: bool,
    #[serde(default, alias = "fediInternal")]
    pub fedi_internal: bool,
}

impl CapabilityConfig {
    /// Everything on.
    pub fn all() -> Self {
        Self {
            webln: true,
            eruda: true,
            nostr: true,
            fedi_internal: true,
        }
    }

    pub fn is_enabled(&self, cap: Capability) -> bool {
        match cap {
            Capability::Webln => self.webln,
            Capability::Eruda => self.eruda,
            Capability::Nostr => self.nostr,
            Capability::FediInternal => self.fedi_internal,
        }
    }

    /// Enabled capabilities in install order.
    pub fn enabled(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ORDERED
            .into_iter()
            .filter(move |c| self.is_enabled(*c))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportConfig {
    /// Per-call deadline. Unset means a call waits for its response forever.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl TransportConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(ms) = self.request_timeout_ms {
            if !(1..=600000).contains(&ms) {
                return Err(InjectionError::Config(
                    "transport.request_timeout_ms must be between 1 and 600000".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Refuse to start when an enabled capability has unhandled message types.
    #[serde(default)]
    pub require_all_handlers: bool,
}
