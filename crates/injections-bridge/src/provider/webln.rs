//! `window.webln`.
//!
//! Disabled until a `webln_enable` round trip succeeds, then enabled for the
//! rest of the page's life. Every other method is refused locally, with no I/O,
//! while disabled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use injections_core::error::{InjectionError, Result};
use injections_core::protocol::payload::{
    GetInfoResponse, KeysendArgs, MakeInvoiceArgs, RequestInvoiceResponse, SendPaymentResponse,
    SignMessageResponse, VerifyMessageArgs,
};
use injections_core::protocol::types::{
    WeblnEnable, WeblnGetInfo, WeblnKeysend, WeblnMakeInvoice, WeblnSendPayment,
    WeblnSignMessage, WeblnVerifyMessage,
};

use super::Requester;
use crate::transport::PageTransport;

pub struct WeblnProvider {
    requester: Requester,
    enabled: AtomicBool,
}

impl WeblnProvider {
    pub fn new(transport: Arc<PageTransport>) -> Self {
        Self {
            requester: Requester::new(transport),
            enabled: AtomicBool::new(false),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// No-op once enabled. A failed enable leaves the provider disabled.
    pub async fn enable(&self) -> Result<()> {
        if self.is_enabled() {
            return Ok(());
        }
        self.requester.request::<WeblnEnable>(()).await?;
        self.enabled.store(true, Ordering::Release);
        tracing::debug!("webln enabled");
        Ok(())
    }

    pub async fn get_info(&self) -> Result<GetInfoResponse> {
        self.ensure_enabled()?;
        self.requester.request::<WeblnGetInfo>(()).await
    }

    pub async fn send_payment(&self, payment_request: impl Into<String>) -> Result<SendPaymentResponse> {
        self.ensure_enabled()?;
        self.requester
            .request::<WeblnSendPayment>(payment_request.into())
            .await
    }

    pub async fn keysend(&self, args: KeysendArgs) -> Result<SendPaymentResponse> {
        self.ensure_enabled()?;
        self.requester.request::<WeblnKeysend>(args).await
    }

    pub async fn make_invoice(&self, args: impl Into<MakeInvoiceArgs>) -> Result<RequestInvoiceResponse> {
        self.ensure_enabled()?;
        self.requester.request::<WeblnMakeInvoice>(args.into()).await
    }

    pub async fn sign_message(&self, message: impl Into<String>) -> Result<SignMessageResponse> {
        self.ensure_enabled()?;
        self.requester
            .request::<WeblnSignMessage>(message.into())
            .await
    }

    pub async fn verify_message(
        &self,
        signature: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<()> {
        self.ensure_enabled()?;
        let args = VerifyMessageArgs {
            signature: signature.into(),
            message: message.into(),
        };
        self.requester.request::<WeblnVerifyMessage>(args).await
    }

    fn ensure_enabled(&self) -> Result<()> {
        if self.is_enabled() {
            Ok(())
        } else {
            Err(InjectionError::NotEnabled)
        }
    }
}
