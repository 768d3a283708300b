//! `window.fediInternal`: wallet and identity calls for first-party mini apps.

use std::sync::Arc;

use injections_core::error::Result;
use injections_core::protocol::payload::{
    ActiveFederation, AuthenticatedMember, EcashNotes, GenerateEcashArgs, ReceiveEcashResponse,
};
use injections_core::protocol::types::{
    FediGenerateEcash, FediGetActiveFederation, FediGetAuthenticatedMember, FediReceiveEcash,
};

use super::Requester;
use crate::transport::PageTransport;

pub struct FediInternalProvider {
    requester: Requester,
}

impl FediInternalProvider {
    pub fn new(transport: Arc<PageTransport>) -> Self {
        Self {
            requester: Requester::new(transport),
        }
    }

    pub async fn generate_ecash(&self, args: GenerateEcashArgs) -> Result<EcashNotes> {
        self.requester.request::<FediGenerateEcash>(args).await
    }

    pub async fn receive_ecash(&self, notes: impl Into<String>) -> Result<ReceiveEcashResponse> {
        self.requester.request::<FediReceiveEcash>(notes.into()).await
    }

    pub async fn get_authenticated_member(&self) -> Result<AuthenticatedMember> {
        self.requester
            .request::<FediGetAuthenticatedMember>(())
            .await
    }

    pub async fn get_active_federation(&self) -> Result<ActiveFederation> {
        self.requester.request::<FediGetActiveFederation>(()).await
    }
}
