use std::fmt::Display;
use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::Value;

use injections_core::protocol::InjectionMessage;

/// Type-erased host handler for one message type.
///
/// `Err` carries the message that goes into the error envelope.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, data: Value) -> std::result::Result<Value, String>;
}

/// Adapts a typed async closure for `M` to [`MessageHandler`].
pub struct TypedHandler<M, F> {
    f: F,
    _msg: PhantomData<fn() -> M>,
}

impl<M, F> TypedHandler<M, F> {
    pub fn new(f: F) -> Self {
        Self {
            f,
            _msg: PhantomData,
        }
    }
}

#[async_trait]
impl<M, F, Fut, E> MessageHandler for TypedHandler<M, F>
where
    M: InjectionMessage,
    F: Fn(M::Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<M::Response, E>> + Send + 'static,
    E: Display + Send + 'static,
{
    async fn handle(&self, data: Value) -> std::result::Result<Value, String> {
        let req: M::Request = serde_json::from_value(data)
            .map_err(|e| format!("invalid data for {}: {e}", M::TYPE))?;

        let resp = (self.f)(req).await.map_err(|e| e.to_string())?;

        serde_json::to_value(resp)
            .map_err(|e| format!("failed to encode {} response: {e}", M::TYPE))
    }
}
