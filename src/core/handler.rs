//! Call handling abstraction: the work an agent performs on one admitted call.

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{CallRecord, ServiceTime};

/// Services one admitted call.
///
/// The dispatcher runs `handle` inside a spawned handling unit without holding
/// any lock, then performs the completion bookkeeping itself. The handler gets
/// a read-only copy of the record; the authoritative record stays in the
/// dispatcher's in-service set.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use call_dispatch::core::{CallHandler, CallRecord};
///
/// #[derive(Clone)]
/// struct TranscribingAgent;
///
/// #[async_trait]
/// impl CallHandler for TranscribingAgent {
///     async fn handle(&self, call: CallRecord) {
///         tracing::info!("talking to {}", call.customer());
///     }
/// }
/// ```
#[async_trait]
pub trait CallHandler: Send + Sync + Clone + 'static {
    /// Service the call. Returning ends the service.
    async fn handle(&self, call: CallRecord);
}

/// Agent that sleeps for the provider's service time.
pub struct SimulatedAgent<T> {
    service_time: Arc<T>,
}

impl<T: ServiceTime> SimulatedAgent<T> {
    /// Create an agent driven by `service_time`.
    pub fn new(service_time: T) -> Self {
        Self {
            service_time: Arc::new(service_time),
        }
    }

    /// The underlying provider.
    #[must_use]
    pub fn service_time(&self) -> &T {
        &self.service_time
    }
}

impl<T> Clone for SimulatedAgent<T> {
    fn clone(&self) -> Self {
        Self {
            service_time: Arc::clone(&self.service_time),
        }
    }
}

#[cfg(feature = "tokio-runtime")]
#[async_trait]
impl<T: ServiceTime> CallHandler for SimulatedAgent<T> {
    async fn handle(&self, call: CallRecord) {
        let duration = self.service_time.service_time(&call);
        tracing::debug!(
            call_id = call.id(),
            customer = call.customer(),
            "servicing call for {:?}",
            duration
        );
        tokio::time::sleep(duration).await;
    }
}
