//! Tokio runtime spawner implementation.

use std::future::Future;
use std::sync::Arc;

use crate::core::Spawn;

/// Runtime owned by a spawner.
///
/// Shuts down in the background on drop, so the last spawner clone may be
/// dropped from inside async code without blocking.
struct OwnedRuntime(Option<tokio::runtime::Runtime>);

impl Drop for OwnedRuntime {
    fn drop(&mut self) {
        if let Some(runtime) = self.0.take() {
            runtime.shutdown_background();
        }
    }
}

/// Tokio-based spawner that runs handling units on a tokio runtime.
#[derive(Clone)]
pub struct TokioSpawner {
    handle: tokio::runtime::Handle,
    /// Keeps an owned runtime alive for as long as any clone exists.
    _runtime: Option<Arc<OwnedRuntime>>,
}

impl TokioSpawner {
    /// Create a new `TokioSpawner` from a tokio runtime handle.
    #[must_use]
    pub const fn new(handle: tokio::runtime::Handle) -> Self {
        Self {
            handle,
            _runtime: None,
        }
    }

    /// Spawner for the runtime the caller is running on.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn current() -> Self {
        Self::new(tokio::runtime::Handle::current())
    }

    /// Create a `TokioSpawner` owning a new multi-threaded runtime with the
    /// given number of worker threads.
    ///
    /// Dropping the last clone stops the runtime without waiting for
    /// in-flight handling units.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the runtime cannot be built.
    pub fn with_worker_threads(worker_threads: usize) -> Result<Self, std::io::Error> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(worker_threads.max(1))
            .thread_name("call-handler")
            .enable_all()
            .build()?;
        Ok(Self {
            handle: runtime.handle().clone(),
            _runtime: Some(Arc::new(OwnedRuntime(Some(runtime)))),
        })
    }

    /// Owned runtime sized to the number of CPUs.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the runtime cannot be built.
    pub fn with_default_threads() -> Result<Self, std::io::Error> {
        Self::with_worker_threads(num_cpus::get())
    }
}

impl Spawn for TokioSpawner {
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handle.spawn(fut);
    }
}
