//! Builder for a dispatcher wired with in-memory backends and simulated agents.

use crate::config::CallCenterConfig;
use crate::core::{
    AuditSink, DispatchError, Dispatcher, ServiceTimeProfile, SimulatedAgent, Spawn,
};
use crate::infra::{InMemoryCallQueue, InMemoryHistory};

/// Dispatcher produced from configuration.
pub type SimulatedDispatcher<S> =
    Dispatcher<InMemoryCallQueue, InMemoryHistory, SimulatedAgent<ServiceTimeProfile>, S>;

/// Build a dispatcher from configuration.
///
/// # Errors
///
/// `DispatchError::Validation` if the configuration is invalid.
pub fn build_dispatcher<S>(
    cfg: &CallCenterConfig,
    spawner: S,
) -> Result<SimulatedDispatcher<S>, DispatchError>
where
    S: Spawn + Clone + Send + 'static,
{
    DispatcherBuilder::new("call-center", cfg.clone()).build(spawner)
}

/// Named builder holding a validated-on-build configuration and optional audit sink.
pub struct DispatcherBuilder {
    name: String,
    config: CallCenterConfig,
    audit: Option<Box<dyn AuditSink>>,
}

impl DispatcherBuilder {
    /// Start a builder.
    pub fn new(name: impl Into<String>, config: CallCenterConfig) -> Self {
        Self {
            name: name.into(),
            config,
            audit: None,
        }
    }

    /// Builder name, used in logs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration that will be applied.
    #[must_use]
    pub const fn config(&self) -> &CallCenterConfig {
        &self.config
    }

    /// Attach an audit sink to the built dispatcher.
    #[must_use]
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// `DispatchError::Validation` if the configuration is invalid.
    pub fn build<S>(self, spawner: S) -> Result<SimulatedDispatcher<S>, DispatchError>
    where
        S: Spawn + Clone + Send + 'static,
    {
        self.config.validate().map_err(|e| {
            DispatchError::Validation(format!("dispatcher `{}` config invalid: {e}", self.name))
        })?;

        let agent = SimulatedAgent::new(self.config.service_time.profile());
        let dispatcher = Dispatcher::new(
            self.config.agent_capacity,
            InMemoryCallQueue::new(),
            InMemoryHistory::new(),
            agent,
            spawner,
        )?;
        tracing::info!(
            dispatcher = %self.name,
            agents = self.config.agent_capacity,
            "dispatcher built"
        );

        Ok(match self.audit {
            Some(audit) => dispatcher.with_audit(audit),
            None => dispatcher,
        })
    }
}
