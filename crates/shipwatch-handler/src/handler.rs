//! Event handlers.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use shipwatch_event::{ConfigureMonitoringData, Event, MonitoringConfigRequest};

use crate::{MonitoringConfigurator, Result, TRACING_TARGET_STUB};

/// Handles one kind of event.
///
/// Implement this trait to attach behaviour to an event type in the
/// [`HandlerRegistry`](crate::HandlerRegistry).
#[async_trait::async_trait]
pub trait EventHandler: Send + Sync {
    /// Handles `event`.
    async fn handle(&self, event: &Event) -> Result<()>;
}

/// Acknowledges an event without acting on it.
///
/// The payload is decoded as `T` so malformed events are still rejected;
/// a well-formed event produces a single info log line.
pub struct StubHandler<T> {
    name: &'static str,
    payload: PhantomData<fn() -> T>,
}

impl<T> StubHandler<T> {
    /// Creates a stub that logs events under `name`.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            payload: PhantomData,
        }
    }

    /// Returns the name used in log lines.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> fmt::Debug for StubHandler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StubHandler")
            .field("name", &self.name)
            .finish()
    }
}

#[async_trait::async_trait]
impl<T> EventHandler for StubHandler<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn handle(&self, event: &Event) -> Result<()> {
        let _payload: T = event.payload()?;

        tracing::info!(
            target: TRACING_TARGET_STUB,
            event_id = %event.id,
            "Handling {} event",
            self.name
        );

        Ok(())
    }
}

/// Drives [`MonitoringConfigurator`] from configure-monitoring events.
#[derive(Debug, Clone)]
pub struct ConfigureMonitoringHandler {
    configurator: MonitoringConfigurator,
}

impl ConfigureMonitoringHandler {
    /// Creates a new handler.
    pub fn new(configurator: MonitoringConfigurator) -> Self {
        Self { configurator }
    }
}

#[async_trait::async_trait]
impl EventHandler for ConfigureMonitoringHandler {
    async fn handle(&self, event: &Event) -> Result<()> {
        let data: ConfigureMonitoringData = event.payload()?;
        let request = MonitoringConfigRequest::from(data);

        self.configurator.configure(&event.id, &request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shipwatch_event::EventType;
    use shipwatch_event::payload::DeploymentFinishedData;

    use super::*;
    use crate::ErrorKind;

    #[tokio::test]
    async fn stub_rejects_malformed_payload() {
        let handler = StubHandler::<DeploymentFinishedData>::new("deployment finished");
        let event = Event::new(
            "event-1",
            EventType::DeploymentFinished.as_str(),
            json!({ "project": 42 }),
        );

        let error = handler.handle(&event).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidInput);
    }
}
