//! Event dispatch table.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use shipwatch_event::payload::{
    ActionTriggeredData, ConfigurationChangeData, DeploymentFinishedData, EvaluationDoneData,
    ProblemData, StartEvaluationData, TestsFinishedData,
};
use shipwatch_event::{Event, EventType};
use strum::IntoEnumIterator;

use crate::{
    ConfigureMonitoringHandler, Error, EventHandler, MonitoringConfigurator, Result, StubHandler,
    TRACING_TARGET_DISPATCH,
};

/// Maps event types to handlers.
///
/// Each entry can be replaced independently with [`register`](Self::register).
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn EventHandler>>,
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("event_types", &self.event_types())
            .finish()
    }
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with a handler for every known event type.
    ///
    /// Configure-monitoring events go to `configurator`; all other types
    /// are acknowledged by a [`StubHandler`].
    pub fn with_defaults(configurator: MonitoringConfigurator) -> Self {
        let mut registry = Self::new();

        for event_type in EventType::iter() {
            match event_type {
                EventType::ConfigurationChange => registry.register(
                    event_type,
                    StubHandler::<ConfigurationChangeData>::new("configuration change"),
                ),
                EventType::DeploymentFinished => registry.register(
                    event_type,
                    StubHandler::<DeploymentFinishedData>::new("deployment finished"),
                ),
                EventType::TestsFinished => registry.register(
                    event_type,
                    StubHandler::<TestsFinishedData>::new("tests finished"),
                ),
                EventType::StartEvaluation => registry.register(
                    event_type,
                    StubHandler::<StartEvaluationData>::new("start evaluation"),
                ),
                EventType::EvaluationDone => registry.register(
                    event_type,
                    StubHandler::<EvaluationDoneData>::new("evaluation done"),
                ),
                EventType::ProblemOpen => registry.register(
                    event_type,
                    StubHandler::<ProblemData>::new("problem open"),
                ),
                EventType::Problem => {
                    registry.register(event_type, StubHandler::<ProblemData>::new("problem"))
                }
                EventType::ActionTriggered => registry.register(
                    event_type,
                    StubHandler::<ActionTriggeredData>::new("action triggered"),
                ),
                EventType::ConfigureMonitoring => registry.register(
                    event_type,
                    ConfigureMonitoringHandler::new(configurator.clone()),
                ),
            };
        }

        registry
    }

    /// Installs `handler` for `event_type`, returning the handler it replaces.
    pub fn register<H>(
        &mut self,
        event_type: impl AsRef<str>,
        handler: H,
    ) -> Option<Arc<dyn EventHandler>>
    where
        H: EventHandler + 'static,
    {
        self.register_arc(event_type, Arc::new(handler))
    }

    /// Installs an already shared handler for `event_type`.
    pub fn register_arc(
        &mut self,
        event_type: impl AsRef<str>,
        handler: Arc<dyn EventHandler>,
    ) -> Option<Arc<dyn EventHandler>> {
        self.handlers
            .insert(event_type.as_ref().to_owned(), handler)
    }

    /// Returns whether a handler is registered for `event_type`.
    pub fn contains(&self, event_type: &str) -> bool {
        self.handlers.contains_key(event_type)
    }

    /// Returns the registered event types, sorted.
    pub fn event_types(&self) -> Vec<&str> {
        let mut event_types: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        event_types.sort_unstable();
        event_types
    }

    /// Routes `event` to the handler registered for its type.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for events without id or type, an
    /// unhandled-event error for unknown types, and otherwise whatever the
    /// handler returns.
    pub async fn dispatch(&self, event: &Event) -> Result<()> {
        event.validate()?;

        let Some(handler) = self.handlers.get(&event.event_type) else {
            tracing::warn!(
                target: TRACING_TARGET_DISPATCH,
                event_id = %event.id,
                event_type = %event.event_type,
                "No handler registered for event type"
            );
            return Err(Error::unhandled_event()
                .with_message(format!("no handler for event type {}", event.event_type)));
        };

        let started_at = Instant::now();
        tracing::debug!(
            target: TRACING_TARGET_DISPATCH,
            event_id = %event.id,
            event_type = %event.event_type,
            "Dispatching event"
        );

        let result = handler.handle(event).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(()) => {
                tracing::debug!(
                    target: TRACING_TARGET_DISPATCH,
                    event_id = %event.id,
                    elapsed_ms = elapsed.as_millis(),
                    "Event handled"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_DISPATCH,
                    event_id = %event.id,
                    event_type = %event.event_type,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Event handling failed"
                );
            }
        }

        result
    }
}
