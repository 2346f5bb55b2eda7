//! CloudEvents envelope.

use jiff::Timestamp;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, ErrorKind, EventType, Result};

/// CloudEvents specification version emitted when none is supplied.
pub const CLOUDEVENTS_SPEC_VERSION: &str = "1.0";

/// An inbound event as delivered by the event bus.
///
/// Only the attributes shipwatch reads are modelled; the payload stays raw
/// JSON until a handler asks for its typed form with [`Event::payload`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// CloudEvents specification version.
    #[serde(rename = "specversion", default = "default_spec_version")]
    pub spec_version: String,

    /// Event identifier, used for log correlation.
    pub id: String,

    /// Producer of the event.
    #[serde(default)]
    pub source: String,

    /// Event type string, e.g. `sh.keptn.event.monitoring.configure`.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time the event was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Timestamp>,

    /// Content type of `data`. Older producers send `contenttype`.
    #[serde(
        rename = "datacontenttype",
        alias = "contenttype",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub data_content_type: Option<String>,

    /// Keptn context identifier shared by all events of one pipeline run.
    #[serde(rename = "shkeptncontext", default, skip_serializing_if = "Option::is_none")]
    pub keptn_context: Option<String>,

    /// Raw event payload.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

fn default_spec_version() -> String {
    CLOUDEVENTS_SPEC_VERSION.to_owned()
}

impl Event {
    /// Creates a new event with the given identifier, type and payload.
    pub fn new(id: impl Into<String>, event_type: impl Into<String>, data: Value) -> Self {
        Self {
            spec_version: default_spec_version(),
            id: id.into(),
            source: String::new(),
            event_type: event_type.into(),
            time: None,
            data_content_type: Some("application/json".to_owned()),
            keptn_context: None,
            data,
        }
    }

    /// Sets the event source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the keptn context identifier.
    pub fn with_keptn_context(mut self, context: impl Into<String>) -> Self {
        self.keptn_context = Some(context.into());
        self
    }

    /// Sets the event time.
    pub fn with_time(mut self, time: Timestamp) -> Self {
        self.time = Some(time);
        self
    }

    /// Returns the catalogued event type, if the type string is known.
    pub fn kind(&self) -> Option<EventType> {
        self.event_type.parse().ok()
    }

    /// Checks the attributes every handler relies on.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::invalid_input().with_message("event id is empty"));
        }

        if self.event_type.trim().is_empty() {
            return Err(Error::invalid_input().with_message("event type is empty"));
        }

        Ok(())
    }

    /// Decodes the payload into the typed form `T`.
    pub fn payload<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if self.data.is_null() {
            return Err(Error::invalid_input()
                .with_message(format!("event {} carries no data", self.id)));
        }

        T::deserialize(&self.data).map_err(|err| {
            Error::from_source(ErrorKind::InvalidInput, err).with_message(format!(
                "event {} has an invalid {} payload",
                self.id, self.event_type
            ))
        })
    }
}
