//! Catalogue of event types shipwatch subscribes to.

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Event types delivered by the keptn event bus.
///
/// The string form is the CloudEvents `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
pub enum EventType {
    /// A service configuration was changed.
    #[strum(serialize = "sh.keptn.event.configuration.change")]
    ConfigurationChange,
    /// A deployment finished.
    #[strum(serialize = "sh.keptn.events.deployment-finished")]
    DeploymentFinished,
    /// Tests against a deployment finished.
    #[strum(serialize = "sh.keptn.events.tests-finished")]
    TestsFinished,
    /// An evaluation was requested.
    #[strum(serialize = "sh.keptn.event.start-evaluation")]
    StartEvaluation,
    /// An evaluation completed.
    #[strum(serialize = "sh.keptn.events.evaluation-done")]
    EvaluationDone,
    /// A problem was opened.
    #[strum(serialize = "sh.keptn.event.problem.open")]
    ProblemOpen,
    /// A problem notification from a monitoring tool.
    #[strum(serialize = "sh.keptn.events.problem")]
    Problem,
    /// A remediation action was triggered.
    #[strum(serialize = "sh.keptn.event.action.triggered")]
    ActionTriggered,
    /// Monitoring should be configured for a service.
    #[strum(serialize = "sh.keptn.event.monitoring.configure")]
    ConfigureMonitoring,
}

impl EventType {
    /// Returns the CloudEvents `type` string.
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn round_trips_wire_names() {
        for event_type in EventType::iter() {
            let parsed = EventType::from_str(event_type.as_str()).unwrap();
            assert_eq!(parsed, event_type);
        }
    }

    #[test]
    fn wire_names_are_distinct() {
        let mut names: Vec<&str> = EventType::iter().map(EventType::as_str).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), EventType::iter().count());
    }

    #[test]
    fn parses_monitoring_configure() {
        assert_eq!(
            EventType::from_str("sh.keptn.event.monitoring.configure").unwrap(),
            EventType::ConfigureMonitoring
        );
        assert_eq!(
            EventType::ConfigureMonitoring.to_string(),
            "sh.keptn.event.monitoring.configure"
        );
        assert!(EventType::from_str("sh.keptn.event.monitoring.Configure").is_err());
    }
}
