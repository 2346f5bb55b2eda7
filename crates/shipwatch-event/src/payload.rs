//! Typed event payloads.
//!
//! Field names follow the keptn 0.6 event specification. Unknown fields are
//! ignored and absent fields fall back to their defaults, so only the
//! attributes a handler relies on need to be present.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload of `sh.keptn.event.monitoring.configure`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigureMonitoringData {
    /// Monitoring provider, e.g. `prometheus`.
    #[serde(rename = "type")]
    pub provider: String,
    /// Project name.
    pub project: String,
    /// Service name.
    pub service: String,
}

/// Canary traffic instruction carried by configuration changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Canary {
    /// Canary action (`set`, `promote`, `discard`).
    pub action: String,
    /// Traffic percentage for `set`.
    pub value: i32,
}

/// Payload of `sh.keptn.event.configuration.change`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigurationChangeData {
    pub project: String,
    pub service: String,
    pub stage: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub values_canary: HashMap<String, Value>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub file_changes_user_chart: HashMap<String, String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub file_changes_generated_chart: HashMap<String, String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub file_changes_umbrella_chart: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canary: Option<Canary>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

/// Payload of `sh.keptn.events.deployment-finished`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeploymentFinishedData {
    pub project: String,
    pub stage: String,
    pub service: String,
    pub test_strategy: String,
    pub deployment_strategy: String,
    pub tag: String,
    pub image: String,
    #[serde(rename = "deploymentURILocal", skip_serializing_if = "Option::is_none")]
    pub deployment_uri_local: Option<String>,
    #[serde(rename = "deploymentURIPublic", skip_serializing_if = "Option::is_none")]
    pub deployment_uri_public: Option<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

/// Payload of `sh.keptn.events.tests-finished`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestsFinishedData {
    pub project: String,
    pub stage: String,
    pub service: String,
    pub test_strategy: String,
    pub deployment_strategy: String,
    pub start: String,
    pub end: String,
    pub result: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

/// Payload of `sh.keptn.event.start-evaluation`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StartEvaluationData {
    pub project: String,
    pub stage: String,
    pub service: String,
    pub test_strategy: String,
    pub deployment_strategy: String,
    pub start: String,
    pub end: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

/// Payload of `sh.keptn.events.evaluation-done`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvaluationDoneData {
    /// Evaluation details as produced by the quality gate; not interpreted.
    #[serde(rename = "evaluationdetails", skip_serializing_if = "Value::is_null")]
    pub evaluation_details: Value,
    pub result: String,
    pub project: String,
    pub stage: String,
    pub service: String,
    pub test_strategy: String,
    pub deployment_strategy: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

/// Payload of `sh.keptn.event.problem.open` and `sh.keptn.events.problem`.
///
/// Problem notifications use capitalised keys for the problem attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemData {
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "ProblemID")]
    pub problem_id: String,
    #[serde(rename = "ProblemTitle")]
    pub problem_title: String,
    #[serde(rename = "ProblemDetails", skip_serializing_if = "Value::is_null")]
    pub problem_details: Value,
    #[serde(rename = "PID")]
    pub pid: String,
    #[serde(rename = "ImpactedEntity")]
    pub impacted_entity: String,
    #[serde(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "ProblemURL")]
    pub problem_url: String,
    pub project: String,
    pub stage: String,
    pub service: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

/// Remediation action descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionInfo {
    pub name: String,
    pub action: String,
    pub description: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub value: Value,
}

/// Problem summary attached to a triggered action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemDetails {
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "ProblemID")]
    pub problem_id: String,
    #[serde(rename = "ProblemTitle")]
    pub problem_title: String,
    #[serde(rename = "ProblemDetails", skip_serializing_if = "Value::is_null")]
    pub problem_details: Value,
    #[serde(rename = "PID")]
    pub pid: String,
    #[serde(rename = "ProblemURL")]
    pub problem_url: String,
    #[serde(rename = "ImpactedEntity")]
    pub impacted_entity: String,
    #[serde(rename = "Tags")]
    pub tags: String,
}

/// Payload of `sh.keptn.event.action.triggered`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionTriggeredData {
    pub project: String,
    pub service: String,
    pub stage: String,
    pub action: ActionInfo,
    pub problem: ProblemDetails,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}
