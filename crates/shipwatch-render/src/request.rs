//! Render request.

use crate::StageList;

/// Everything a dashboard template is parameterised with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub stages: StageList,
    pub project: String,
    pub service: String,
}

impl RenderRequest {
    /// Creates a new render request.
    pub fn new(stages: StageList, project: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            stages,
            project: project.into(),
            service: service.into(),
        }
    }
}
