//! Jsonnet subprocess renderer.

use std::ffi::OsString;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;

use tokio::process::Command;

use super::{JsonnetConfig, TRACING_TARGET};
use crate::{
    DashboardDocument, DashboardRenderer, Error, ErrorKind, RenderRequest, RenderService, Result,
};

/// Renders dashboards by running the `jsonnet` executable.
///
/// The process is awaited to completion; no timeout is applied.
#[derive(Debug, Clone)]
pub struct JsonnetRenderer {
    config: Arc<JsonnetConfig>,
}

impl JsonnetRenderer {
    /// Creates a renderer with the given configuration.
    pub fn new(config: JsonnetConfig) -> Self {
        tracing::debug!(
            target: TRACING_TARGET,
            binary = %config.binary.display(),
            library_path = %config.library_path.display(),
            template = %config.template.display(),
            "Creating jsonnet renderer"
        );

        Self {
            config: Arc::new(config),
        }
    }

    /// Gets the renderer configuration.
    pub fn config(&self) -> &JsonnetConfig {
        &self.config
    }

    /// Converts this renderer into a [`RenderService`].
    pub fn into_service(self) -> RenderService {
        RenderService::new(self)
    }

    /// Returns the argument vector for `request`, excluding the executable.
    pub fn command_args(&self, request: &RenderRequest) -> Vec<OsString> {
        vec![
            "-J".into(),
            self.config.library_path.clone().into_os_string(),
            "--ext-code".into(),
            format!("stages={}", request.stages).into(),
            "--ext-str".into(),
            format!("service={}", request.service).into(),
            "--ext-str".into(),
            format!("project={}", request.project).into(),
            self.config.template.clone().into_os_string(),
        ]
    }
}

impl Default for JsonnetRenderer {
    fn default() -> Self {
        Self::new(JsonnetConfig::default())
    }
}

#[async_trait::async_trait]
impl DashboardRenderer for JsonnetRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<DashboardDocument> {
        let started_at = Instant::now();
        let binary = self.config.binary.display().to_string();

        let output = Command::new(&self.config.binary)
            .args(self.command_args(request))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|err| {
                Error::render()
                    .with_message(format!("failed to run {binary}: {err}"))
                    .with_source(err)
            })?;

        tracing::debug!(
            target: TRACING_TARGET,
            binary = %binary,
            status = %output.status,
            stdout_bytes = output.stdout.len(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Jsonnet finished"
        );

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::render().with_message(format!(
                "{binary} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8(output.stdout).map_err(|err| {
            Error::from_source(ErrorKind::Render, err)
                .with_message(format!("{binary} produced non UTF-8 output"))
        })?;

        DashboardDocument::from_slice(stdout.as_bytes()).map_err(|err| {
            let message = format!("{binary} produced malformed output: {err}");
            err.with_kind(ErrorKind::Render).with_message(message)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StageList;

    fn request() -> RenderRequest {
        let stages = StageList::new(["dev", "staging", "production"]).unwrap();
        RenderRequest::new(stages, "sockshop", "carts")
    }

    #[test]
    fn builds_jsonnet_arguments() {
        let renderer = JsonnetRenderer::new(
            JsonnetConfig::default().with_library_path("./grafonnet-lib-local/"),
        );

        let args = renderer.command_args(&request());
        let args: Vec<&str> = args.iter().filter_map(|arg| arg.to_str()).collect();

        assert_eq!(
            args,
            vec![
                "-J",
                "./grafonnet-lib-local/",
                "--ext-code",
                r#"stages=["dev", "staging", "production"]"#,
                "--ext-str",
                "service=carts",
                "--ext-str",
                "project=sockshop",
                "keptn.jsonnet",
            ]
        );
    }

    #[tokio::test]
    async fn missing_binary_is_a_render_error() {
        let renderer = JsonnetRenderer::new(
            JsonnetConfig::default().with_binary("/nonexistent/shipwatch-jsonnet"),
        );

        let error = renderer.render(&request()).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Render);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_a_render_error() {
        let renderer = JsonnetRenderer::new(JsonnetConfig::default().with_binary("false"));

        let error = renderer.render(&request()).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Render);
        assert!(error.to_string().contains("exited"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_json_output_is_a_render_error() {
        let renderer = JsonnetRenderer::new(JsonnetConfig::default().with_binary("echo"));

        let error = renderer.render(&request()).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Render);
        assert!(error.to_string().contains("malformed"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn parses_stdout_of_successful_run() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("jsonnet");
        std::fs::write(
            &script,
            "#!/bin/sh\nprintf '{\"title\":\"%s\",\"service\":\"%s\"}' \"$8\" \"$6\"\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let renderer = JsonnetRenderer::new(JsonnetConfig::default().with_binary(&script));
        let document = renderer.render(&request()).await.unwrap();

        assert_eq!(document.title(), Some("project=sockshop"));
        assert_eq!(
            document.as_map().get("service").and_then(|value| value.as_str()),
            Some("service=carts")
        );
    }
}
