// Handles all interactions with the `sc` service control command.

use super::model::{RawQueryResult, ServiceName};
use std::process::{Command, Output};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("service '{name}' is not installed")]
    NotFound { name: String },

    #[error("access denied while trying to {operation} (run as administrator)")]
    AccessDenied { operation: &'static str },

    #[error("sc {operation} exited with code {code:?}: {output}")]
    Command {
        operation: &'static str,
        code: Option<i32>,
        output: String,
    },

    #[error("failed to execute sc {operation}: {source}")]
    Spawn {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl ServiceError {
    /// Maps the output of a failed control command onto an error kind.
    fn from_output(operation: &'static str, name: &ServiceName, output: &Output) -> Self {
        let text = combined_text(output);
        if text.contains("1060") || text.contains("does not exist") {
            ServiceError::NotFound {
                name: name.to_string(),
            }
        } else if text.contains("FAILED 5:") || text.contains("Access is denied") {
            ServiceError::AccessDenied { operation }
        } else {
            ServiceError::Command {
                operation,
                code: output.status.code(),
                output: text.trim().to_string(),
            }
        }
    }
}

/// The service manager operations the toggle workflow needs.
#[cfg_attr(test, mockall::automock)]
pub trait ServiceControl {
    /// Runs the status and configuration queries. Only fails if `sc` cannot run at all.
    fn query(&self, name: &ServiceName) -> Result<RawQueryResult, ServiceError>;
    fn set_config_disabled(&self, name: &ServiceName) -> Result<(), ServiceError>;
    fn set_config_auto_start(&self, name: &ServiceName) -> Result<(), ServiceError>;
    fn start(&self, name: &ServiceName) -> Result<(), ServiceError>;
    fn stop(&self, name: &ServiceName) -> Result<(), ServiceError>;
}

/// `ServiceControl` backed by `sc.exe`.
#[derive(Debug, Clone, Default)]
pub struct ScCommand;

impl ScCommand {
    fn run(&self, operation: &'static str, args: &[&str]) -> Result<Output, ServiceError> {
        tracing::debug!("sc {}", args.join(" "));
        Command::new("sc")
            .args(args)
            .output()
            .map_err(|source| ServiceError::Spawn { operation, source })
    }

    fn control(
        &self,
        operation: &'static str,
        name: &ServiceName,
        args: &[&str],
    ) -> Result<(), ServiceError> {
        let output = self.run(operation, args)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ServiceError::from_output(operation, name, &output))
        }
    }
}

impl ServiceControl for ScCommand {
    fn query(&self, name: &ServiceName) -> Result<RawQueryResult, ServiceError> {
        // sc exits non-zero for a missing service; the text still carries the answer.
        let query = self.run("query", &["query", name.as_str()])?;
        let config = self.run("qc", &["qc", name.as_str()])?;

        Ok(RawQueryResult {
            query: String::from_utf8_lossy(&query.stdout).into_owned(),
            config: String::from_utf8_lossy(&config.stdout).into_owned(),
        })
    }

    fn set_config_disabled(&self, name: &ServiceName) -> Result<(), ServiceError> {
        self.control(
            "disable",
            name,
            &["config", name.as_str(), "start=", "disabled"],
        )
    }

    fn set_config_auto_start(&self, name: &ServiceName) -> Result<(), ServiceError> {
        self.control("enable", name, &["config", name.as_str(), "start=", "auto"])
    }

    fn start(&self, name: &ServiceName) -> Result<(), ServiceError> {
        self.control("start", name, &["start", name.as_str()])
    }

    fn stop(&self, name: &ServiceName) -> Result<(), ServiceError> {
        self.control("stop", name, &["stop", name.as_str()])
    }
}

fn combined_text(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        text.push('\n');
        text.push_str(&stderr);
    }
    text
}
