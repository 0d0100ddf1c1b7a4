use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command as ProcessCommand;
use tracing::trace;

use super::{ExitReport, Executor};
use crate::engine::command::Command;

/// Runs commands as child processes sharing our stdout and stderr.
#[derive(Debug, Default)]
pub struct ProcessExecutor;

#[async_trait::async_trait]
impl Executor for ProcessExecutor {
    #[tracing::instrument(skip_all, fields(program = command.program()))]
    async fn execute(&self, command: &Command) -> anyhow::Result<ExitReport> {
        trace!(args = ?command.args(), "Spawning");

        let status = ProcessCommand::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .with_context(|| format!("Failed to start `{}`", command.program()))?;

        trace!(?status, "Process exited");

        Ok(ExitReport {
            code: status.code(),
        })
    }
}
