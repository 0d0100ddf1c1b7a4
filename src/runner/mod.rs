mod process;

use std::io::{self, BufRead, Write};

pub use process::ProcessExecutor;
use tracing::{debug, info, trace, warn};

use crate::{
    engine::{command::Command, ScrapeResult},
    error::ScrapeError,
};

/// How an external command finished. `code` is `None` when the process was
/// killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitReport {
    pub code: Option<i32>,
}

impl ExitReport {
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

#[async_trait::async_trait]
pub trait Executor: std::fmt::Debug + Send + Sync {
    async fn execute(&self, command: &Command) -> anyhow::Result<ExitReport>;
}

/// Shows the batch, asks `confirm` once and then runs every command in
/// order. The first failing command ends the run.
///
/// Returns how many commands were executed.
#[tracing::instrument(skip_all, fields(commands = commands.len()))]
pub async fn run_batch<E, C, W>(
    commands: &ScrapeResult,
    confirm: C,
    executor: &E,
    out: &mut W,
) -> anyhow::Result<usize>
where
    E: Executor + ?Sized,
    C: FnOnce(&ScrapeResult) -> bool,
    W: Write + Send,
{
    if commands.is_empty() {
        info!("Listing produced no commands");
        writeln!(out, "Nothing to download.")?;
        return Ok(0);
    }

    let diagnostics = commands.iter().filter(|x| x.is_diagnostic()).count();
    if diagnostics > 0 {
        warn!(diagnostics, "Some URLs were not recognised");
    }

    writeln!(out, "I will run these ({}) commands:", commands.len())?;
    for command in commands {
        writeln!(out, "$ {command}")?;
    }
    out.flush()?;

    if !confirm(commands) {
        info!("Run declined");
        return Err(ScrapeError::UserDeclined.into());
    }

    for (i, command) in commands.iter().enumerate() {
        writeln!(out, "$ {command}")?;
        out.flush()?;

        let report = executor.execute(command).await?;
        trace!(?report, "Command finished");

        if !report.success() {
            warn!(%command, code = ?report.code, remaining = commands.len() - i - 1, "Command failed, stopping");
            return Err(ScrapeError::ExternalToolFailure {
                command: command.clone(),
                code: report.code,
            }
            .into());
        }
    }

    debug!("All commands finished");

    Ok(commands.len())
}

/// Asks on stdout and reads one line from stdin. Anything starting with
/// `n` declines; end of input declines too.
pub fn console_confirm(_: &ScrapeResult) -> bool {
    let stdin = io::stdin();
    confirm_from(&mut stdin.lock(), &mut io::stdout())
}

fn confirm_from<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> bool {
    if write!(out, "Continue? ").and_then(|()| out.flush()).is_err() {
        return false;
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) | Err(_) => false,
        Ok(_) => !answer.trim_start().to_ascii_lowercase().starts_with('n'),
    }
}
