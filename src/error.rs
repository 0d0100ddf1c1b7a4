use thiserror::Error;

use crate::engine::command::Command;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Could not determine a folder for url: {url} ({reason})")]
    FolderResolution { url: String, reason: String },

    #[error("Run declined by user")]
    UserDeclined,

    #[error("Command `{command}` failed with exit code {code:?}")]
    ExternalToolFailure { command: Command, code: Option<i32> },

    #[error("Failed to fetch listing {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse listing: {0}")]
    Listing(String),
}

impl ScrapeError {
    pub fn folder_resolution<U, R>(url: U, reason: R) -> Self
    where
        U: Into<String>,
        R: Into<String>,
    {
        Self::FolderResolution {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::UserDeclined => 2,
            Self::FolderResolution { .. }
            | Self::ExternalToolFailure { .. }
            | Self::Fetch { .. }
            | Self::Listing(_) => 1,
        }
    }
}

/// Exit code for any error bubbling out of a run.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ScrapeError>()
        .map_or(1, ScrapeError::exit_code)
}
