use std::env;

use tracing::trace;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; rv:91.0) Gecko/20100101 Firefox/91.0";
pub const DEFAULT_FETCH_TOOL: &str = "wget";
pub const DEFAULT_EXTRACTOR_TOOL: &str = "youtube-dl";

const ENV_EXTRACTOR: &str = "POSTGRAB_EXTRACTOR";
const ENV_USER_AGENT: &str = "POSTGRAB_USER_AGENT";
const ENV_SAVE_AS_TITLE: &str = "POSTGRAB_SAVE_AS_TITLE";

/// Settings shared by every command builder.
///
/// Builders never read the environment themselves; they get this value
/// passed in on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub user_agent: String,
    pub fetch_tool: String,
    pub extractor_tool: String,
    /// Name forum attachments after their posted title instead of the
    /// server-side file name.
    pub save_as_title: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_tool: DEFAULT_FETCH_TOOL.to_string(),
            extractor_tool: DEFAULT_EXTRACTOR_TOOL.to_string(),
            save_as_title: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();

        if let Some(tool) = non_empty(ENV_EXTRACTOR) {
            trace!(?tool, "Using extractor tool override");
            config.extractor_tool = tool;
        }

        if let Some(user_agent) = non_empty(ENV_USER_AGENT) {
            config.user_agent = user_agent;
        }

        if let Some(flag) = non_empty(ENV_SAVE_AS_TITLE) {
            config.save_as_title = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        config
    }
}
