use std::fmt::Display;

use super::folder::DestinationFolder;
use crate::config::Config;

pub const OUTPUT_TEMPLATE: &str = "%(title)s-%(id)s.%(ext)s";

/// An executable name followed by its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    program: String,
    args: Vec<String>,
}

impl Command {
    pub fn new<P, A, S>(program: P, args: A) -> Self
    where
        P: Into<String>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// `<fetch-tool> <verbosity...> -U <agent> -P <folder> <url> [-O <folder>/<name>]`
    pub fn direct_fetch(
        config: &Config,
        verbosity: &[&str],
        folder: &DestinationFolder,
        url: &str,
        save_as: Option<&str>,
    ) -> Self {
        let mut args = verbosity
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        args.extend([
            "-U".to_string(),
            config.user_agent.clone(),
            "-P".to_string(),
            folder.to_string(),
            url.to_string(),
        ]);

        if let Some(name) = save_as {
            args.push("-O".to_string());
            args.push(format!("{folder}/{name}"));
        }

        Self::new(config.fetch_tool.as_str(), args)
    }

    /// `<extractor> -o <folder>/<template> --user-agent <agent> <url>`
    pub fn template_extraction(config: &Config, folder: &DestinationFolder, url: &str) -> Self {
        Self::new(
            config.extractor_tool.as_str(),
            [
                "-o".to_string(),
                format!("{folder}/{OUTPUT_TEMPLATE}"),
                "--user-agent".to_string(),
                config.user_agent.clone(),
                url.to_string(),
            ],
        )
    }

    pub fn echo<A, S>(message: A) -> Self
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("echo", message)
    }

    pub fn is_diagnostic(&self) -> bool {
        self.program == "echo"
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder() -> DestinationFolder {
        DestinationFolder::new("12345678")
    }

    #[test]
    fn direct_fetch_layout() {
        let config = Config::default();
        let cmd = Command::direct_fetch(
            &config,
            &["-nv"],
            &folder(),
            "https://i.4cdn.org/r/img.jpg",
            None,
        );

        assert_eq!(cmd.program(), "wget");
        assert_eq!(
            cmd.args(),
            [
                "-nv",
                "-U",
                config.user_agent.as_str(),
                "-P",
                "12345678",
                "https://i.4cdn.org/r/img.jpg",
            ]
        );
    }

    #[test]
    fn direct_fetch_with_rename() {
        let config = Config::default();
        let cmd = Command::direct_fetch(
            &config,
            &["-nv"],
            &folder(),
            "https://i.4cdn.org/r/img.jpg",
            Some("my cat.jpg"),
        );

        let tail = &cmd.args()[cmd.args().len() - 2..];
        assert_eq!(tail, ["-O", "12345678/my cat.jpg"]);
    }

    #[test]
    fn template_extraction_uses_configured_tool() {
        let config = Config {
            extractor_tool: "yt-dlp".to_string(),
            ..Config::default()
        };
        let cmd = Command::template_extraction(
            &config,
            &DestinationFolder::new("aww"),
            "https://v.redd.it/xyz",
        );

        assert_eq!(cmd.program(), "yt-dlp");
        assert_eq!(
            cmd.args(),
            [
                "-o",
                "aww/%(title)s-%(id)s.%(ext)s",
                "--user-agent",
                config.user_agent.as_str(),
                "https://v.redd.it/xyz",
            ]
        );
    }

    #[test]
    fn display_is_space_joined() {
        let cmd = Command::echo(["Got a funky URL:", "ftp://x"]);

        assert_eq!(cmd.to_string(), "echo Got a funky URL: ftp://x");
        assert!(cmd.is_diagnostic());
    }
}
