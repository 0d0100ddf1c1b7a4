use std::{fmt::Display, path::Path};

use regex::Regex;
use tracing::trace;

use crate::error::ScrapeError;

/// Directory (relative to the working directory) that downloads go into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationFolder(String);

impl DestinationFolder {
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl Display for DestinationFolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pulls the folder name out of a listing URL. The pattern must have a
/// capture group named `folder`; the first match wins.
#[derive(Debug)]
pub struct FolderPattern {
    pattern: Regex,
    describe: &'static str,
}

impl FolderPattern {
    pub fn new(pattern: &str, describe: &'static str) -> Self {
        let pattern = Regex::new(pattern).expect("Invalid folder regex");
        debug_assert!(
            pattern.capture_names().any(|x| x == Some("folder")),
            "Folder regex needs a `folder` group"
        );

        Self { pattern, describe }
    }

    pub fn resolve(&self, listing_url: &str) -> Result<DestinationFolder, ScrapeError> {
        let folder = self
            .pattern
            .captures(listing_url)
            .and_then(|x| x.name("folder"))
            .map(|x| x.as_str())
            .filter(|x| !x.is_empty())
            .ok_or_else(|| {
                ScrapeError::folder_resolution(listing_url, format!("expected {}", self.describe))
            })?;

        trace!(?folder, "Resolved destination folder");

        Ok(DestinationFolder::new(folder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins() {
        let pattern = FolderPattern::new(r"/(?<folder>\w+)/\.json", "a /<name>/.json segment");

        let folder = pattern
            .resolve("https://reddit.com/r/aww/.json?after=t3_x/y/.json")
            .unwrap();

        assert_eq!(folder.as_str(), "aww");
    }

    #[test]
    fn missing_segment_is_an_error() {
        let pattern = FolderPattern::new(r"/thread/(?<folder>\d+)/?$", "a /thread/<id> segment");

        let err = pattern
            .resolve("https://boards.4chan.org/r/catalog")
            .unwrap_err();

        assert!(matches!(err, ScrapeError::FolderResolution { .. }));
        assert!(err.to_string().contains("/thread/<id>"));
    }
}
