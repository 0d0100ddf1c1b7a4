pub mod command;
pub mod dedup;
pub mod folder;
pub mod rules;

use command::Command;
use dedup::DedupFilter;
use folder::DestinationFolder;
use rules::RuleSet;
use tracing::trace;

use crate::config::Config;

/// A URL pulled out of a listing, with the post title when the listing has
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    pub title: Option<String>,
}

impl Candidate {
    pub fn new<T: Into<String>>(url: T) -> Self {
        Self {
            url: url.into(),
            title: None,
        }
    }

    pub fn with_title<T: Into<String>, U: Into<String>>(url: T, title: U) -> Self {
        Self {
            url: url.into(),
            title: Some(title.into()),
        }
    }
}

/// Commands in first-seen order of their candidates.
pub type ScrapeResult = Vec<Command>;

/// Lazily classifies candidates into commands. Repeated URLs are skipped;
/// every other candidate yields exactly one command.
pub struct Scrape<'a, I> {
    rules: &'a RuleSet,
    config: &'a Config,
    folder: &'a DestinationFolder,
    candidates: I,
    dedup: DedupFilter,
}

impl<'a, I> Scrape<'a, I>
where
    I: Iterator<Item = Candidate>,
{
    pub fn new<C>(
        rules: &'a RuleSet,
        config: &'a Config,
        folder: &'a DestinationFolder,
        candidates: C,
    ) -> Self
    where
        C: IntoIterator<IntoIter = I>,
    {
        Self {
            rules,
            config,
            folder,
            candidates: candidates.into_iter(),
            dedup: DedupFilter::new(),
        }
    }
}

impl<I> Iterator for Scrape<'_, I>
where
    I: Iterator<Item = Candidate>,
{
    type Item = Command;

    fn next(&mut self) -> Option<Self::Item> {
        for candidate in self.candidates.by_ref() {
            if self.dedup.processed(&candidate.url) {
                trace!(url = ?candidate.url, "Skipping duplicate URL");
                continue;
            }

            return Some(self.rules.command_for(self.config, self.folder, &candidate));
        }

        None
    }
}

pub fn scrape<C>(
    rules: &RuleSet,
    config: &Config,
    folder: &DestinationFolder,
    candidates: C,
) -> ScrapeResult
where
    C: IntoIterator<Item = Candidate>,
{
    Scrape::new(rules, config, folder, candidates).collect()
}

#[cfg(test)]
mod tests;
