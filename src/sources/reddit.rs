use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::trace;
use url::Url;

use super::Source;
use crate::{
    config::Config,
    engine::{
        command::Command,
        folder::{DestinationFolder, FolderPattern},
        rules::{Matcher, PatternRule, RuleSet},
        Candidate,
    },
    error::ScrapeError,
    helpers::domain::DomainParser,
};

const VERBOSITY: &[&str] = &["-Nv", "-nv"];

static FOLDER: Lazy<FolderPattern> =
    Lazy::new(|| FolderPattern::new(r"/(?<folder>\w+)/\.json", "a /<name>/.json segment"));

static RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        vec![
            PatternRule::new("i.redd.it", Matcher::full(r"https?://i\.redd\.it/.*"), fetch),
            PatternRule::new("v.redd.it", Matcher::full(r"https?://v\.redd\.it/.*"), extract),
            PatternRule::new(
                "i.imgur.com",
                Matcher::full(r"https?://i\.imgur\.com/.*\..{3}"),
                fetch,
            ),
            PatternRule::new(
                "i.imgur.com gifv",
                Matcher::full(r"https?://i\.imgur\.com/.+\.gifv"),
                fetch_gifv_as_mp4,
            ),
            PatternRule::new(
                "redgifs.com",
                Matcher::full(r"https?://redgifs\.com/watch/.+"),
                extract,
            ),
            PatternRule::new("gfycat.com", Matcher::full(r"https?://gfycat\.com/.+"), extract),
        ],
        unknown_handler,
    )
});

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    #[serde(default)]
    url: String,
    title: Option<String>,
}

#[derive(Debug)]
pub struct RedditSource;

impl Source for RedditSource {
    fn name(&self) -> &'static str {
        "reddit"
    }

    fn supports(&self, listing_url: &Url) -> bool {
        DomainParser::has_root(listing_url, &["reddit.com"])
    }

    fn resolve_folder(&self, listing_url: &str) -> Result<DestinationFolder, ScrapeError> {
        FOLDER.resolve(listing_url)
    }

    fn rules(&self) -> &RuleSet {
        &RULES
    }

    fn candidates(&self, listing: &str) -> Result<Vec<Candidate>, ScrapeError> {
        let listing = serde_json::from_str::<Listing>(listing)
            .map_err(|e| ScrapeError::Listing(format!("unexpected reddit JSON: {e}")))?;

        trace!(posts = listing.data.children.len(), "Parsed reddit listing");

        Ok(listing
            .data
            .children
            .into_iter()
            .map(|child| match child.data.title {
                Some(title) => Candidate::with_title(child.data.url, title),
                None => Candidate::new(child.data.url),
            })
            .collect())
    }
}

/// `https://i.imgur.com/abc.gifv` -> `https://i.imgur.com/abc.mp4`
pub fn gifv_to_mp4(url: &str) -> String {
    url.strip_suffix("gifv")
        .map_or_else(|| url.to_string(), |x| format!("{x}mp4"))
}

fn fetch(config: &Config, folder: &DestinationFolder, url: &str, _: Option<&str>) -> Command {
    Command::direct_fetch(config, VERBOSITY, folder, url, None)
}

fn fetch_gifv_as_mp4(
    config: &Config,
    folder: &DestinationFolder,
    url: &str,
    _: Option<&str>,
) -> Command {
    Command::direct_fetch(config, VERBOSITY, folder, &gifv_to_mp4(url), None)
}

fn extract(config: &Config, folder: &DestinationFolder, url: &str, _: Option<&str>) -> Command {
    Command::template_extraction(config, folder, url)
}

fn unknown_handler(url: &str) -> Command {
    Command::echo([format!("Unknown handler for \"{url}\"")])
}
