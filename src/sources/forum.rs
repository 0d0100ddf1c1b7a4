use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
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

const VERBOSITY: &[&str] = &["-nv"];

static FOLDER: Lazy<FolderPattern> =
    Lazy::new(|| FolderPattern::new(r"/thread/(?<folder>\d+)/?$", "a /thread/<id> segment"));

static RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        vec![PatternRule::new(
            "attachment",
            Matcher::scheme_prefix(r"https?://"),
            fetch_attachment,
        )],
        funky_url,
    )
});

static FILE_TEXT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".file .fileText").expect("Invalid selector"));
static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("Invalid selector"));
static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[<>:/\\|?*\x00]").expect("Invalid regex"));

#[derive(Debug)]
pub struct ForumSource;

impl Source for ForumSource {
    fn name(&self) -> &'static str {
        "forum"
    }

    fn supports(&self, listing_url: &Url) -> bool {
        DomainParser::has_root(listing_url, &["4chan.org", "4channel.org"])
    }

    fn resolve_folder(&self, listing_url: &str) -> Result<DestinationFolder, ScrapeError> {
        FOLDER.resolve(listing_url)
    }

    fn rules(&self) -> &RuleSet {
        &RULES
    }

    fn candidates(&self, listing: &str) -> Result<Vec<Candidate>, ScrapeError> {
        let document = Html::parse_document(listing);

        let candidates = document
            .select(&FILE_TEXT_SELECTOR)
            .filter_map(|file_text| {
                let anchor = file_text.select(&ANCHOR_SELECTOR).next()?;
                let href = anchor.value().attr("href").filter(|x| !x.is_empty());
                let title = anchor.value().attr("title").filter(|x| !x.is_empty());

                match (href, title) {
                    (Some(href), Some(title)) => Some(Candidate::with_title(href, title)),
                    _ => {
                        trace!(?href, ?title, "Skipping attachment without href or title");
                        None
                    }
                }
            })
            .collect::<Vec<_>>();

        trace!(attachments = candidates.len(), "Parsed forum thread");

        Ok(candidates)
    }
}

fn fetch_attachment(
    config: &Config,
    folder: &DestinationFolder,
    url: &str,
    title: Option<&str>,
) -> Command {
    let save_as = title
        .filter(|_| config.save_as_title)
        .map(|x| UNSAFE_FILENAME_CHARS.replace_all(x, "_"));

    Command::direct_fetch(config, VERBOSITY, folder, url, save_as.as_deref())
}

fn funky_url(url: &str) -> Command {
    Command::echo(["Got a funky URL:", url])
}
