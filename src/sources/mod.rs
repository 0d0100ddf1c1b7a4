pub(super) mod forum;
pub(super) mod reddit;

use std::fmt::Debug;

use once_cell::sync::Lazy;
use tracing::{debug, trace};
use url::Url;

use crate::{
    engine::{folder::DestinationFolder, rules::RuleSet, Candidate},
    error::ScrapeError,
};

pub static SOURCES: Lazy<Vec<Box<dyn Source>>> = Lazy::new(|| {
    vec![
        Box::new(reddit::RedditSource),
        Box::new(forum::ForumSource),
    ]
});

/// A kind of listing page: how to recognise it, where its downloads go,
/// how to read candidates out of it and which rules classify them.
pub trait Source: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn supports(&self, listing_url: &Url) -> bool;

    fn resolve_folder(&self, listing_url: &str) -> Result<DestinationFolder, ScrapeError>;

    fn rules(&self) -> &RuleSet;

    fn candidates(&self, listing: &str) -> Result<Vec<Candidate>, ScrapeError>;
}

#[derive(Debug)]
pub struct ResolvedListing {
    pub source: &'static dyn Source,
    pub url: Url,
    pub folder: DestinationFolder,
}

/// Picks the source for a listing URL and derives its destination folder.
/// Nothing touches the network or the filesystem here.
#[tracing::instrument]
pub fn resolve(listing_url: &str) -> Result<ResolvedListing, ScrapeError> {
    let url = Url::parse(listing_url)
        .map_err(|e| ScrapeError::folder_resolution(listing_url, format!("invalid URL: {e}")))?;

    let Some(source) = SOURCES.iter().find(|x| x.supports(&url)) else {
        return Err(ScrapeError::folder_resolution(
            listing_url,
            "unsupported site",
        ));
    };
    trace!(source = source.name(), "Found source for listing");

    let folder = source.resolve_folder(listing_url)?;
    debug!(source = source.name(), %folder, "Resolved listing");

    Ok(ResolvedListing {
        source: &**source,
        url,
        folder,
    })
}
