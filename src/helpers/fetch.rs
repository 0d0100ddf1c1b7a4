use std::time::Duration;

use reqwest::Response;
use tracing::{debug, trace};
use url::Url;

use crate::error::ScrapeError;

#[tracing::instrument(skip_all, fields(url = listing_url.as_str()))]
pub async fn fetch_listing(listing_url: &Url, user_agent: &str) -> Result<String, ScrapeError> {
    let to_err = |source: reqwest::Error| ScrapeError::Fetch {
        url: listing_url.to_string(),
        source,
    };

    let resp = get_listing_response(listing_url, user_agent)
        .await
        .map_err(to_err)?;

    trace!(status = ?resp.status(), "Listing response received");

    let body = resp.text().await.map_err(to_err)?;

    debug!(bytes = body.len(), "Listing fetched");

    Ok(body)
}

async fn get_listing_response(listing_url: &Url, user_agent: &str) -> reqwest::Result<Response> {
    debug!("Fetching listing");
    reqwest::Client::builder()
        .user_agent(user_agent)
        .build()?
        .get(listing_url.as_str())
        .timeout(Duration::from_secs(60))
        .send()
        .await?
        .error_for_status()
}
