use std::collections::HashSet;

/// Remembers which candidate URLs were already handled during one scrape
/// pass. URLs are compared as exact strings.
#[derive(Debug, Default)]
pub struct DedupFilter {
    seen: HashSet<String>,
}

impl DedupFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `url` was seen before and should be skipped.
    /// The first sighting is recorded and returns `false`.
    pub fn processed(&mut self, url: &str) -> bool {
        if self.seen.contains(url) {
            return true;
        }

        self.seen.insert(url.to_string());
        false
    }
}
