use url::Url;

pub struct DomainParser;
impl DomainParser {
    pub fn get_domain(url: &Url) -> Option<addr::domain::Name<'_>> {
        url.domain().and_then(|x| addr::parse_domain_name(x).ok())
    }

    /// Get the root domain (the registrable part)
    pub fn get_domain_root(url: &Url) -> Option<&str> {
        Self::get_domain(url).and_then(|x| x.root())
    }

    /// Whether the registrable part of the URL's host is one of `roots`.
    /// `old.reddit.com` has the root `reddit.com`.
    pub fn has_root(url: &Url, roots: &[&str]) -> bool {
        Self::get_domain_root(url).is_some_and(|root| {
            roots
                .iter()
                .any(|candidate| root.eq_ignore_ascii_case(candidate))
        })
    }
}
