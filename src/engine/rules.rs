use std::{borrow::Cow, fmt::Debug};

use regex::Regex;
use tracing::{debug, trace};

use super::{command::Command, folder::DestinationFolder, Candidate};
use crate::config::Config;

/// Turns an accepted URL into the command that downloads it.
pub type Builder = fn(&Config, &DestinationFolder, &str, Option<&str>) -> Command;

/// Produces the diagnostic command for a URL no rule accepted.
pub type Fallback = fn(&str) -> Command;

#[derive(Debug)]
pub enum Matcher {
    /// The pattern has to match the whole candidate.
    Full(Regex),
    /// Protocol-relative candidates (`//host/...`) get an `https:` scheme,
    /// then the pattern has to match at the start.
    SchemePrefix(Regex),
}

impl Matcher {
    pub fn full(pattern: &str) -> Self {
        Self::Full(Regex::new(&format!("^(?:{pattern})$")).expect("Invalid rule regex"))
    }

    pub fn scheme_prefix(pattern: &str) -> Self {
        Self::SchemePrefix(Regex::new(&format!("^(?:{pattern})")).expect("Invalid rule regex"))
    }

    /// Returns the URL the builder should use, or `None` if the candidate
    /// is rejected.
    pub fn accept<'u>(&self, url: &'u str) -> Option<Cow<'u, str>> {
        match self {
            Self::Full(re) => re.is_match(url).then_some(Cow::Borrowed(url)),

            Self::SchemePrefix(re) => {
                let url = match url.strip_prefix("//") {
                    Some(rest) => Cow::Owned(format!("https://{rest}")),
                    None => Cow::Borrowed(url),
                };

                re.is_match(&url).then_some(url)
            }
        }
    }
}

pub struct PatternRule {
    name: &'static str,
    matcher: Matcher,
    builder: Builder,
}

impl Debug for PatternRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternRule")
            .field("name", &self.name)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

impl PatternRule {
    pub fn new(name: &'static str, matcher: Matcher, builder: Builder) -> Self {
        Self {
            name,
            matcher,
            builder,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn build(
        &self,
        config: &Config,
        folder: &DestinationFolder,
        url: &str,
        title: Option<&str>,
    ) -> Command {
        (self.builder)(config, folder, url, title)
    }
}

/// A rule accepted a candidate. `target` is the URL after any rewrite the
/// matcher applied.
#[derive(Debug)]
pub struct Classified<'r, 'u> {
    pub rule: &'r PatternRule,
    pub target: Cow<'u, str>,
}

/// Ordered rules for one listing source. Evaluation stops at the first
/// rule that accepts.
pub struct RuleSet {
    rules: Vec<PatternRule>,
    fallback: Fallback,
}

impl Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl RuleSet {
    pub fn new(rules: Vec<PatternRule>, fallback: Fallback) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn classify<'r, 'u>(&'r self, url: &'u str) -> Option<Classified<'r, 'u>> {
        self.rules.iter().find_map(|rule| {
            rule.matcher
                .accept(url)
                .map(|target| Classified { rule, target })
        })
    }

    pub fn fallback(&self, url: &str) -> Command {
        (self.fallback)(url)
    }

    pub fn command_for(
        &self,
        config: &Config,
        folder: &DestinationFolder,
        candidate: &Candidate,
    ) -> Command {
        match self.classify(&candidate.url) {
            Some(Classified { rule, target }) => {
                trace!(rule = rule.name(), url = ?candidate.url, "Matched rule");
                rule.build(config, folder, &target, candidate.title.as_deref())
            }

            None => {
                debug!(url = ?candidate.url, "No rule for URL");
                self.fallback(&candidate.url)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(_: &Config, _: &DestinationFolder, url: &str, _: Option<&str>) -> Command {
        Command::echo(["first", url])
    }

    fn second(_: &Config, _: &DestinationFolder, url: &str, _: Option<&str>) -> Command {
        Command::echo(["second", url])
    }

    fn unknown(url: &str) -> Command {
        Command::echo(["unknown", url])
    }

    #[test]
    fn earlier_rule_wins() {
        let rules = RuleSet::new(
            vec![
                PatternRule::new("narrow", Matcher::full(r"https://a\.com/.*"), first),
                PatternRule::new("broad", Matcher::full(r"https://.*"), second),
            ],
            unknown,
        );

        assert_eq!(rules.classify("https://a.com/x").unwrap().rule.name(), "narrow");
        assert_eq!(rules.classify("https://b.com/x").unwrap().rule.name(), "broad");

        let swapped = RuleSet::new(
            vec![
                PatternRule::new("broad", Matcher::full(r"https://.*"), second),
                PatternRule::new("narrow", Matcher::full(r"https://a\.com/.*"), first),
            ],
            unknown,
        );

        assert_eq!(swapped.classify("https://a.com/x").unwrap().rule.name(), "broad");
    }

    #[test]
    fn full_match_rejects_partial() {
        let matcher = Matcher::full(r"https?://i\.redd\.it/\w+\.jpg");

        assert!(matcher.accept("https://i.redd.it/abc.jpg").is_some());
        assert!(matcher.accept("https://i.redd.it/abc.jpg?x=1").is_none());
        assert!(matcher.accept("see https://i.redd.it/abc.jpg").is_none());
    }

    #[test]
    fn scheme_prefix_rewrites_protocol_relative() {
        let matcher = Matcher::scheme_prefix(r"https?://");

        assert_eq!(
            matcher.accept("//i.4cdn.org/r/img.jpg").unwrap(),
            "https://i.4cdn.org/r/img.jpg"
        );
        assert_eq!(
            matcher.accept("http://i.4cdn.org/r/img.jpg").unwrap(),
            "http://i.4cdn.org/r/img.jpg"
        );
        assert!(matcher.accept("/r/img.jpg").is_none());
        assert!(matcher.accept("ftp://i.4cdn.org/r/img.jpg").is_none());
    }

    #[test]
    fn unmatched_goes_to_fallback() {
        let rules = RuleSet::new(
            vec![PatternRule::new("only", Matcher::full(r"https://a\.com/.*"), first)],
            unknown,
        );
        let candidate = Candidate::new("mailto:someone");

        assert!(rules.classify(&candidate.url).is_none());

        let cmd = rules.command_for(&Config::default(), &DestinationFolder::new("f"), &candidate);
        assert_eq!(cmd, Command::echo(["unknown", "mailto:someone"]));
    }
}
