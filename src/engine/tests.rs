use super::{
    command::Command,
    folder::DestinationFolder,
    rules::{Matcher, PatternRule, RuleSet},
    scrape, Candidate, Scrape,
};
use crate::config::Config;

fn fetch(config: &Config, folder: &DestinationFolder, url: &str, _: Option<&str>) -> Command {
    Command::direct_fetch(config, &["-nv"], folder, url, None)
}

fn unknown(url: &str) -> Command {
    Command::echo(["unknown", url])
}

fn rules() -> RuleSet {
    RuleSet::new(
        vec![PatternRule::new(
            "media",
            Matcher::full(r"https://media\.example/.+"),
            fetch,
        )],
        unknown,
    )
}

fn candidates(urls: &[&str]) -> Vec<Candidate> {
    urls.iter().map(|x| Candidate::new(*x)).collect()
}

fn targets(result: &[Command]) -> Vec<&str> {
    result
        .iter()
        .map(|x| x.args().last().map_or("", String::as_str))
        .collect()
}

#[test]
fn keeps_first_occurrence_order() {
    let result = scrape(
        &rules(),
        &Config::default(),
        &DestinationFolder::new("f"),
        candidates(&[
            "https://media.example/b",
            "https://media.example/a",
            "https://media.example/b",
            "https://media.example/c",
            "https://media.example/a",
        ]),
    );

    assert_eq!(
        targets(&result),
        [
            "https://media.example/b",
            "https://media.example/a",
            "https://media.example/c",
        ]
    );
}

#[test]
fn one_command_per_unique_url_including_unknown() {
    let result = scrape(
        &rules(),
        &Config::default(),
        &DestinationFolder::new("f"),
        candidates(&[
            "https://media.example/a",
            "gopher://elsewhere",
            "gopher://elsewhere",
            "",
        ]),
    );

    assert_eq!(result.len(), 3);
    assert_eq!(result[1], Command::echo(["unknown", "gopher://elsewhere"]));
    assert_eq!(result[2], Command::echo(["unknown", ""]));
    assert!(result[1].is_diagnostic());
}

#[test]
fn empty_listing_is_empty_result() {
    let result = scrape(
        &rules(),
        &Config::default(),
        &DestinationFolder::new("f"),
        Vec::new(),
    );

    assert!(result.is_empty());
}

#[test]
fn scrape_is_lazy_and_rerunnable() {
    let rules = rules();
    let config = Config::default();
    let folder = DestinationFolder::new("f");
    let input = candidates(&["https://media.example/a", "https://media.example/a"]);

    let mut lazy = Scrape::new(&rules, &config, &folder, input.clone());
    assert!(lazy.next().is_some());
    assert!(lazy.next().is_none());

    let again = Scrape::new(&rules, &config, &folder, input).count();
    assert_eq!(again, 1);
}
