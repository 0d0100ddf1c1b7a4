use clap::{error::ErrorKind, Parser};

/// Turn a forum thread or reddit listing into a batch of download commands.
#[derive(Debug, Parser)]
#[command(name = "postgrab", version)]
#[command(
    about = "Download the media posted in a 4chan thread or a reddit .json listing",
    long_about = None
)]
pub struct Cli {
    /// Listing URL, e.g. https://boards.4chan.org/r/thread/12345678 or
    /// https://reddit.com/r/aww/.json?limit=100
    pub url: String,

    /// Name forum attachments after their posted title.
    #[arg(long)]
    pub save_as_title: bool,

    /// Run the commands without asking first.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl Cli {
    /// Parses the process arguments. Usage errors print the usage text and
    /// exit with code 1; `--help` and `--version` exit normally.
    pub fn parse_or_exit() -> Self {
        match Self::try_parse() {
            Ok(cli) => cli,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => {
                let _ = e.print();
                std::process::exit(1);
            }
        }
    }
}
