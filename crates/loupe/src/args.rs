//! Command line arguments
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use loupe_query::Options;

use crate::{
    commands::{Html, Text},
    config::Config,
};

/// A command which can be run from the command line
pub trait RunCommand {
    /// # Errors
    ///
    /// If any part of the lifecycle fails
    /// * Fails to read any files
    /// * Fails to parse a selector
    fn run(self, config: Config) -> anyhow::Result<()>;
}

#[derive(Parser)]
#[clap(
    bin_name = "loupe",
    name = "loupe",
    author,
    version,
    about = "Query HTML and XML documents with CSS selectors",
    long_about = None
)]
/// The arguments of the command line
pub struct Args {
    #[clap(subcommand)]
    /// What to run
    pub command: Command,
}

#[derive(Subcommand)]
/// The commands of the command line
pub enum Command {
    /// Print the markup of documents, or of the elements matching a selector
    Html(Html),
    /// Print the text of documents, or of the elements matching a selector
    Text(Text),
}

#[derive(clap::Args, Debug)]
/// Arguments for reading and querying documents, shared by each command
pub struct Input {
    /// The files or directories to read. Reads from stdin when no paths are given.
    #[clap(value_parser)]
    pub paths: Vec<PathBuf>,
    /// A CSS selector for the elements to print
    #[clap(long, short)]
    pub selector: Option<String>,
    /// Parse and print documents as XML
    #[clap(long, default_value = "false", overrides_with = "no_xml")]
    pub xml: bool,
    /// Parse and print documents as HTML, even when the config enables XML
    #[clap(long, default_value = "false", overrides_with = "xml")]
    pub no_xml: bool,
    /// Drop text which only contains whitespace
    #[clap(
        long,
        short = 'w',
        default_value = "false",
        overrides_with = "keep_whitespace"
    )]
    pub ignore_whitespace: bool,
    /// Keep text which only contains whitespace, even when the config drops it
    #[clap(long, default_value = "false", overrides_with = "ignore_whitespace")]
    pub keep_whitespace: bool,
}

impl Input {
    /// Returns the configured options, overridden by any flags.
    ///
    /// Where both a flag and its negation are given, the last one wins.
    pub fn options(&self, config: &Config) -> Options {
        let mut options = config.options.unwrap_or_default();
        if let Some(xml_mode) = toggle(self.xml, self.no_xml) {
            options.xml_mode = xml_mode;
        }
        if let Some(ignore_whitespace) = toggle(self.ignore_whitespace, self.keep_whitespace) {
            options.ignore_whitespace = ignore_whitespace;
        }
        options
    }
}

fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use loupe_query::Options;

    use super::{Args, Command};
    use crate::config::Config;

    #[test]
    fn parse_args() {
        let args = Args::parse_from(["loupe", "text", "a.html", "b", "-s", "p > a", "--xml"]);
        let Command::Text(text) = args.command else {
            panic!("expected text command");
        };
        assert_eq!(text.input.paths.len(), 2);
        assert_eq!(text.input.selector.as_deref(), Some("p > a"));

        let options = text.input.options(&Config {
            options: Some(Options {
                ignore_whitespace: true,
                ..Options::default()
            }),
        });
        assert!(options.xml_mode);
        assert!(options.ignore_whitespace);
    }

    #[test]
    fn parse_stdin_args() {
        let args = Args::parse_from(["loupe", "html"]);
        let Command::Html(html) = args.command else {
            panic!("expected html command");
        };
        assert!(html.input.paths.is_empty());
        assert_eq!(html.input.options(&Config::default()), Options::default());
    }

    #[test]
    fn flags_override_config() {
        let config = Config {
            options: Some(Options {
                xml_mode: true,
                ignore_whitespace: true,
                ..Options::default()
            }),
        };
        let options = |args: &[&str]| {
            let args = Args::parse_from(["loupe", "html"].iter().chain(args).copied());
            let Command::Html(html) = args.command else {
                panic!("expected html command");
            };
            html.input.options(&config)
        };

        let kept = options(&[]);
        assert!(kept.xml_mode);
        assert!(kept.ignore_whitespace);

        let negated = options(&["--no-xml", "--keep-whitespace"]);
        assert!(!negated.xml_mode);
        assert!(!negated.ignore_whitespace);

        let last_wins = options(&["--no-xml", "--xml", "-w", "--keep-whitespace"]);
        assert!(last_wins.xml_mode);
        assert!(!last_wins.ignore_whitespace);
    }
}
