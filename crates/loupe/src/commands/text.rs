use loupe_query::Query;

use crate::{
    args::{Input, RunCommand},
    commands::for_each_document,
    config::Config,
};

#[derive(clap::Args, Debug)]
/// Prints the text of each document, or of the elements matching the selector
pub struct Text {
    #[clap(flatten)]
    /// The documents to read and how to query them
    pub input: Input,
}

impl Text {
    fn print(&self, query: &Query) -> anyhow::Result<String> {
        Ok(match &self.input.selector {
            Some(selector) => query.select(selector, None, None)?.text(),
            None => query.root().text(),
        })
    }
}

impl RunCommand for Text {
    fn run(self, config: Config) -> anyhow::Result<()> {
        let options = self.input.options(&config);
        for_each_document(&self.input, &options, |query| self.print(query))
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use loupe_query::load;
    use pretty_assertions::assert_eq;

    use crate::args::{Args, Command};

    fn text(args: &[&str], markup: &str) -> anyhow::Result<String> {
        let Command::Text(text) = Args::parse_from(args).command else {
            panic!("expected text command");
        };
        let options = text.input.options(&Default::default());
        text.print(&load(markup, &options))
    }

    #[test]
    fn whole_document() -> anyhow::Result<()> {
        assert_eq!(
            text(&["loupe", "text"], "<p>a &amp; b<!-- note --></p>")?,
            "a & b"
        );
        Ok(())
    }

    #[test]
    fn selected() -> anyhow::Result<()> {
        assert_eq!(
            text(
                &["loupe", "text", "--selector", "li"],
                "<h1>list</h1><ul><li>1</li><li>2</li></ul>"
            )?,
            "12"
        );
        Ok(())
    }
}
