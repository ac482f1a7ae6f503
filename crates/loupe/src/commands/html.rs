use loupe_query::{Query, Target};

use crate::{
    args::{Input, RunCommand},
    commands::for_each_document,
    config::Config,
};

#[derive(clap::Args, Debug)]
/// Prints the markup of each document, or of the elements matching the selector
pub struct Html {
    #[clap(flatten)]
    /// The documents to read and how to query them
    pub input: Input,
}

impl Html {
    fn print(&self, query: &Query) -> anyhow::Result<String> {
        let source = self.input.selector.as_deref().map(Target::from);
        Ok(query.html(source)?)
    }
}

impl RunCommand for Html {
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

    fn html(args: &[&str], markup: &str) -> anyhow::Result<String> {
        let Command::Html(html) = Args::parse_from(args).command else {
            panic!("expected html command");
        };
        let options = html.input.options(&Default::default());
        html.print(&load(markup, &options))
    }

    #[test]
    fn whole_document() -> anyhow::Result<()> {
        assert_eq!(html(&["loupe", "html"], "<p>a<br>b</p>")?, "<p>a<br>b</p>");
        Ok(())
    }

    #[test]
    fn selected() -> anyhow::Result<()> {
        assert_eq!(
            html(&["loupe", "html", "-s", "li"], "<ul><li>1</li><li>2</li></ul>")?,
            "<li>1</li><li>2</li>"
        );
        Ok(())
    }

    #[test]
    fn xml() -> anyhow::Result<()> {
        assert_eq!(
            html(&["loupe", "html", "--xml"], "<a><b/></a>")?,
            "<a><b/></a>"
        );
        Ok(())
    }

    #[test]
    fn invalid_selector() {
        assert!(html(&["loupe", "html", "-s", "p["], "<p></p>").is_err());
    }
}
