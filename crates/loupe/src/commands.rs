//! Various commands that can be executed by loupe
mod html;
mod text;

pub use html::Html;
pub use text::Text;

use loupe_query::{load, Options, Query};

use crate::{args::Input, fs::load_files};

/// Loads a query for each document of the input, calling `print` with each.
fn for_each_document(
    input: &Input,
    options: &Options,
    mut print: impl FnMut(&Query) -> anyhow::Result<String>,
) -> anyhow::Result<()> {
    for (origin, markup) in load_files(&input.paths)? {
        log::debug!("querying {origin}");
        let query = load(&markup, options);
        println!("{}", print(&query)?);
    }
    Ok(())
}
