//! Reading documents from the file system
use std::{
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::Context;

/// Extensions of files that are read from a directory
const EXTENSIONS: [&str; 6] = ["html", "htm", "xhtml", "xml", "svg", "xsl"];

/// The source of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Standard input
    Stdin,
    /// A file
    File(PathBuf),
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdin => "<stdin>".fmt(f),
            Self::File(path) => path.display().fmt(f),
        }
    }
}

/// Returns the contents of each document of the paths, or of stdin when no paths
/// are given.
///
/// Directories are read without descending into subdirectories, and only files with
/// a markup extension are read from them.
///
/// # Errors
/// If a file or directory can't be read
pub fn load_files(paths: &[PathBuf]) -> anyhow::Result<Vec<(Origin, String)>> {
    if paths.is_empty() {
        let mut markup = String::new();
        std::io::stdin()
            .read_to_string(&mut markup)
            .context("Cannot read stdin")?;
        return Ok(vec![(Origin::Stdin, markup)]);
    }

    let mut files = vec![];
    for path in paths {
        for file in list_files(path)? {
            let markup = std::fs::read_to_string(&file)
                .with_context(|| format!("Cannot read {}", file.display()))?;
            files.push((Origin::File(file), markup));
        }
    }
    Ok(files)
}

fn list_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let metadata =
        std::fs::metadata(path).with_context(|| format!("Cannot read {}", path.display()))?;
    if !metadata.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = std::fs::read_dir(path)
        .with_context(|| format!("Cannot read directory {}", path.display()))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    files.retain(|path| path.is_file() && is_markup(path));
    files.sort();
    log::debug!("found {} files in {}", files.len(), path.display());
    Ok(files)
}

fn is_markup(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(extension))
        })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{is_markup, list_files};

    #[test]
    fn markup_extensions() {
        assert!(is_markup(Path::new("index.html")));
        assert!(is_markup(Path::new("feed.XML")));
        assert!(!is_markup(Path::new("style.css")));
        assert!(!is_markup(Path::new("README")));
    }

    #[test]
    fn missing_path() {
        assert!(list_files(Path::new("./does/not/exist")).is_err());
    }

    #[test]
    fn file_is_listed_as_is() -> anyhow::Result<()> {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        assert_eq!(list_files(&manifest)?, vec![manifest]);
        Ok(())
    }

    #[test]
    fn directories_are_filtered() -> anyhow::Result<()> {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        assert!(list_files(dir)?.is_empty());
        Ok(())
    }
}
