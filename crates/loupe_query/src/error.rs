//! Error types.
use std::fmt::Display;

use loupe_ast::error::{ParseError, SelectError};

/// An error while loading or querying a document.
#[derive(Debug)]
pub enum Error {
    /// A selector couldn't be parsed.
    Select(SelectError),
    /// Markup couldn't be read.
    Parse(ParseError),
}
impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Select(err) => err.fmt(f),
            Self::Parse(err) => err.fmt(f),
        }
    }
}
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Select(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}
impl From<SelectError> for Error {
    fn from(value: SelectError) -> Self {
        Self::Select(value)
    }
}
impl From<ParseError> for Error {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}
