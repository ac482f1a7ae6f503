//! Error types.
use std::fmt::Display;

/// An error while reading markup to parse.
#[derive(Debug)]
pub enum ParseError {
    /// An error while reading the markup from a file or reader.
    Io(std::io::Error),
}
impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => err.fmt(f),
        }
    }
}
impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
        }
    }
}
impl From<std::io::Error> for ParseError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// An error from a selector that couldn't be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectError {
    /// The selector as it was given
    pub selector: String,
    /// A description of what the parser rejected
    pub reason: String,
    /// The line of the selector the error was found on, starting from 0
    pub line: u32,
    /// The column of the line the error was found on, starting from 1
    pub column: u32,
}
impl Display for SelectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid selector `{}` at {}:{}: {}",
            self.selector, self.line, self.column, self.reason
        )
    }
}
impl std::error::Error for SelectError {}
