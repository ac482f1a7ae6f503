//! The command line interface of loupe.
pub mod args;
pub mod commands;
pub mod config;
pub mod fs;
