//! CLI command definitions and handlers

mod args;
pub mod parse;
pub mod search;
pub mod serve;

pub use args::{Cli, Commands, ParseArgs, SearchArgs, ServeArgs};
