//! fabao - boolean keyword builder for legal case search
//!
//! Asks a chat model to turn a research request into PKU Law search
//! keywords and parses the answer into AND/OR keyword groups.

pub mod ai;
pub mod cli;
pub mod core;
pub mod output;
pub mod search;
pub mod web;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
pub use search::{parse_keywords, AutoSearch, KeywordGroup, Relation};
