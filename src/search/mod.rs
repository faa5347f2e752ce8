//! Keyword search: prompt template, answer parser and the orchestrating service

pub mod auto;
pub mod keywords;
pub mod prompt;

pub use auto::AutoSearch;
pub use keywords::{parse_keywords, to_query_line, KeywordGroup, Relation, MAX_GROUPS};
pub use prompt::build_prompt;
