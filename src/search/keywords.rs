//! Keyword list parsing
//!
//! Turns the model's one-line answer, e.g.
//! `(伪造|私刻) (办公室|办公场所) 公章 签订合同 公司 表见代理 构成`,
//! into at most [`MAX_GROUPS`] AND/OR keyword groups.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Maximum number of groups returned to the caller
pub const MAX_GROUPS: usize = 5;

/// How the two keywords of a group combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Relation {
    And,
    Or,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::And => write!(f, "AND"),
            Relation::Or => write!(f, "OR"),
        }
    }
}

/// One clause of the boolean query. Groups are AND-ed together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub id: usize,
    pub keyword1: String,
    /// Empty for a lone AND keyword
    pub keyword2: String,
    pub relation: Relation,
}

impl KeywordGroup {
    /// Render the group in PKU Law query syntax
    pub fn to_query(&self) -> String {
        match self.relation {
            Relation::Or => format!("({}|{})", self.keyword1, self.keyword2),
            Relation::And if self.keyword2.is_empty() => self.keyword1.clone(),
            Relation::And => format!("{} {}", self.keyword1, self.keyword2),
        }
    }
}

/// Render a group list back into a single PKU Law query line
pub fn to_query_line(groups: &[KeywordGroup]) -> String {
    groups
        .iter()
        .map(KeywordGroup::to_query)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Classified token
enum Token<'a> {
    Plain(String),
    Or(&'a str, &'a str),
}

/// Pending plain keyword waiting for a partner.
/// OR tokens do not change it, so a keyword pending before an OR token
/// pairs with the next plain keyword after it.
enum Pending {
    Empty,
    One(String),
}

/// Parse the model's answer into keyword groups.
///
/// Only the first line is considered. Tokens are separated by single spaces
/// and parentheses are ignored. `a|b` becomes an OR group; other tokens are
/// paired left to right into AND groups, an unpaired last token standing alone.
/// Never fails; unexpected text just yields fewer or odder groups.
pub fn parse_keywords(raw: &str) -> Vec<KeywordGroup> {
    let line = raw.trim().split('\n').next().unwrap_or_default();
    if line.is_empty() {
        return Vec::new();
    }

    let mut groups: Vec<(String, String, Relation)> = Vec::new();
    let mut pending = Pending::Empty;

    for token in line.split(' ') {
        let cleaned: String = token.chars().filter(|c| *c != '(' && *c != ')').collect();

        let word = match classify(&cleaned) {
            Token::Or(first, second) => {
                groups.push((first.to_string(), second.to_string(), Relation::Or));
                continue;
            }
            Token::Plain(word) => word,
        };

        pending = match pending {
            Pending::Empty => Pending::One(word),
            Pending::One(first) => {
                groups.push((first, word, Relation::And));
                Pending::Empty
            }
        };
    }

    if let Pending::One(last) = pending {
        groups.push((last, String::new(), Relation::And));
    }

    if groups.len() > MAX_GROUPS {
        debug!(
            "Dropping {} keyword groups beyond the limit of {}",
            groups.len() - MAX_GROUPS,
            MAX_GROUPS
        );
        groups.truncate(MAX_GROUPS);
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(id, (keyword1, keyword2, relation))| KeywordGroup {
            id,
            keyword1,
            keyword2,
            relation,
        })
        .collect()
}

/// For `a|b|c` only the first two parts are used.
/// An OR token missing a side degrades to a plain (possibly empty) token.
/// Empty tokens stay plain and take part in pairing.
fn classify(token: &str) -> Token<'_> {
    if !token.contains('|') {
        return Token::Plain(token.to_string());
    }

    let mut parts = token.split('|');
    let first = parts.next().unwrap_or_default();
    let second = parts.next().unwrap_or_default();

    match (first.is_empty(), second.is_empty()) {
        (false, false) => Token::Or(first, second),
        (true, false) => Token::Plain(second.to_string()),
        _ => Token::Plain(first.to_string()),
    }
}
