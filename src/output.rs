use crate::search::{to_query_line, KeywordGroup, Relation};

/// Format keyword groups as JSON or for human consumption
pub fn format_groups(groups: &[KeywordGroup], json: bool) -> String {
    if json {
        format_json(groups)
    } else {
        format_human(groups)
    }
}

/// Format keyword groups as JSON
pub fn format_json(groups: &[KeywordGroup]) -> String {
    let mut out = serde_json::to_string_pretty(groups)
        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
    out.push('\n');
    out
}

/// Format keyword groups for human consumption
pub fn format_human(groups: &[KeywordGroup]) -> String {
    if groups.is_empty() {
        return "No keywords\n".to_string();
    }

    let mut output = format!("{} keyword groups\n\n", groups.len());
    for group in groups {
        let clause = match group.relation {
            Relation::Or => format!("{} OR {}", group.keyword1, group.keyword2),
            Relation::And if group.keyword2.is_empty() => group.keyword1.clone(),
            Relation::And => format!("{} AND {}", group.keyword1, group.keyword2),
        };
        output.push_str(&format!("  {}. [{}] {}\n", group.id, group.relation, clause));
    }
    output.push_str(&format!("\nQuery: {}\n", to_query_line(groups)));
    output
}
