//! Output formatting utilities

use crate::domain::{Tag, TagState};
use crate::error::Result;

/// Format a single tag as `name code lvl`
pub fn format_tag(tag: &Tag) -> String {
    format!("{} {} {}", tag.name, tag.code, tag.lvl)
}

/// Format registered tags as aligned columns
pub fn format_tag_list(tags: &[&Tag]) -> String {
    if tags.is_empty() {
        return "No tags registered".to_string();
    }

    let name_width = tags.iter().map(|t| t.name.len()).max().unwrap_or(0);
    let code_width = tags.iter().map(|t| t.code.len()).max().unwrap_or(0);

    let mut output = String::new();
    for tag in tags {
        output.push_str(&format!(
            "{:<name_width$}  {:<code_width$}  {}\n",
            tag.name,
            tag.code,
            tag.lvl,
            name_width = name_width,
            code_width = code_width
        ));
    }
    output
}

/// Format a set result: the tag list, then the data bag as JSON
pub fn format_state(state: &TagState) -> Result<String> {
    Ok(format!(
        "{}\n{}",
        state.tags,
        serde_json::to_string(&state.data)?
    ))
}
