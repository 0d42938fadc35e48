// src/grader/parser.rs — Extract delimited regions from judge replies
//
// Judge replies carry their rationale and score in XML-ish tags. Extraction
// strips only the outermost pair, preserves one level of nested
// differently-named tags, joins multiple top-level matches with a single
// space, and returns an empty string when the tag is absent. Callers must
// treat empty as a parse failure, never as a score of 0.

use regex::Regex;

/// Extract the content of every top-level `<tag>...</tag>` region.
pub fn parse_tag(text: &str, tag: &str) -> String {
    let tag = regex::escape(tag);
    // Content is either a complete nested tag pair or a run of non-`<` text.
    let pattern = format!(r"(?s)<{tag}>((?:<[^/]*?>.*?</[^>]*?>|[^<]*?)+)</{tag}>");
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("tag extraction regex failed for <{tag}>: {e}");
            return String::new();
        }
    };

    let matches: Vec<&str> = re
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    matches.join(" ").trim().to_string()
}
