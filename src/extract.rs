// src/extract.rs — Source document text
//
// PDF-to-text conversion happens upstream of this harness; here we load the
// already-extracted pages (plain text or markdown, newline-joined) and apply
// the same length heuristic the rest of the pipeline expects.

use std::path::Path;

use crate::infra::errors::ArenaError;

/// Character count beyond which some candidate models are likely to run past
/// their input-token budget. A heuristic guard, warned about, not enforced.
pub const TOKEN_BUDGET_CHAR_GUARD: usize = 12_000;

pub fn extract_text(path: &Path) -> Result<String, ArenaError> {
    let text = std::fs::read_to_string(path)?;

    let char_count = text.chars().count();
    if char_count > TOKEN_BUDGET_CHAR_GUARD {
        tracing::warn!(
            chars = char_count,
            "extracted text may exceed some models' input token maximums, proceeding with caution"
        );
    }

    Ok(text)
}
