//! Step 2: summary generation (prompt building and result rendering).

pub mod prompt;

pub use prompt::{
    SummaryRequest, TRUNCATION_MARKER, build_chunk_prompt, build_summary_prompt, chunk_diff,
    truncate_diff,
};

/// Rendered for a chunk whose model call failed.
pub const CHUNK_ERROR_TEXT: &str = "Error processing chunk";

/// Markdown produced by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub markdown: String,
}

/// Comment body: bold title line, blank line, summary.
/// `**{title}:**\n\n{summary}`
pub fn render_comment(title: &str, summary: &str) -> String {
    format!("**{title}:**\n\n{}", summary.trim_end())
}

/// Joins per-chunk outcomes into `**Chunk i Summary**:` blocks (1-based).
pub fn render_chunk_summaries(outcomes: &[Option<String>]) -> String {
    let mut out = String::new();
    for (i, outcome) in outcomes.iter().enumerate() {
        let n = i + 1;
        match outcome {
            Some(text) => out.push_str(&format!("**Chunk {n} Summary**:\n{}\n\n", text.trim())),
            None => out.push_str(&format!("**Chunk {n} Summary**: {CHUNK_ERROR_TEXT}\n\n")),
        }
    }
    out
}
