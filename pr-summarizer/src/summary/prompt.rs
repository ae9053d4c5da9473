//! Prompt builder for PR summaries.
//!
//! Pure functions, no I/O. The diff is embedded verbatim (or truncated on a
//! char boundary) inside a fixed instruction template.

use std::fmt::Write;

/// Appended after a diff that was cut to the character budget.
pub const TRUNCATION_MARKER: &str = "\n... (truncated)";

/// Prompt ready to be sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub prompt: String,
    /// True when the diff was cut to fit the budget.
    pub truncated: bool,
}

/// Cuts `diff` to at most `max_chars` Unicode scalar values.
///
/// Returns the (possibly shortened) text with [`TRUNCATION_MARKER`] appended
/// when a cut happened, and whether it happened.
pub fn truncate_diff(diff: &str, max_chars: usize) -> (String, bool) {
    match diff.char_indices().nth(max_chars) {
        None => (diff.to_string(), false),
        Some((byte_idx, _)) => {
            let mut out = String::with_capacity(byte_idx + TRUNCATION_MARKER.len());
            out.push_str(&diff[..byte_idx]);
            out.push_str(TRUNCATION_MARKER);
            (out, true)
        }
    }
}

/// Builds the single-shot summary prompt used for webhook deliveries.
///
/// The model is asked for five sections: Summary, Key Changes, Potential Risks,
/// Verification, Files Changed.
pub fn build_summary_prompt(diff: &str, max_chars: usize) -> SummaryRequest {
    let (body, truncated) = truncate_diff(diff, max_chars);
    let mut s = String::with_capacity(body.len() + 1024);

    writeln!(
        s,
        "You are a senior software engineer reviewing a GitHub pull request. \
Summarize the code diff below for the reviewers."
    )
    .ok();

    writeln!(
        s,
        "\nAnswer in GitHub-flavored markdown with exactly these sections, in this order:"
    )
    .ok();
    writeln!(s, "## Summary\nOne short paragraph describing the purpose of the change.").ok();
    writeln!(s, "## Key Changes\nBullet list of the most important modifications.").ok();
    writeln!(
        s,
        "## Potential Risks\nBugs, regressions, security or performance concerns. Write \"None identified\" if there are none."
    )
    .ok();
    writeln!(s, "## Verification\nHow a reviewer can test or verify the change.").ok();
    writeln!(s, "## Files Changed\nBullet list of touched files with a few words each.").ok();

    writeln!(
        s,
        "\nRules:\n- Base every statement on the diff; do not invent files or behavior.\n- Keep it concise."
    )
    .ok();
    if truncated {
        writeln!(
            s,
            "- The diff was truncated; mention that the summary may be incomplete."
        )
        .ok();
    }

    writeln!(s, "\nDiff:\n```diff\n{body}\n```").ok();

    SummaryRequest {
        prompt: s,
        truncated,
    }
}

/// Splits `diff` on line boundaries into chunks of at most `max_chars` chars.
///
/// Every line keeps a trailing `\n`. A single line longer than the budget
/// becomes its own (oversized) chunk. Empty input yields no chunks.
pub fn chunk_diff(diff: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for line in diff.lines() {
        let line_chars = line.chars().count() + 1;
        if current_chars + line_chars > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        current.push_str(line);
        current.push('\n');
        current_chars += line_chars;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Prompt for one chunk of a large diff (`index` is 1-based).
pub fn build_chunk_prompt(chunk: &str, index: usize, total: usize) -> String {
    let mut s = String::with_capacity(chunk.len() + 256);
    writeln!(s, "Summarize this code diff chunk ({index}/{total}):").ok();
    writeln!(s, "```diff\n{chunk}```").ok();
    writeln!(
        s,
        "Highlight key changes, potential risks, and improvements. Answer in markdown."
    )
    .ok();
    s
}
