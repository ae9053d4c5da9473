//! Public entry for the pr-summarizer pipeline.
//!
//! A webhook delivery that passed [`webhook::validate_delivery`] runs through:
//!
//! 1) **Step 1: Diff fetch**
//!    - `GET /repos/{owner}/{repo}/pulls/{number}` as a unified diff
//!
//! 2) **Step 2: Summary**
//!    - Truncate the diff to the character budget and wrap it in the fixed
//!      template (Summary / Key Changes / Potential Risks / Verification /
//!      Files Changed)
//!    - One chat-completion call
//!
//! 3) **Step 3: Publish**
//!    - Post the summary as a PR conversation comment
//!
//! Any stage failure aborts the run; later stages are never reached.
//! Manual summaries ([`Summarizer::summarize_pr`]) use chunked mode instead of
//! truncation and may skip publishing.
//!
//! Plain `async fn` on concrete clients, no `async-trait`, no `Box<dyn ...>`.

pub mod config;
pub mod errors;
pub mod git_providers;
pub mod publish; // step 3
pub mod summary; // step 2
pub mod webhook;

use std::time::Instant;

use ai_llm_service::ChatCompletionService;
use tracing::{debug, info, warn};

use errors::{Error, MrResult};
use git_providers::{DiffPayload, GitHubClient, PostedComment, PullRequestRef};
use summary::{SummaryResult, build_chunk_prompt, build_summary_prompt, chunk_diff};
use webhook::WebhookEvent;

/// Result of a manual (URL-driven) summary.
#[derive(Debug, Clone)]
pub struct ManualSummary {
    pub pr: PullRequestRef,
    /// Concatenated `**Chunk i Summary**:` blocks.
    pub summary: String,
    pub chunks: usize,
    pub failed_chunks: usize,
    /// Present when the summary was posted.
    pub comment: Option<PostedComment>,
}

/// Pre-built clients plus options. Cheap to share behind `Arc`.
#[derive(Debug, Clone)]
pub struct Summarizer {
    github: GitHubClient,
    llm: ChatCompletionService,
    opts: SummaryOptions,
}

impl Summarizer {
    /// Builds the GitHub and LLM clients.
    ///
    /// # Errors
    /// [`Error::Config`] if a client cannot be constructed.
    pub fn new(cfg: &SummarizerConfig) -> MrResult<Self> {
        let github = GitHubClient::from_config(&cfg.github)?;
        let llm = ChatCompletionService::new(cfg.llm.clone())
            .map_err(|e| Error::Config(e.into()))?;
        debug!(model = llm.model(), base_api = %cfg.github.base_api, "summarizer: clients ready");
        Ok(Self {
            github,
            llm,
            opts: cfg.summary.clone(),
        })
    }

    /// Fetch → summarize → post for one accepted webhook event.
    ///
    /// # Logging
    /// `DEBUG` per step with timings, `INFO` on completion.
    pub async fn run_webhook(&self, event: &WebhookEvent) -> MrResult<PostedComment> {
        let pr = event.pull_request()?;
        let t0 = Instant::now();

        // Step 1: diff
        let diff = self.fetch_diff(&pr).await?;

        // Step 2: prompt + model
        let t2 = Instant::now();
        let request = build_summary_prompt(&diff.text, self.opts.max_diff_chars);
        debug!(
            %pr,
            prompt_len = request.prompt.len(),
            truncated = request.truncated,
            "step2: prompt built"
        );
        let markdown = self
            .llm
            .generate(&request.prompt)
            .await
            .map_err(|e| {
                warn!(%pr, error = %e, "step2: summarization failed");
                Error::Summarize(e)
            })?;
        let result = SummaryResult { markdown };
        debug!(
            %pr,
            summary_len = result.markdown.len(),
            elapsed_ms = t2.elapsed().as_millis(),
            "step2: summary generated"
        );

        // Step 3: publish
        let posted =
            publish::publish_summary(&self.github, &pr, &self.opts.comment_title, &result.markdown)
                .await?;

        info!(
            %pr,
            action = %event.action,
            comment_id = posted.id,
            total_ms = t0.elapsed().as_millis(),
            "pipeline: done"
        );
        Ok(posted)
    }

    /// Chunked summary of `pr`, optionally posted as a comment.
    ///
    /// Chunks are summarized one after another. A failed chunk is rendered as
    /// an error block; the call fails only when every chunk failed.
    ///
    /// # Errors
    /// [`Error::Fetch`], [`Error::Validation`] for an empty diff,
    /// [`Error::Summarize`] when no chunk succeeded, [`Error::Post`].
    pub async fn summarize_pr(&self, pr: &PullRequestRef, post: bool) -> MrResult<ManualSummary> {
        let t0 = Instant::now();
        let diff = self.fetch_diff(pr).await?;
        if diff.is_empty() {
            return Err(Error::Validation(format!("pull request {pr} has an empty diff")));
        }

        let chunks = chunk_diff(&diff.text, self.opts.chunk_chars);
        let total = chunks.len();
        debug!(%pr, chunks = total, "step2: diff chunked");

        let mut outcomes = Vec::with_capacity(total);
        let mut last_err = None;
        for (i, chunk) in chunks.iter().enumerate() {
            let idx = i + 1;
            let prompt = build_chunk_prompt(chunk, idx, total);
            match self.llm.generate(&prompt).await {
                Ok(text) => {
                    debug!(%pr, chunk = idx, total, "step2: chunk summarized");
                    outcomes.push(Some(text));
                }
                Err(e) => {
                    warn!(%pr, chunk = idx, total, error = %e, "step2: chunk failed");
                    outcomes.push(None);
                    last_err = Some(e);
                }
            }
        }

        let failed_chunks = outcomes.iter().filter(|o| o.is_none()).count();
        if failed_chunks == total {
            if let Some(e) = last_err {
                return Err(Error::Summarize(e));
            }
        }
        let summary = summary::render_chunk_summaries(&outcomes);

        let comment = if post {
            Some(publish::publish_summary(&self.github, pr, &self.opts.comment_title, &summary).await?)
        } else {
            None
        };

        info!(
            %pr,
            chunks = total,
            failed_chunks,
            posted = comment.is_some(),
            total_ms = t0.elapsed().as_millis(),
            "manual summary: done"
        );
        Ok(ManualSummary {
            pr: pr.clone(),
            summary,
            chunks: total,
            failed_chunks,
            comment,
        })
    }

    async fn fetch_diff(&self, pr: &PullRequestRef) -> MrResult<DiffPayload> {
        let t1 = Instant::now();
        debug!(%pr, "step1: fetch diff");
        let diff = self.github.get_diff(pr).await.map_err(|e| {
            warn!(%pr, error = %e, "step1: diff fetch failed");
            Error::Fetch(e)
        })?;
        debug!(
            %pr,
            diff_len = diff.len(),
            elapsed_ms = t1.elapsed().as_millis(),
            "step1: diff fetched"
        );
        Ok(diff)
    }
}

// -----------------------------------------------------------------------------
// Convenience re-exports for downstream users
// -----------------------------------------------------------------------------
pub use config::{SummarizerConfig, SummaryOptions};
pub use git_providers::parse_pr_url;
pub use webhook::{Delivery, IgnoreReason, WebhookConfig, WebhookError, validate_delivery};
