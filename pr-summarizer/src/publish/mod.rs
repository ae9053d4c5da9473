//! Step 3: Publisher.
//!
//! Posts the rendered summary as a PR conversation comment. A failure is
//! logged and returned; there is no retry.

use std::time::Instant;

use tracing::{error, info};

use crate::errors::{Error, MrResult};
use crate::git_providers::{GitHubClient, PostedComment, PullRequestRef};
use crate::summary::render_comment;

/// Posts `summary` under a bold `title` line on `pr`.
///
/// # Errors
/// [`Error::Post`] wrapping the provider failure.
pub async fn publish_summary(
    github: &GitHubClient,
    pr: &PullRequestRef,
    title: &str,
    summary: &str,
) -> MrResult<PostedComment> {
    let started = Instant::now();
    let body = render_comment(title, summary);

    match github.create_comment(pr, &body).await {
        Ok(posted) => {
            info!(
                %pr,
                comment_id = posted.id,
                elapsed_ms = started.elapsed().as_millis(),
                "publish: summary posted"
            );
            Ok(posted)
        }
        Err(e) => {
            error!(%pr, error = %e, "publish: failed to post summary");
            Err(Error::Post(e))
        }
    }
}
