//! GraphQL rate-limit accounting around a workflow run.

use serde::Deserialize;

use crate::client::GitHubClient;
use crate::error::Result;

const RATE_LIMIT_QUERY: &str = r#"
query RateLimit {
    rateLimit {
        remaining
    }
}
"#;

#[derive(Deserialize)]
struct RateLimitResponse {
    #[serde(rename = "rateLimit")]
    rate_limit: RateLimit,
}

#[derive(Deserialize)]
struct RateLimit {
    remaining: u64,
}

/// Remaining GraphQL rate-limit points for the authenticated token.
pub async fn rate_limit_remaining(client: &GitHubClient) -> Result<u64> {
    let response: RateLimitResponse = client.query(RATE_LIMIT_QUERY, None).await?;
    Ok(response.rate_limit.remaining)
}

pub struct Usage {
    before: u64,
}

impl Usage {
    pub async fn start(client: &GitHubClient) -> Result<Self> {
        let before = rate_limit_remaining(client).await?;
        tracing::info!("remaining rate limit points: {before}");
        Ok(Self { before })
    }

    /// Report points consumed since [`Usage::start`].
    pub async fn finish(self, client: &GitHubClient) -> Result<u64> {
        let after = rate_limit_remaining(client).await?;
        let used = points_used(self.before, after);
        tracing::info!("remaining rate limit points: {after} (used {used})");
        Ok(used)
    }
}

/// The hourly window may reset during a run, leaving more points than we
/// started with.
fn points_used(before: u64, after: u64) -> u64 {
    before.saturating_sub(after)
}
