use serde_json::json;

use crate::client::GitHubClient;
use crate::error::Result;
use crate::output;
use crate::usage::rate_limit_remaining;

pub async fn show(client: &GitHubClient) -> Result<()> {
    let remaining = rate_limit_remaining(client).await?;

    output::print_item(&json!({ "remaining": remaining }), |_| {
        println!("Remaining rate limit points: {remaining}");
    });

    Ok(())
}
