use chrono::{Days, Local, NaiveDate};
use tabled::Tabled;

use crate::cli::AddRecentArgs;
use crate::client::GitHubClient;
use crate::config::{Config, ProjectRef};
use crate::error::{Result, SyncError};
use crate::usage::Usage;
use crate::{mutations, output, project};

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "Issue / PR ID")]
    id: String,
}

/// First day of the lookback window.
fn since(today: NaiveDate, days: u32) -> Result<NaiveDate> {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .ok_or(SyncError::InvalidDays(days))
}

/// Add open issues and pull requests updated within the lookback window to
/// the project. GitHub ignores content that is already on the board.
pub async fn run(
    client: &GitHubClient,
    config: &Config,
    target: &ProjectRef,
    args: AddRecentArgs,
) -> Result<()> {
    let since = since(Local::now().date_naive(), config.days(args.days))?;
    let exclude_authors = config.exclude_authors(&args.exclude_authors);

    let usage = Usage::start(client).await?;
    let project_id = project::project_id(client, &target.org, target.number).await?;

    tracing::info!("getting issues updated since {since}...");
    let issue_ids =
        project::recent_open_issue_ids(client, &target.org, since, &exclude_authors).await?;
    tracing::info!("found {} recent issues", issue_ids.len());

    if args.dry_run {
        output::print_table(&issue_ids, |id| IssueRow { id: id.clone() });
    } else {
        tracing::info!("adding issues (nothing happens if already added)...");
        let total = issue_ids.len();
        for (i, issue_id) in issue_ids.iter().enumerate() {
            tracing::info!("adding issue {}/{}", i + 1, total);
            let item_id = mutations::add_item(client, &project_id, issue_id).await?;
            tracing::debug!(issue_id = %issue_id, item_id = ?item_id, "added");
        }
    }

    usage.finish(client).await?;

    if !args.dry_run {
        output::print_message(&format!(
            "Added {} issues to {} project #{}",
            issue_ids.len(),
            target.org,
            target.number
        ));
    }

    Ok(())
}
