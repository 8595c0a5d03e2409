use tabled::Tabled;

use crate::cli::PainScoresArgs;
use crate::client::GitHubClient;
use crate::config::ProjectRef;
use crate::error::Result;
use crate::output::{self, truncate};
use crate::score::{self, PainScore};
use crate::usage::Usage;
use crate::{mutations, project};

#[derive(Tabled)]
struct ScoreRow {
    #[tabled(rename = "Score")]
    score: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Item ID")]
    id: String,
}

impl From<&PainScore> for ScoreRow {
    fn from(score: &PainScore) -> Self {
        Self {
            score: score.score,
            title: truncate(score.title.as_deref().unwrap_or("-"), 60),
            id: score.item_id.clone(),
        }
    }
}

/// Recompute the pain score of every item and write it to the project.
pub async fn run(client: &GitHubClient, target: &ProjectRef, args: PainScoresArgs) -> Result<()> {
    let usage = Usage::start(client).await?;

    tracing::info!("getting project fields...");
    let fields_by_name = project::fields_by_name(client, &target.org, target.number).await?;
    let ranks = score::option_ranks(&fields_by_name)?;
    let pain_score_field_id = score::pain_score_field_id(&fields_by_name)?;

    tracing::info!("getting items...");
    let items = project::items(client, &target.org, target.number).await?;

    tracing::info!("calculating pain scores for {} items...", items.len());
    let scores = score::pain_scores(&items, &ranks);

    if args.dry_run {
        output::print_table(&scores, |s| ScoreRow::from(s));
    } else {
        let project_id = project::project_id(client, &target.org, target.number).await?;
        tracing::info!("updating project items with pain scores...");
        let total = scores.len();
        for (i, pain_score) in scores.iter().enumerate() {
            tracing::info!("updating pain score for item {}/{}", i + 1, total);
            mutations::set_number_field(
                client,
                &project_id,
                &pain_score.item_id,
                pain_score_field_id,
                pain_score.score,
            )
            .await?;
        }
    }

    usage.finish(client).await?;

    if !args.dry_run {
        output::print_message(&format!(
            "Updated pain scores for {} of {} items",
            scores.len(),
            items.len()
        ));
    }

    Ok(())
}
