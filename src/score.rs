//! Pain-score calculation.
//!
//! Each of the scored single-select fields has options named with a leading
//! rank digit ("3 - High"). An item's pain score is the product of the ranks
//! of whichever scored fields it has a value for.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Result, SyncError};
use crate::types::{ProjectField, ProjectItem};

pub const SCORED_FIELDS: [&str; 3] = ["Type", "Priority", "Likelihood"];

pub const PAIN_SCORE_FIELD: &str = "User Pain Score";

/// `field ID -> (option ID -> rank)` for every scored field on the project.
pub type OptionRanks = HashMap<String, HashMap<String, u64>>;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PainScore {
    pub item_id: String,
    pub title: Option<String>,
    pub score: u64,
}

/// Parse the rank from the first character of an option name.
pub fn option_rank(name: &str) -> Option<u64> {
    name.chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .map(u64::from)
}

/// Build rank tables for the scored fields present on the project.
pub fn option_ranks(fields_by_name: &HashMap<String, ProjectField>) -> Result<OptionRanks> {
    let mut ranks = OptionRanks::new();

    for name in SCORED_FIELDS {
        let Some(field) = fields_by_name.get(name) else {
            tracing::debug!("project has no {name} field");
            continue;
        };

        if !field.is_single_select() {
            return Err(SyncError::NotSingleSelect(field.name.clone()));
        }

        let options = field
            .options
            .iter()
            .map(|option| {
                option_rank(&option.name)
                    .map(|rank| (option.id.clone(), rank))
                    .ok_or_else(|| SyncError::InvalidOptionRank {
                        field: field.name.clone(),
                        option: option.name.clone(),
                    })
            })
            .collect::<Result<HashMap<_, _>>>()?;

        ranks.insert(field.id.clone(), options);
    }

    Ok(ranks)
}

/// Score every item that has at least one scored field set.
pub fn pain_scores(items: &[ProjectItem], ranks: &OptionRanks) -> Vec<PainScore> {
    items
        .iter()
        .filter_map(|item| {
            let score = item
                .values
                .iter()
                .filter_map(|value| ranks.get(&value.field_id)?.get(&value.option_id))
                .fold(None, |acc: Option<u64>, rank| Some(acc.unwrap_or(1) * rank))?;

            Some(PainScore {
                item_id: item.id.clone(),
                title: item.title.clone(),
                score,
            })
        })
        .collect()
}

/// ID of the number field the scores are written to.
pub fn pain_score_field_id(fields_by_name: &HashMap<String, ProjectField>) -> Result<&str> {
    let field = fields_by_name
        .get(PAIN_SCORE_FIELD)
        .ok_or_else(|| SyncError::FieldNotFound(PAIN_SCORE_FIELD.to_string()))?;

    if !field.is_number() {
        return Err(SyncError::NotNumber(field.name.clone()));
    }

    Ok(&field.id)
}
