//! Read-side GraphQL operations against an organization's project board.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::client::GitHubClient;
use crate::error::{Result, SyncError};
use crate::pagination::{paginate, PAGE_SIZE};
use crate::responses::{Connection, OrganizationResponse};
use crate::types::{ProjectField, ProjectItem, SingleSelectValue};

const PROJECT_ID_QUERY: &str = r#"
query ProjectId($login: String!, $number: Int!) {
    organization(login: $login) {
        projectV2(number: $number) {
            id
        }
    }
}
"#;

const PROJECT_FIELDS_QUERY: &str = r#"
query ProjectFields($login: String!, $number: Int!, $first: Int!, $after: String) {
    organization(login: $login) {
        projectV2(number: $number) {
            fields(first: $first, after: $after) {
                pageInfo {
                    hasNextPage
                    endCursor
                }
                nodes {
                    ... on ProjectV2FieldCommon {
                        id
                        name
                        dataType
                    }
                    ... on ProjectV2SingleSelectField {
                        options {
                            id
                            name
                        }
                    }
                }
            }
        }
    }
}
"#;

const PROJECT_ITEMS_QUERY: &str = r#"
query ProjectItems($login: String!, $number: Int!, $first: Int!, $after: String) {
    organization(login: $login) {
        projectV2(number: $number) {
            items(first: $first, after: $after) {
                pageInfo {
                    hasNextPage
                    endCursor
                }
                nodes {
                    id
                    content {
                        ... on Issue {
                            title
                        }
                        ... on PullRequest {
                            title
                        }
                        ... on DraftIssue {
                            title
                        }
                    }
                    fieldValues(first: 100) {
                        nodes {
                            ... on ProjectV2ItemFieldSingleSelectValue {
                                optionId
                                field {
                                    ... on ProjectV2FieldCommon {
                                        id
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
"#;

const SEARCH_ISSUES_QUERY: &str = r#"
query RecentIssues($query: String!, $first: Int!, $after: String) {
    search(first: $first, after: $after, type: ISSUE, query: $query) {
        pageInfo {
            hasNextPage
            endCursor
        }
        nodes {
            ... on Issue {
                id
            }
            ... on PullRequest {
                id
            }
        }
    }
}
"#;

#[derive(Deserialize)]
struct ProjectIdNode {
    id: String,
}

#[derive(Deserialize)]
struct FieldsNode {
    fields: Connection<RawField>,
}

/// Field nodes that implement none of the requested fragments come back as
/// `{}`, so every property is optional here.
#[derive(Deserialize)]
struct RawField {
    id: Option<String>,
    name: Option<String>,
    #[serde(rename = "dataType")]
    data_type: Option<String>,
    #[serde(default)]
    options: Vec<crate::types::FieldOption>,
}

#[derive(Deserialize)]
struct ItemsNode {
    items: Connection<RawItem>,
}

#[derive(Deserialize)]
struct RawItem {
    id: String,
    content: Option<RawContent>,
    #[serde(rename = "fieldValues")]
    field_values: Connection<RawFieldValue>,
}

#[derive(Deserialize)]
struct RawContent {
    title: Option<String>,
}

#[derive(Deserialize)]
struct RawFieldValue {
    #[serde(rename = "optionId")]
    option_id: Option<String>,
    field: Option<RawFieldRef>,
}

#[derive(Deserialize)]
struct RawFieldRef {
    id: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    search: Connection<SearchNode>,
}

#[derive(Deserialize)]
struct SearchNode {
    id: Option<String>,
}

impl From<RawItem> for ProjectItem {
    fn from(raw: RawItem) -> Self {
        let values = raw
            .field_values
            .nodes
            .into_iter()
            .filter_map(|value| {
                let field_id = value.field?.id?;
                let option_id = value.option_id?;
                Some(SingleSelectValue {
                    field_id,
                    option_id,
                })
            })
            .collect();

        Self {
            id: raw.id,
            title: raw.content.and_then(|c| c.title),
            values,
        }
    }
}

impl RawField {
    fn into_field(self) -> Option<ProjectField> {
        Some(ProjectField {
            id: self.id?,
            name: self.name?,
            data_type: self.data_type.unwrap_or_default(),
            options: self.options,
        })
    }
}

fn not_found(org: &str, number: u32) -> SyncError {
    SyncError::ProjectNotFound {
        org: org.to_string(),
        number,
    }
}

/// Resolve the opaque node ID of an organization's project.
pub async fn project_id(client: &GitHubClient, org: &str, number: u32) -> Result<String> {
    let variables = json!({ "login": org, "number": number });
    let response: OrganizationResponse<ProjectIdNode> =
        client.query(PROJECT_ID_QUERY, Some(variables)).await?;

    response
        .into_project()
        .map(|project| project.id)
        .ok_or_else(|| not_found(org, number))
}

/// Fetch every field on the project.
pub async fn fields(client: &GitHubClient, org: &str, number: u32) -> Result<Vec<ProjectField>> {
    let raw = paginate(|after| async move {
        let variables = json!({
            "login": org,
            "number": number,
            "first": PAGE_SIZE,
            "after": after,
        });
        let response: OrganizationResponse<FieldsNode> =
            client.query(PROJECT_FIELDS_QUERY, Some(variables)).await?;
        let project = response.into_project().ok_or_else(|| not_found(org, number))?;
        Ok(project.fields.into_page())
    })
    .await?;

    Ok(raw.into_iter().filter_map(RawField::into_field).collect())
}

/// Fetch every field on the project, keyed by field name.
pub async fn fields_by_name(
    client: &GitHubClient,
    org: &str,
    number: u32,
) -> Result<HashMap<String, ProjectField>> {
    Ok(index_by_name(fields(client, org, number).await?))
}

pub fn index_by_name(fields: Vec<ProjectField>) -> HashMap<String, ProjectField> {
    fields
        .into_iter()
        .map(|field| (field.name.clone(), field))
        .collect()
}

/// Fetch every item on the project along with its single-select values.
pub async fn items(client: &GitHubClient, org: &str, number: u32) -> Result<Vec<ProjectItem>> {
    let raw = paginate(|after| async move {
        let variables = json!({
            "login": org,
            "number": number,
            "first": PAGE_SIZE,
            "after": after,
        });
        let response: OrganizationResponse<ItemsNode> =
            client.query(PROJECT_ITEMS_QUERY, Some(variables)).await?;
        let project = response.into_project().ok_or_else(|| not_found(org, number))?;
        Ok(project.items.into_page())
    })
    .await?;

    Ok(raw.into_iter().map(ProjectItem::from).collect())
}

/// Build the search string for open issues and pull requests updated on or
/// after `since`.
pub fn recent_issues_search(org: &str, since: NaiveDate, exclude_authors: &[String]) -> String {
    let mut terms = vec![
        format!("org:{org}"),
        "state:open".to_string(),
        format!("updated:>={}", since.format("%Y-%m-%d")),
    ];
    terms.extend(exclude_authors.iter().map(|author| format!("-author:{author}")));
    terms.join(" ")
}

/// Node IDs of open issues and pull requests in `org` updated since `since`.
pub async fn recent_open_issue_ids(
    client: &GitHubClient,
    org: &str,
    since: NaiveDate,
    exclude_authors: &[String],
) -> Result<Vec<String>> {
    let search = recent_issues_search(org, since, exclude_authors);
    tracing::debug!(%search, "searching issues");

    let nodes = paginate(|after| {
        let variables = json!({
            "query": search,
            "first": PAGE_SIZE,
            "after": after,
        });
        async move {
            let response: SearchResponse =
                client.query(SEARCH_ISSUES_QUERY, Some(variables)).await?;
            Ok(response.search.into_page())
        }
    })
    .await?;

    Ok(nodes.into_iter().filter_map(|node| node.id).collect())
}
