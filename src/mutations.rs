//! Write-side GraphQL operations. Each call is exactly one API request.

use serde::Deserialize;
use serde_json::json;

use crate::client::GitHubClient;
use crate::error::Result;

const ADD_ITEM_MUTATION: &str = r#"
mutation AddItem($projectId: ID!, $contentId: ID!) {
    addProjectV2ItemById(input: { projectId: $projectId, contentId: $contentId }) {
        item {
            id
        }
    }
}
"#;

const SET_NUMBER_FIELD_MUTATION: &str = r#"
mutation SetNumberField($projectId: ID!, $itemId: ID!, $fieldId: ID!, $value: Float!) {
    updateProjectV2ItemFieldValue(
        input: { projectId: $projectId, itemId: $itemId, fieldId: $fieldId, value: { number: $value } }
    ) {
        projectV2Item {
            id
        }
    }
}
"#;

#[derive(Deserialize)]
struct AddItemResponse {
    #[serde(rename = "addProjectV2ItemById")]
    add_item: AddItemResult,
}

#[derive(Deserialize)]
struct AddItemResult {
    item: Option<ItemRef>,
}

#[derive(Deserialize)]
struct ItemRef {
    id: String,
}

/// Add an issue or pull request to the project. Adding content that is
/// already on the board returns the existing item.
pub async fn add_item(
    client: &GitHubClient,
    project_id: &str,
    content_id: &str,
) -> Result<Option<String>> {
    let variables = json!({
        "projectId": project_id,
        "contentId": content_id,
    });
    let response: AddItemResponse = client.query(ADD_ITEM_MUTATION, Some(variables)).await?;
    Ok(response.add_item.item.map(|item| item.id))
}

/// Write a number field value on a project item.
pub async fn set_number_field(
    client: &GitHubClient,
    project_id: &str,
    item_id: &str,
    field_id: &str,
    value: u64,
) -> Result<()> {
    let variables = json!({
        "projectId": project_id,
        "itemId": item_id,
        "fieldId": field_id,
        "value": value as f64,
    });
    let _: serde_json::Value = client
        .query(SET_NUMBER_FIELD_MUTATION, Some(variables))
        .await?;
    Ok(())
}
