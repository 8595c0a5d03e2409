//! Shared GraphQL response types used across commands.

use serde::{Deserialize, Deserializer};

/// Pagination info for cursor-based pagination.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PageInfo {
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
}

/// A GraphQL connection: one page of nodes plus its page info.
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(deserialize_with = "skip_null_nodes")]
    pub nodes: Vec<T>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
}

/// `nodes` entries are null for content the token cannot see.
fn skip_null_nodes<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let nodes = Vec::<Option<T>>::deserialize(deserializer)?;
    Ok(nodes.into_iter().flatten().collect())
}

impl<T> Connection<T> {
    pub fn into_page(self) -> (Vec<T>, PageInfo) {
        (self.nodes, self.page_info)
    }
}

/// `organization { projectV2(number: N) { ... } }` wrapper.
#[derive(Deserialize)]
pub struct OrganizationResponse<P> {
    pub organization: Option<OrganizationProject<P>>,
}

#[derive(Deserialize)]
pub struct OrganizationProject<P> {
    #[serde(rename = "projectV2")]
    pub project: Option<P>,
}

impl<P> OrganizationResponse<P> {
    pub fn into_project(self) -> Option<P> {
        self.organization.and_then(|org| org.project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_connection_without_page_info_is_last_page() {
        let conn: Connection<u32> = serde_json::from_value(json!({ "nodes": [1, 2] })).unwrap();
        let (nodes, info) = conn.into_page();
        assert_eq!(nodes, vec![1, 2]);
        assert!(!info.has_next_page);
        assert!(info.end_cursor.is_none());
    }

    #[test]
    fn test_null_nodes_are_skipped() {
        let conn: Connection<serde_json::Value> = serde_json::from_value(json!({
            "nodes": [{ "id": "I_1" }, null, { "id": "I_2" }],
            "pageInfo": { "hasNextPage": true, "endCursor": "abc" }
        }))
        .unwrap();
        let (nodes, info) = conn.into_page();
        assert_eq!(nodes, vec![json!({ "id": "I_1" }), json!({ "id": "I_2" })]);
        assert!(info.has_next_page);
    }

    #[test]
    fn test_missing_project_resolves_to_none() {
        let resp: OrganizationResponse<serde_json::Value> =
            serde_json::from_value(json!({ "organization": { "projectV2": null } })).unwrap();
        assert!(resp.into_project().is_none());

        let resp: OrganizationResponse<serde_json::Value> =
            serde_json::from_value(json!({ "organization": null })).unwrap();
        assert!(resp.into_project().is_none());
    }
}
