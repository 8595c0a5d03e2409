use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SyncError};

pub const DEFAULT_API_ENDPOINT: &str = "https://api.github.com/graphql";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Prefixes of GitHub personal access tokens (classic and fine-grained).
const TOKEN_PREFIXES: [&str; 2] = ["ghp_", "github_pat_"];

pub struct GitHubClient {
    http: Client,
    token: String,
    endpoint: Url,
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Deserialize, Debug)]
struct GraphQLError {
    message: String,
}

impl<T> GraphQLResponse<T> {
    fn into_result(self) -> Result<T> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            return Err(SyncError::GraphQL {
                messages: errors.into_iter().map(|e| e.message).collect(),
            });
        }

        self.data.ok_or(SyncError::EmptyResponse)
    }
}

impl GitHubClient {
    pub fn new(token: String, endpoint: &str) -> Result<Self> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| SyncError::InvalidUrl(format!("{endpoint}: {e}")))?;

        if !looks_like_pat(&token) {
            tracing::warn!(
                "GitHub token does not start with 'ghp_' or 'github_pat_'. \
                 If an error occurs, check that the token is configured properly."
            );
        }

        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            token,
            endpoint,
        })
    }

    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<T> {
        let request = GraphQLRequest { query, variables };

        tracing::debug!(endpoint = %self.endpoint, "sending GraphQL request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SyncError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        let gql_response: GraphQLResponse<T> = response.json().await?;
        gql_response.into_result()
    }
}

fn looks_like_pat(token: &str) -> bool {
    TOKEN_PREFIXES.iter().any(|prefix| token.starts_with(prefix))
}
