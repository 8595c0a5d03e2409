//! Local GraphQL server for exercising the client and workflows.
//!
//! Every request body is recorded together with its `Authorization` header,
//! and the reply is produced by a closure that sees the parsed request body.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{header, Request, Response};
use hyper_util::rt::TokioIo;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::client::GitHubClient;

pub const TEST_TOKEN: &str = "ghp_test";

type Responder = Arc<dyn Fn(&Value) -> (u16, Value) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

impl CapturedRequest {
    pub fn query(&self) -> &str {
        self.body["query"].as_str().unwrap_or_default()
    }

    pub fn variables(&self) -> &Value {
        &self.body["variables"]
    }
}

pub struct MockGraphQL {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    join: JoinHandle<()>,
}

impl MockGraphQL {
    pub async fn start(respond: impl Fn(&Value) -> (u16, Value) + Send + Sync + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let respond: Responder = Arc::new(respond);

        let captured = requests.clone();
        let join = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let respond = respond.clone();
                let captured = captured.clone();
                let service = service_fn(move |req: Request<Incoming>| {
                    let respond = respond.clone();
                    let captured = captured.clone();
                    async move {
                        let authorization = req
                            .headers()
                            .get(header::AUTHORIZATION)
                            .and_then(|value| value.to_str().ok())
                            .map(String::from);
                        let bytes = req
                            .into_body()
                            .collect()
                            .await
                            .map(|collected| collected.to_bytes())
                            .unwrap_or_default();
                        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

                        let (status, reply) = (*respond)(&body);
                        captured
                            .lock()
                            .expect("lock captured requests")
                            .push(CapturedRequest {
                                authorization,
                                body,
                            });

                        let response = Response::builder()
                            .status(status)
                            .header(header::CONTENT_TYPE, "application/json")
                            .body(Full::new(Bytes::from(reply.to_string())))
                            .expect("response");
                        Ok::<_, Infallible>(response)
                    }
                });
                tokio::spawn(async move {
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self {
            addr,
            requests,
            join,
        }
    }

    /// Serve every request with HTTP 200 and the output of `route`, which
    /// maps a GraphQL operation name to its `data` payload.
    pub async fn with_routes(
        route: impl Fn(&str, &Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self::start(move |body| {
            let query = body["query"].as_str().unwrap_or_default();
            let data = route(operation_name(query), &body["variables"]);
            (200, serde_json::json!({ "data": data }))
        })
        .await
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/graphql", self.addr)
    }

    pub fn client(&self) -> GitHubClient {
        GitHubClient::new(TEST_TOKEN.to_string(), &self.endpoint()).expect("client")
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().expect("lock captured requests").clone()
    }

    /// Names of the operations received, in order.
    pub fn operations(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|request| operation_name(request.query()).to_string())
            .collect()
    }
}

impl Drop for MockGraphQL {
    fn drop(&mut self) {
        self.join.abort();
    }
}

/// `query ProjectItems(...)` -> `ProjectItems`.
pub fn operation_name(query: &str) -> &str {
    query
        .split_whitespace()
        .skip_while(|word| *word != "query" && *word != "mutation")
        .nth(1)
        .map(|name| name.split('(').next().unwrap_or(name))
        .unwrap_or_default()
}

#[test]
fn test_operation_name() {
    assert_eq!(
        operation_name("\nquery ProjectItems($login: String!) { x }"),
        "ProjectItems"
    );
    assert_eq!(operation_name("mutation AddItem($a: ID!) {}"), "AddItem");
    assert_eq!(operation_name("query RateLimit {"), "RateLimit");
    assert_eq!(operation_name("{ viewer { login } }"), "");
}
