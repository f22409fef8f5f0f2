use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::engine::{InspectError, InspectorOptions};
use crate::models::{GlobalsResponse, InspectResponse};

/// The sole boundary between the tree engine and the remote service.
///
/// Production uses `HttpClient`; tests script responses in process.
#[async_trait]
pub trait InspectClient: Send + Sync {
  /// The one-time root listing: names of the top-level inspectable values,
  /// in display order.
  async fn fetch_globals(&self) -> Result<Vec<String>, InspectError>;

  /// Raw `details` payload for one serialized path.
  ///
  /// A response whose `error` field is set surfaces as
  /// `InspectError::Remote`; failures of the transport itself as
  /// `InspectError::Transport`.
  async fn fetch_details(&self, path: &str) -> Result<Value, InspectError>;
}

/// Client for the remote inspection endpoints.
#[derive(Clone)]
pub struct HttpClient {
  base_url: String,
  http: reqwest::Client,
}

impl HttpClient {
  pub fn new(base_url: &str, options: &InspectorOptions) -> Result<Self, InspectError> {
    let http = reqwest::Client::builder()
      .timeout(options.request_timeout)
      .build()
      .map_err(|e| InspectError::Transport(e.to_string()))?;
    Ok(Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      http,
    })
  }
}

#[async_trait]
impl InspectClient for HttpClient {
  async fn fetch_globals(&self) -> Result<Vec<String>, InspectError> {
    let url = format!("{}/varinspector/globals", self.base_url);
    let body: GlobalsResponse = send(self.http.get(&url)).await?;
    Ok(body.globals)
  }

  async fn fetch_details(&self, path: &str) -> Result<Value, InspectError> {
    debug!(%path, "inspect request");
    let url = format!("{}/varinspector/inspect", self.base_url);
    // The serialized path is the exact request parameter; reverse-parsing it
    // into a navigable location is entirely the server's concern.
    let body: InspectResponse = send(self.http.get(&url).query(&[("path", path)])).await?;
    if let Some(message) = body.error {
      return Err(InspectError::Remote(message));
    }
    body
      .details
      .ok_or_else(|| InspectError::Transport("response carried neither error nor details".into()))
  }
}

async fn send<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, InspectError> {
  let response = request
    .send()
    .await
    .map_err(|e| InspectError::Transport(e.to_string()))?;
  if !response.status().is_success() {
    return Err(InspectError::Transport(format!("HTTP {}", response.status())));
  }
  response
    .json::<T>()
    .await
    .map_err(|e| InspectError::Transport(e.to_string()))
}
