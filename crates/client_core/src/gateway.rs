//! Request/response calls against the labeling HTTP API. Nothing here retries.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{IndexRange, Item},
    protocol::{ItemsQuery, ItemsResponse, LabelPayload, ProgressResponse, RangeProgressQuery},
};
use tracing::debug;
use url::Url;

use crate::error::GatewayError;

const PROGRESS_ENDPOINT: &str = "/api/progress";
const ITEMS_ENDPOINT: &str = "/api/items";
const LABEL_ENDPOINT: &str = "/api/label";

#[async_trait]
pub trait LabelingApi: Send + Sync {
    async fn dataset_progress(&self) -> Result<ProgressResponse, GatewayError>;
    async fn range_progress(&self, range: IndexRange) -> Result<ProgressResponse, GatewayError>;
    async fn items(&self, query: ItemsQuery) -> Result<Vec<Item>, GatewayError>;
    async fn submit_label(&self, payload: &LabelPayload) -> Result<(), GatewayError>;
}

pub struct HttpLabelingApi {
    http: Client,
    server_url: String,
}

impl HttpLabelingApi {
    pub fn new(server_url: &str) -> Result<Self, GatewayError> {
        Ok(Self::with_client(Client::new(), normalize_server_url(server_url)?))
    }

    pub fn with_client(http: Client, server_url: String) -> Self {
        Self { http, server_url }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.server_url)
    }
}

/// Parses `raw` and strips any trailing slash so endpoint paths can be appended.
pub fn normalize_server_url(raw: &str) -> Result<String, GatewayError> {
    let parsed = Url::parse(raw.trim()).map_err(|source| GatewayError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[async_trait]
impl LabelingApi for HttpLabelingApi {
    async fn dataset_progress(&self) -> Result<ProgressResponse, GatewayError> {
        debug!(endpoint = PROGRESS_ENDPOINT, "fetching dataset progress");
        let response = self
            .http
            .get(self.endpoint(PROGRESS_ENDPOINT))
            .send()
            .await
            .map_err(transport(PROGRESS_ENDPOINT))?;
        read_json(PROGRESS_ENDPOINT, response).await
    }

    async fn range_progress(&self, range: IndexRange) -> Result<ProgressResponse, GatewayError> {
        debug!(
            endpoint = PROGRESS_ENDPOINT,
            start = range.start(),
            end = range.end(),
            "fetching range progress"
        );
        let response = self
            .http
            .get(self.endpoint(PROGRESS_ENDPOINT))
            .query(&RangeProgressQuery::from(range))
            .send()
            .await
            .map_err(transport(PROGRESS_ENDPOINT))?;
        read_json(PROGRESS_ENDPOINT, response).await
    }

    async fn items(&self, query: ItemsQuery) -> Result<Vec<Item>, GatewayError> {
        debug!(
            endpoint = ITEMS_ENDPOINT,
            start = query.start,
            end = query.end,
            skip_labeled = query.skip_labeled,
            show_labeled = query.show_labeled,
            "fetching items"
        );
        let response = self
            .http
            .get(self.endpoint(ITEMS_ENDPOINT))
            .query(&query)
            .send()
            .await
            .map_err(transport(ITEMS_ENDPOINT))?;
        let body: ItemsResponse = read_json(ITEMS_ENDPOINT, response).await?;
        Ok(body.items)
    }

    async fn submit_label(&self, payload: &LabelPayload) -> Result<(), GatewayError> {
        debug!(
            endpoint = LABEL_ENDPOINT,
            sample_index = payload.sample_index.0,
            "submitting label"
        );
        let response = self
            .http
            .post(self.endpoint(LABEL_ENDPOINT))
            .json(payload)
            .send()
            .await
            .map_err(transport(LABEL_ENDPOINT))?;
        ensure_success(LABEL_ENDPOINT, response).await?;
        Ok(())
    }
}

fn transport(endpoint: &'static str) -> impl FnOnce(reqwest::Error) -> GatewayError {
    move |source| GatewayError::Transport { endpoint, source }
}

async fn ensure_success(
    endpoint: &'static str,
    response: Response,
) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .map_err(|source| GatewayError::Transport { endpoint, source })?;
    Err(GatewayError::Rejected {
        endpoint,
        status,
        body,
    })
}

async fn read_json<T: DeserializeOwned>(
    endpoint: &'static str,
    response: Response,
) -> Result<T, GatewayError> {
    let bytes = ensure_success(endpoint, response)
        .await?
        .bytes()
        .await
        .map_err(transport(endpoint))?;
    serde_json::from_slice(&bytes).map_err(|source| GatewayError::Decode { endpoint, source })
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
