//! HTTP client for GraphQL endpoints

use crate::config::{check_url_scheme, url_property, Config};
use crate::error::{ClientError, ConfigError, GraphQLClientError};
use crate::messages;
use crate::types::{GraphQLRequest, GraphQLResponse};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Client that sends GraphQL documents as JSON POST requests
#[derive(Clone)]
pub struct DynamicGraphQLClient {
    client: Client,
    url: String,
}

impl DynamicGraphQLClient {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self, GraphQLClientError> {
        Self::build(url.into(), timeout_secs, &BTreeMap::new())
    }

    /// Create a client for the named client in `config`
    pub fn from_named(name: &str, config: &Config) -> Result<Self, GraphQLClientError> {
        let url = config.client_url(name)?;
        check_url_scheme(&url_property(name), &url)?;
        let settings = config.client(name);
        let client = Self::build(url, settings.timeout_secs, &settings.headers)?;
        tracing::info!("GraphQL client '{}' initialized (url: {})", name, client.url);
        Ok(client)
    }

    fn build(
        url: String,
        timeout_secs: u64,
        headers: &BTreeMap<String, String>,
    ) -> Result<Self, GraphQLClientError> {
        let mut default_headers = HeaderMap::new();
        for (key, value) in headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ConfigError::Validation(format!("invalid header name {}: {}", key, e)))?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ConfigError::Validation(format!("invalid value for header {}: {}", key, e))
            })?;
            default_headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(default_headers)
            .build()?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST the request and parse the GraphQL response
    ///
    /// GraphQL-level errors come back inside the response, not as `Err`.
    pub async fn execute(
        &self,
        request: &GraphQLRequest,
    ) -> Result<GraphQLResponse, GraphQLClientError> {
        tracing::debug!("POST {} ({} byte query)", self.url, request.query.len());

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("GraphQL request to {} failed: {}", self.url, e);
                GraphQLClientError::Http(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GraphQLClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(parse_response(&body)?)
    }

    /// Execute a query with optional variables
    pub async fn query(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<GraphQLResponse, GraphQLClientError> {
        let mut request = GraphQLRequest::new(query);
        request.variables = variables;
        self.execute(&request).await
    }
}

/// Parse a response body into a [`GraphQLResponse`]
///
/// The body must be a JSON object with at least one of `data` or `errors`.
pub fn parse_response(body: &str) -> Result<GraphQLResponse, ClientError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        tracing::debug!("Response is not JSON: {}", e);
        messages::cannot_parse_response(body)
    })?;

    let is_graphql = value
        .as_object()
        .is_some_and(|o| o.contains_key("data") || o.contains_key("errors"));
    if !is_graphql {
        return Err(messages::cannot_parse_response(body));
    }

    serde_json::from_value(value).map_err(|e| {
        tracing::debug!("Response has unexpected shape: {}", e);
        messages::cannot_parse_response(body)
    })
}
