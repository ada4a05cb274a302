//! Minimal GraphQL-over-HTTP client.

use crate::error::IndexerError;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::trace;

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

/// Sends GraphQL documents to a single endpoint with optional bearer auth.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: Client,
    url: String,
    bearer_token: Option<String>,
}

impl GraphQlClient {
    pub fn new(http: Client, url: impl Into<String>, bearer_token: Option<String>) -> Self {
        Self {
            http,
            url: url.into(),
            bearer_token,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Executes `query` with `variables` and decodes the `data` member.
    ///
    /// # Errors
    /// Returns an [`IndexerError`] on transport failure, non-success status,
    /// GraphQL errors or an undecodable body.
    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, IndexerError> {
        let mut request = self
            .http
            .post(&self.url)
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        trace!(url = %self.url, status = status.as_u16(), bytes = body.len(), "graphql response");

        if !status.is_success() {
            return Err(IndexerError::Status {
                status: status.as_u16(),
                body,
            });
        }
        decode_response(&body)
    }
}

fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T, IndexerError> {
    let response: GraphQlResponse<T> =
        serde_json::from_str(body).map_err(|e| IndexerError::Decode(e.to_string()))?;

    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(IndexerError::GraphQl(messages.join("; ")));
    }
    response.data.ok_or(IndexerError::MissingData)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Count {
        count: u32,
    }

    #[test]
    fn test_decode_data() {
        let count: Count = decode_response(r#"{"data": {"count": 3}}"#).unwrap();
        assert_eq!(count.count, 3);
    }

    #[test]
    fn test_decode_errors_take_precedence() {
        let result: Result<Count, _> = decode_response(
            r#"{"data": null, "errors": [{"message": "bad field"}, {"message": "timeout"}]}"#,
        );
        match result {
            Err(IndexerError::GraphQl(message)) => assert_eq!(message, "bad field; timeout"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_decode_missing_data() {
        let result: Result<Count, _> = decode_response(r#"{}"#);
        assert!(matches!(result, Err(IndexerError::MissingData)));

        let result: Result<Count, _> = decode_response("not json");
        assert!(matches!(result, Err(IndexerError::Decode(_))));
    }
}
