//! Client for the external semantic product ranking service.
//!
//! The service answers `GET {base_url}/search?q=...&top_k=...` with a JSON
//! array of objects carrying at least an `id` field. The service is best
//! effort by contract: any transport failure, non-2xx status, non-JSON body,
//! or non-array body is reported as [`SemanticLookup::Degraded`], never as
//! an error, so callers cannot accidentally treat degradation as fatal.

use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{instrument, warn};

use partdesk_core::ProductId;

use crate::config::SemanticConfig;
use crate::search::CandidateSource;

/// Outcome of a semantic lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticLookup {
    /// Ranked, deduplicated candidate product ids. May be empty when the
    /// service answered but found no matches.
    Candidates(Vec<ProductId>),
    /// The service could not be consulted; callers fall back to the
    /// substring query path.
    Degraded,
}

/// HTTP client for the semantic ranking service.
#[derive(Clone)]
pub struct SemanticClient {
    client: reqwest::Client,
    base_url: String,
}

impl SemanticClient {
    /// Create a new client with the configured request timeout.
    ///
    /// The timeout bounds the whole request; a service that does not answer
    /// in time degrades to the fallback path instead of stalling the search.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the underlying client cannot be built.
    pub fn new(config: &SemanticConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CandidateSource for SemanticClient {
    #[instrument(skip(self))]
    async fn lookup(&self, query: &str, top_k: usize) -> SemanticLookup {
        let url = format!("{}/search", self.base_url);

        let response = match self
            .client
            .get(&url)
            .query(&[("q", query), ("top_k", &top_k.to_string())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "semantic lookup unreachable, degrading to fallback");
                return SemanticLookup::Degraded;
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "semantic lookup returned non-success status");
            return SemanticLookup::Degraded;
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "semantic lookup returned malformed JSON");
                return SemanticLookup::Degraded;
            }
        };

        parse_candidates(&body).map_or_else(
            || {
                warn!("semantic lookup returned a non-array body");
                SemanticLookup::Degraded
            },
            SemanticLookup::Candidates,
        )
    }
}

/// Extract a deduplicated, order-preserving candidate id list from the
/// response body. Returns `None` when the body is not an array; elements
/// without an integer-coercible `id` are skipped.
fn parse_candidates(body: &Value) -> Option<Vec<ProductId>> {
    let rows = body.as_array()?;
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for row in rows {
        if let Some(id) = row.get("id").and_then(coerce_id)
            && seen.insert(id)
        {
            ids.push(ProductId::new(id));
        }
    }

    Some(ids)
}

/// Accept both JSON integers and numeric strings for `id`.
fn coerce_id(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_candidates_orders_and_dedupes() {
        let body = json!([
            {"id": 101, "text": "steel bolt", "score": 0.91},
            {"id": 102, "text": "steel nut", "score": 0.88},
            {"id": 101, "text": "steel bolt", "score": 0.80},
        ]);

        let ids = parse_candidates(&body).unwrap();
        assert_eq!(ids, vec![ProductId::new(101), ProductId::new(102)]);
    }

    #[test]
    fn test_parse_candidates_skips_rows_without_id() {
        let body = json!([
            {"text": "no id here"},
            {"id": 7},
            {"id": "8"},
            {"id": "not-a-number"},
        ]);

        let ids = parse_candidates(&body).unwrap();
        assert_eq!(ids, vec![ProductId::new(7), ProductId::new(8)]);
    }

    #[test]
    fn test_parse_candidates_empty_array() {
        let ids = parse_candidates(&json!([])).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_parse_candidates_rejects_non_array() {
        assert!(parse_candidates(&json!({"error": "oops"})).is_none());
        assert!(parse_candidates(&json!("plain string")).is_none());
        assert!(parse_candidates(&json!(null)).is_none());
    }
}
