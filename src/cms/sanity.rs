//! HTTP client for the Sanity query and mutation APIs

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::{CmsError, ContentClient, Document};
use crate::config::CmsConfig;

/// Talks to `https://<project>.api.sanity.io/v<version>/data/...`
pub struct SanityClient {
    http: reqwest::Client,
    config: CmsConfig,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct MutateResponse {
    #[serde(default)]
    results: Vec<MutateResult>,
}

#[derive(Debug, Deserialize)]
struct MutateResult {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    document: Option<Document>,
}

impl SanityClient {
    /// Create a client; fails when no project is configured
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        if config.project_id.trim().is_empty() && config.api_host.is_none() {
            return Err(CmsError::NotConfigured(
                "cms.project_id is empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .user_agent(concat!("nexa-site/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
            token: config.token(),
        })
    }

    fn base_url(&self, cdn: bool) -> String {
        let host = match &self.config.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => {
                let api = if cdn { "apicdn" } else { "api" };
                format!("https://{}.{}.sanity.io", self.config.project_id, api)
            }
        };
        format!(
            "{}/v{}/data",
            host,
            self.config.api_version.trim_start_matches('v')
        )
    }

    /// Endpoint for read queries
    pub fn query_url(&self) -> String {
        // Authenticated reads bypass the CDN
        let cdn = self.config.use_cdn && self.token.is_none();
        format!("{}/query/{}", self.base_url(cdn), self.config.dataset)
    }

    /// Endpoint for mutations
    pub fn mutate_url(&self) -> String {
        format!("{}/mutate/{}", self.base_url(false), self.config.dataset)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_body(response: reqwest::Response) -> Result<String, CmsError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CmsError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl ContentClient for SanityClient {
    async fn fetch(&self, query: &str) -> Result<Vec<Document>, CmsError> {
        let url = self.query_url();
        tracing::debug!("CMS query: {}", url);

        let request = self.authorize(self.http.get(&url).query(&[("query", query)]));
        let body = Self::read_body(request.send().await?).await?;
        let response: QueryResponse = serde_json::from_str(&body)?;

        Ok(normalize_result(response.result))
    }

    async fn create(&self, record: Document) -> Result<Document, CmsError> {
        if record.get("_type").and_then(|t| t.as_str()).is_none() {
            return Err(CmsError::Rejected("document has no _type".to_string()));
        }

        let url = self.mutate_url();
        tracing::debug!("CMS mutate: {}", url);
        if self.token.is_none() {
            tracing::warn!("No CMS token configured; write may be rejected");
        }

        let payload = json!({ "mutations": [ { "create": record } ] });
        let request = self.authorize(
            self.http
                .post(&url)
                .query(&[("returnDocuments", "true")])
                .json(&payload),
        );
        let body = Self::read_body(request.send().await?).await?;
        let response: MutateResponse = serde_json::from_str(&body)?;

        let created = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| CmsError::Rejected("mutation returned no results".to_string()))?;

        Ok(match (created.document, created.id) {
            (Some(document), _) => document,
            (None, Some(id)) => with_id(record, &id),
            (None, None) => record,
        })
    }
}

/// A query result may be an array, a single document, or null
fn normalize_result(result: serde_json::Value) -> Vec<Document> {
    match result {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Null => Vec::new(),
        other => vec![other],
    }
}

fn with_id(mut record: Document, id: &str) -> Document {
    if let Some(map) = record.as_object_mut() {
        map.insert("_id".to_string(), json!(id));
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CmsConfig {
        CmsConfig {
            project_id: "abc123".to_string(),
            dataset: "production".to_string(),
            api_version: "v2023-10-01".to_string(),
            token: Some("secret".to_string()),
            ..CmsConfig::default()
        }
    }

    #[test]
    fn test_requires_project() {
        let result = SanityClient::new(&CmsConfig::default());
        assert!(matches!(result, Err(CmsError::NotConfigured(_))));
    }

    #[test]
    fn test_urls() {
        let client = SanityClient::new(&config()).unwrap();
        assert_eq!(
            client.query_url(),
            "https://abc123.api.sanity.io/v2023-10-01/data/query/production"
        );
        assert_eq!(
            client.mutate_url(),
            "https://abc123.api.sanity.io/v2023-10-01/data/mutate/production"
        );
    }

    #[test]
    fn test_cdn_only_for_anonymous_reads() {
        let mut cfg = config();
        cfg.use_cdn = true;
        cfg.token = None;
        let anonymous = SanityClient {
            http: reqwest::Client::new(),
            token: None,
            config: cfg.clone(),
        };
        assert!(anonymous.query_url().starts_with("https://abc123.apicdn.sanity.io/"));
        assert!(anonymous.mutate_url().starts_with("https://abc123.api.sanity.io/"));

        let authed = SanityClient {
            http: reqwest::Client::new(),
            token: Some("t".to_string()),
            config: cfg,
        };
        assert!(authed.query_url().starts_with("https://abc123.api.sanity.io/"));
    }

    #[test]
    fn test_api_host_override() {
        let mut cfg = config();
        cfg.api_host = Some("http://127.0.0.1:9000/".to_string());
        let client = SanityClient::new(&cfg).unwrap();
        assert_eq!(
            client.query_url(),
            "http://127.0.0.1:9000/v2023-10-01/data/query/production"
        );
    }

    #[test]
    fn test_normalize_result() {
        assert!(normalize_result(serde_json::Value::Null).is_empty());
        assert_eq!(normalize_result(json!([1, 2])).len(), 2);
        assert_eq!(normalize_result(json!({"title": "x"})).len(), 1);
    }

    #[test]
    fn test_with_id() {
        let doc = with_id(json!({"_type": "emailEntry"}), "abc");
        assert_eq!(doc["_id"], "abc");
    }

    #[tokio::test]
    async fn test_create_requires_type() {
        let client = SanityClient::new(&config()).unwrap();
        let err = client.create(json!({"email": "a@b.co"})).await.unwrap_err();
        assert!(matches!(err, CmsError::Rejected(_)));
    }
}
