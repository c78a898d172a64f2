//! In-process content store
//!
//! Understands the `*[_type == "..."]` queries the site issues. Used as
//! the test double for [`ContentClient`] and for serving from a JSON
//! fixture without a CMS.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::{CmsError, ContentClient, Document};

lazy_static! {
    static ref TYPE_FILTER: Regex = Regex::new(r#"_type\s*==\s*"([^"]+)""#).unwrap();
}

#[derive(Default)]
pub struct MemoryClient {
    documents: Mutex<HashMap<String, Vec<Document>>>,
    created: Mutex<Vec<Document>>,
    next_id: AtomicU64,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    write_delay: Option<Duration>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load documents from a fixture of the form `{"post": [...], "imageAsset": [...]}`
    pub fn from_fixture<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {:?}", path))?;
        let fixture: HashMap<String, Vec<Document>> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse fixture {:?}", path))?;

        let client = Self::new();
        for (kind, docs) in fixture {
            tracing::debug!("Fixture: {} {} documents", docs.len(), kind);
            client.insert(&kind, docs);
        }
        Ok(client)
    }

    pub fn with_documents(self, kind: &str, docs: Vec<Document>) -> Self {
        self.insert(kind, docs);
        self
    }

    /// Delay every write, keeping it in flight
    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = Some(delay);
        self
    }

    fn insert(&self, kind: &str, docs: Vec<Document>) {
        let mut documents = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        documents.entry(kind.to_string()).or_default().extend(docs);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Every document created through [`ContentClient::create`], in order
    pub fn created(&self) -> Vec<Document> {
        self.created
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// All stored documents of one type
    pub fn documents(&self, kind: &str) -> Vec<Document> {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(kind)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContentClient for MemoryClient {
    async fn fetch(&self, query: &str) -> Result<Vec<Document>, CmsError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CmsError::Status {
                status: 503,
                body: "memory store unavailable".to_string(),
            });
        }

        let kind = TYPE_FILTER
            .captures(query)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| CmsError::Rejected(format!("unsupported query: {}", query)))?;

        let mut docs = self.documents(&kind);
        if query.contains("order(publishedAt desc)") {
            docs.sort_by(|a, b| {
                let key = |d: &Document| d["publishedAt"].as_str().unwrap_or("").to_string();
                key(b).cmp(&key(a))
            });
        }
        Ok(docs)
    }

    async fn create(&self, record: Document) -> Result<Document, CmsError> {
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CmsError::Rejected("memory store refused write".to_string()));
        }

        let kind = record
            .get("_type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| CmsError::Rejected("document has no _type".to_string()))?
            .to_string();

        let mut stored = record;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(map) = stored.as_object_mut() {
            map.insert("_id".to_string(), json!(format!("mem-{}", id)));
        }

        self.insert(&kind, vec![stored.clone()]);
        self.created
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(stored.clone());

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::POSTS_QUERY;

    #[tokio::test]
    async fn test_fetch_by_type_ordered() {
        let client = MemoryClient::new().with_documents(
            "post",
            vec![
                json!({"customId": "old", "publishedAt": "2023-01-01T00:00:00Z"}),
                json!({"customId": "new", "publishedAt": "2024-01-01T00:00:00Z"}),
            ],
        );

        let docs = client.fetch(POSTS_QUERY).await.unwrap();
        assert_eq!(docs[0]["customId"], "new");
        assert_eq!(docs[1]["customId"], "old");

        let none = client.fetch(r#"*[_type == "imageAsset"]"#).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_query() {
        let client = MemoryClient::new();
        assert!(matches!(
            client.fetch("*[]").await,
            Err(CmsError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_records() {
        let client = MemoryClient::new();
        let stored = client
            .create(json!({"_type": "emailEntry", "email": "a@b.co"}))
            .await
            .unwrap();

        assert_eq!(stored["_id"], "mem-1");
        assert_eq!(client.created().len(), 1);
        assert_eq!(client.documents("emailEntry").len(), 1);
    }

    #[tokio::test]
    async fn test_failing_writes() {
        let client = MemoryClient::new();
        client.set_fail_writes(true);
        assert!(client
            .create(json!({"_type": "emailEntry"}))
            .await
            .is_err());
        assert!(client.created().is_empty());
    }

    #[test]
    fn test_from_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        fs::write(
            &path,
            r#"{"post": [{"title": "A", "customId": "a"}], "imageAsset": []}"#,
        )
        .unwrap();

        let client = MemoryClient::from_fixture(&path).unwrap();
        assert_eq!(client.documents("post").len(), 1);
    }
}
