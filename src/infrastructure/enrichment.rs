use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::error::Result;

#[async_trait]
pub trait EnrichmentService {
    /// Merge structured and unstructured data for one company
    fn conflate(&self, company: &str, structured: Value, unstructured: Vec<Value>) -> Value;

    async fn fetch_vc_information(&self, company: &str, url: &str, request_id: &str)
        -> Result<Value>;
}

/// Stand-in for the RAG service
#[derive(Debug, Default, Clone)]
pub struct StubEnrichmentService;

impl StubEnrichmentService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EnrichmentService for StubEnrichmentService {
    fn conflate(&self, company: &str, structured: Value, unstructured: Vec<Value>) -> Value {
        let mut merged = match structured {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            other => {
                let mut map = serde_json::Map::new();
                map.insert("Structured".to_string(), other);
                map
            }
        };
        merged
            .entry("Company")
            .or_insert_with(|| Value::String(company.to_string()));
        merged.insert("Unstructured".to_string(), Value::Array(unstructured));
        Value::Object(merged)
    }

    async fn fetch_vc_information(
        &self,
        company: &str,
        url: &str,
        request_id: &str,
    ) -> Result<Value> {
        tracing::info!(company, url, request_id, "VC information requested");
        Ok(json!({
            "request_id": request_id,
            "company": company,
            "url": url,
            "status": "pending",
            "results": []
        }))
    }
}
