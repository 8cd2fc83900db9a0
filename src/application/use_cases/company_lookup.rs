use std::sync::Arc;

use serde_json::Value;

use crate::domain::error::Result;
use crate::infrastructure::data_sources::CompanyDataSource;
use crate::infrastructure::enrichment::EnrichmentService;
use crate::infrastructure::id::generate_id;

/// Lookup key for a company: lower-cased with spaces removed
pub fn normalize_company_key(company: &str) -> String {
    company.to_lowercase().replace(' ', "")
}

pub struct CompanyLookupUseCase {
    data_source: Arc<dyn CompanyDataSource + Send + Sync>,
    enrichment: Arc<dyn EnrichmentService + Send + Sync>,
}

impl CompanyLookupUseCase {
    pub fn new(
        data_source: Arc<dyn CompanyDataSource + Send + Sync>,
        enrichment: Arc<dyn EnrichmentService + Send + Sync>,
    ) -> Self {
        Self {
            data_source,
            enrichment,
        }
    }

    /// Shared by batch and live mode
    pub async fn lookup(&self, company: &str) -> Result<Value> {
        let key = normalize_company_key(company);
        let structured = self.data_source.get_structured_data_by_company(&key).await?;
        let unstructured = self
            .data_source
            .get_unstructured_data_by_company(&key)
            .await?;
        Ok(self.enrichment.conflate(&key, structured, unstructured))
    }

    pub async fn query(&self, company: &str, url: &str) -> Result<Value> {
        let request_id = generate_id();
        tracing::debug!(%request_id, "Generated request id");
        self.enrichment
            .fetch_vc_information(company, url, &request_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::data_sources::StubDataSource;
    use crate::infrastructure::enrichment::StubEnrichmentService;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSource {
        keys: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CompanyDataSource for RecordingSource {
        async fn get_structured_data_by_company(&self, company: &str) -> Result<Value> {
            self.keys.lock().unwrap().push(company.to_string());
            Ok(json!({"Company": company}))
        }

        async fn get_unstructured_data_by_company(&self, company: &str) -> Result<Vec<Value>> {
            self.keys.lock().unwrap().push(company.to_string());
            Ok(vec![json!({"doc": 1})])
        }
    }

    #[test]
    fn test_normalize_company_key() {
        assert_eq!(normalize_company_key("Acme Inc"), "acmeinc");
        assert_eq!(normalize_company_key("  Big  Co "), "bigco");
        assert_eq!(normalize_company_key("already"), "already");
    }

    #[actix_web::test]
    async fn test_lookup_uses_normalized_key() {
        let source = Arc::new(RecordingSource::default());
        let use_case =
            CompanyLookupUseCase::new(source.clone(), Arc::new(StubEnrichmentService::new()));

        let merged = use_case.lookup("Acme Inc").await.unwrap();

        assert_eq!(*source.keys.lock().unwrap(), vec!["acmeinc", "acmeinc"]);
        assert_eq!(merged["Company"], "acmeinc");
        assert_eq!(merged["Unstructured"], json!([{"doc": 1}]));
    }

    #[actix_web::test]
    async fn test_query_passes_a_fresh_request_id() {
        let use_case = CompanyLookupUseCase::new(
            Arc::new(StubDataSource::new()),
            Arc::new(StubEnrichmentService::new()),
        );

        let first = use_case.query("Acme", "https://acme.io").await.unwrap();
        let second = use_case.query("Acme", "https://acme.io").await.unwrap();

        assert_eq!(first["company"], "Acme");
        assert!(first["request_id"].as_str().is_some());
        assert_ne!(first["request_id"], second["request_id"]);
    }
}
