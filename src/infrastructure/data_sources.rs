use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::error::Result;

/// Per-company lookups. Keys arrive already normalized (lower-case, no spaces).
#[async_trait]
pub trait CompanyDataSource {
    async fn get_structured_data_by_company(&self, company: &str) -> Result<Value>;
    async fn get_unstructured_data_by_company(&self, company: &str) -> Result<Vec<Value>>;
}

/// Placeholder until the Crunchbase and crawler sources exist: an
/// empty-shaped profile and no documents.
#[derive(Debug, Default, Clone)]
pub struct StubDataSource;

impl StubDataSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CompanyDataSource for StubDataSource {
    async fn get_structured_data_by_company(&self, company: &str) -> Result<Value> {
        Ok(json!({
            "Company": company,
            "Industry": "",
            "Leadership": {
                "CEO": "",
                "CTO": "",
                "CFO": "",
                "C0O": ""
            },
            "Competitors": []
        }))
    }

    async fn get_unstructured_data_by_company(&self, _company: &str) -> Result<Vec<Value>> {
        Ok(Vec::new())
    }
}
