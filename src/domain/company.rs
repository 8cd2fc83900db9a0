use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One normalized spreadsheet row. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub company: Value,
    pub url: Value,
    pub description: Value,
    pub location: Value,
    pub year: Value,
    #[serde(rename = "total funding")]
    pub total_funding: Value,
    pub industry: Value,
    pub contact: String,
}

/// Body of `/company/batch` and `/company/live`. Any string is a valid
/// company name, including the empty one.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyRequest {
    pub company: String,
}

/// Body of `/company/query`
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub company: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub response: Value,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub results: Vec<u64>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
