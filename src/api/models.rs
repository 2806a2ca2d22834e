use serde::{Deserialize, Serialize};

use crate::renderer::ResultBlock;

#[derive(Debug, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub page_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<ResultBlock>,
    pub total_results: usize,
    pub next_page_token: Option<String>,
    pub processing_time_ms: u128,
}
