use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::CitedexError;

const CROSSREF_BASE: &str = "https://api.crossref.org";

/// One raw work item as returned by the Crossref works search. Every field
/// is optional on the wire; the normalizer owns all fallback handling.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrossrefWork {
    pub title: Option<Vec<String>>,
    pub issued: Option<CrossrefDate>,
    #[serde(rename = "DOI")]
    pub doi: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "string_or_none")]
    pub work_type: Option<String>,
    #[serde(rename = "container-title")]
    pub container_title: Option<Vec<String>>,
    pub author: Option<Vec<CrossrefAuthor>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrossrefDate {
    #[serde(rename = "date-parts")]
    pub date_parts: Option<Vec<Vec<Option<i64>>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrossrefAuthor {
    pub given: Option<String>,
    pub family: Option<String>,
}

// A handful of works carry a non-string `type`; treat those as untyped
// rather than failing the whole page decode.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(|s| s.to_string()))
}

#[derive(Debug, Deserialize)]
struct CrossrefResponse {
    message: CrossrefMessage,
}

#[derive(Debug, Deserialize)]
struct CrossrefMessage {
    #[serde(default)]
    items: Vec<CrossrefWork>,
}

/// Decodes a Crossref works search payload into its work items.
pub fn decode_search_response(body: &str) -> Result<Vec<CrossrefWork>, CitedexError> {
    let payload: CrossrefResponse =
        serde_json::from_str(body).map_err(|err| CitedexError::CrossrefHttp(err.to_string()))?;
    Ok(payload.message.items)
}

pub trait CrossrefClient: Send + Sync {
    /// Runs one bounded works search against the metadata provider.
    fn search(&self, query: &str, rows: u32) -> Result<Vec<CrossrefWork>, CitedexError>;
}

#[derive(Debug, Clone)]
pub struct CrossrefHttpClient {
    client: Client,
}

impl CrossrefHttpClient {
    pub fn new() -> Result<Self, CitedexError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!("citedex/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| CitedexError::CrossrefHttp(err.to_string()))?;
        Ok(Self { client })
    }
}

impl CrossrefClient for CrossrefHttpClient {
    fn search(&self, query: &str, rows: u32) -> Result<Vec<CrossrefWork>, CitedexError> {
        let rows_text = rows.to_string();
        let url = build_query_url(
            &format!("{CROSSREF_BASE}/works"),
            &[("query", query), ("rows", rows_text.as_str())],
        );
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| CitedexError::CrossrefHttp(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "Crossref request failed".to_string());
            return Err(CitedexError::CrossrefStatus { status, message });
        }
        let body = response
            .text()
            .map_err(|err| CitedexError::CrossrefHttp(err.to_string()))?;
        decode_search_response(&body)
    }
}

fn encode_url_component(value: &str) -> String {
    let mut out = String::new();
    for byte in value.as_bytes() {
        let ch = *byte as char;
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.' || ch == '~' {
            out.push(ch);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

fn build_query_url(base: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return base.to_string();
    }
    let mut out = String::from(base);
    out.push('?');
    for (idx, (key, value)) in params.iter().enumerate() {
        if idx > 0 {
            out.push('&');
        }
        out.push_str(&encode_url_component(key));
        out.push('=');
        out.push_str(&encode_url_component(value));
    }
    out
}
