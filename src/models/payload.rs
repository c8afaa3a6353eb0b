use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Body keys owned by the payload itself; record fields may not override them.
const RESERVED_KEYS: [&str; 4] = ["ApiVersion", "apiKey", "View", "Offset"];

/// Body of every items API call.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RequestPayload {
    #[serde(rename = "ApiVersion")]
    pub api_version: f64,
    #[serde(rename = "apiKey")]
    pub api_key: String,
    #[serde(rename = "View", skip_serializing_if = "Option::is_none")]
    pub view: Option<View>,
    #[serde(rename = "Offset", skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RequestPayload {
    pub fn new(api_version: f64, api_key: impl Into<String>) -> Self {
        Self {
            api_version,
            api_key: api_key.into(),
            view: None,
            offset: None,
            fields: Map::new(),
        }
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.view = Some(view);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Merges record fields (`Title`, `ClassHash`, ...) into the top level of the body.
    ///
    /// Keys that collide with the payload's own fields are dropped.
    pub fn with_fields(mut self, fields: Map<String, Value>) -> Self {
        self.fields.extend(
            fields
                .into_iter()
                .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str())),
        );
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ApiDataType {
    Default,
    KeyValues,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum SearchType {
    ExactMatch,
    PartialMatch,
    ForwardMatch,
    ExactMatchMultiple,
    PartialMatchMultiple,
    ForwardMatchMultiple,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct View {
    #[serde(rename = "ApiDataType")]
    pub api_data_type: ApiDataType,
    #[serde(rename = "ColumnFilterHash", skip_serializing_if = "Option::is_none")]
    pub column_filter_hash: Option<Map<String, Value>>,
    #[serde(rename = "ColumnFilterSearchTypes", skip_serializing_if = "Option::is_none")]
    pub column_filter_search_types: Option<HashMap<String, SearchType>>,
    #[serde(rename = "GridColumns", skip_serializing_if = "Option::is_none")]
    pub grid_columns: Option<Vec<String>>,
}

impl View {
    /// A view returning records keyed by their display names.
    pub fn key_values() -> Self {
        Self {
            api_data_type: ApiDataType::KeyValues,
            column_filter_hash: None,
            column_filter_search_types: None,
            grid_columns: None,
        }
    }
}

pub fn setup_search_type(columns: &[String], search_type: SearchType) -> HashMap<String, SearchType> {
    columns
        .iter()
        .map(|column| (column.clone(), search_type))
        .collect()
}
