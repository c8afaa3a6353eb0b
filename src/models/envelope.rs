use serde_json::Value;
use crate::error::{Error, Result};

/// Top-level JSON object returned by the items API.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    raw: Value,
}

impl ResponseEnvelope {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let raw = serde_json::from_slice(body)?;
        Ok(Self { raw })
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn response(&self) -> Result<&Value> {
        self.raw
            .get("Response")
            .filter(|response| !response.is_null())
            .ok_or(Error::MalformedEnvelope("Response"))
    }

    pub fn data(&self) -> Result<&Value> {
        self.response()?
            .get("Data")
            .filter(|data| !data.is_null())
            .ok_or(Error::MalformedEnvelope("Response.Data"))
    }

    /// `Response.Data[0]`, if `Data` is a non-empty array.
    pub fn first_record(&self) -> Result<Option<&Value>> {
        Ok(self.data()?.get(0))
    }

    /// The `Response` object as two-space indented JSON, keys in server order.
    pub fn render_response(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.response()?)?)
    }

    pub fn into_api_response(self) -> ApiResponse {
        let Some(response) = self.raw.get("Response") else {
            return ApiResponse::default();
        };

        ApiResponse {
            data: response.get("Data").filter(|data| !data.is_null()).cloned(),
            offset: response.get("Offset").and_then(Value::as_u64),
            page_size: response.get("PageSize").and_then(Value::as_u64),
            total_count: response.get("TotalCount").and_then(Value::as_u64),
        }
    }
}

/// The parts of `Response` the service operations work with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiResponse {
    pub data: Option<Value>,
    pub offset: Option<u64>,
    pub page_size: Option<u64>,
    pub total_count: Option<u64>,
}

impl ApiResponse {
    pub fn require_data(self) -> Result<Value> {
        self.data.ok_or(Error::MalformedEnvelope("Response.Data"))
    }
}

/// One page of records from a site.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPage {
    pub records: Vec<Value>,
    pub offset: u64,
    pub page_size: u64,
    pub total_count: u64,
}
