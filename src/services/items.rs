use serde_json::{Map, Value};
use tracing::{error, debug, info};
use crate::clients::HttpClient;
use crate::config::Settings;
use crate::error::{Result, Error};
use crate::models::{ApiResponse, RecordPage, ReferenceType, RequestPayload, ResponseEnvelope, SearchType, SiteData, View};

/// Columns every table has, mapped to themselves in the label mapping.
const MAPPING_DEFAULT_COLUMNS: [&str; 4] = ["CreatedTime", "UpdatedTime", "Updator", "Creator"];
/// Columns appended to the edit tab listing.
const EDIT_TAB_DEFAULT_COLUMNS: [&str; 4] = ["CreatedTime", "UpdatedTime", "Creator", "Updator"];

/// The action segment of an items URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    Get,
    GetSite,
    Create,
    Update,
}

impl ItemAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemAction::Get => "get",
            ItemAction::GetSite => "getsite",
            ItemAction::Create => "create",
            ItemAction::Update => "update",
        }
    }
}

/// Filters and paging for [`ItemsService::get_records`].
#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
    pub grid_columns: Option<Vec<String>>,
    pub filters: Option<Map<String, Value>>,
    pub search_types: Option<std::collections::HashMap<String, SearchType>>,
    pub offset: u64,
}

pub struct ItemsService {
    client: HttpClient,
    base_url: String,
    api_key: String,
    api_version: f64,
}

impl ItemsService {
    pub fn new(client: HttpClient, settings: &Settings) -> Self {
        Self {
            client,
            base_url: settings.host.url.trim_end_matches('/').to_string(),
            api_key: settings.host.api_key.clone(),
            api_version: settings.api.version,
        }
    }

    /// A fresh base payload; nothing from earlier calls is carried over.
    pub fn payload(&self) -> RequestPayload {
        RequestPayload::new(self.api_version, self.api_key.clone())
    }

    pub fn item_url(&self, id: &str, action: ItemAction) -> String {
        format!("{}/api/items/{}/{}", self.base_url, id, action.as_str())
    }

    async fn post(&self, url: &str, payload: &RequestPayload) -> Result<ResponseEnvelope> {
        let body = serde_json::to_vec(payload)?;
        let request = self.client.post(url).body(body);
        let response = self.client.send(request).await?;
        let body = response.bytes().await.map_err(Error::from_transport)?;

        ResponseEnvelope::from_slice(&body).map_err(|e| {
            let body_str = String::from_utf8_lossy(&body);
            error!(
                error = %e,
                body = %body_str,
                url = url,
                "Invalid JSON response"
            );
            e
        })
    }

    /// Raw `/get` call for one item, as the page's fetch button issues it.
    pub async fn fetch_envelope(&self, id: &str) -> Result<ResponseEnvelope> {
        let url = self.item_url(id, ItemAction::Get);
        self.post(&url, &self.payload()).await
    }

    pub async fn process_request(&self, url: &str, payload: &RequestPayload) -> Result<ApiResponse> {
        let envelope = self.post(url, payload).await?;
        let response = envelope.into_api_response();

        debug!(
            url = url,
            has_data = response.data.is_some(),
            offset = ?response.offset,
            page_size = ?response.page_size,
            total_count = ?response.total_count,
            "API response processed"
        );

        Ok(response)
    }

    pub async fn get_site(&self, site_id: &str) -> Result<SiteData> {
        let url = self.item_url(site_id, ItemAction::GetSite);
        let data = self.process_request(&url, &self.payload()).await?.require_data()?;
        Ok(serde_json::from_value(data)?)
    }

    /// Fetches the site and rejects anything that is not a record table.
    async fn get_table_site(&self, site_id: &str) -> Result<SiteData> {
        let site = self.get_site(site_id).await?;

        match &site.reference_type {
            ReferenceType::Results | ReferenceType::Issues => Ok(site),
            ReferenceType::Sites => Err(Error::DirectorySite { site_id: site_id.to_string() }),
            other => Err(Error::UnexpectedReferenceType(other.to_string())),
        }
    }

    /// Column name to display label for every column of a table site.
    ///
    /// Default columns come first, then the site's columns in server order.
    pub async fn get_mapping_columns(&self, site_id: &str) -> Result<Map<String, Value>> {
        let site = self.get_table_site(site_id).await?;

        let mut mapping: Map<String, Value> = MAPPING_DEFAULT_COLUMNS
            .iter()
            .map(|column| (column.to_string(), Value::from(*column)))
            .collect();

        for column in site.site_settings.columns {
            let label = column.label_text.unwrap_or_else(|| column.column_name.clone());
            mapping.insert(column.column_name, Value::String(label));
        }

        Ok(mapping)
    }

    /// Columns shown on the edit tab, followed by the standard audit columns.
    pub async fn get_edit_columns(&self, site_id: &str) -> Result<Vec<String>> {
        let site = self.get_table_site(site_id).await?;

        let mut columns = site
            .site_settings
            .editor_column_hash
            .ok_or(Error::MalformedEnvelope("SiteSettings.EditorColumnHash"))?
            .general;
        columns.extend(EDIT_TAB_DEFAULT_COLUMNS.iter().map(|c| c.to_string()));

        Ok(columns)
    }

    pub async fn get_record(
        &self,
        site_id: &str,
        record_id: &str,
        grid_columns: Option<Vec<String>>,
    ) -> Result<Value> {
        if site_id == record_id {
            return Err(Error::InvalidId(
                "the same value was given for both the record id and the site id".to_string(),
            ));
        }

        let mut view = View::key_values();
        view.grid_columns = grid_columns;
        let payload = self.payload().with_view(view);

        let url = self.item_url(record_id, ItemAction::Get);
        let data = self.process_request(&url, &payload).await?.require_data()?;

        match data {
            Value::Array(mut records) if records.len() == 1 => Ok(records.remove(0)),
            _ => Err(Error::InvalidId(format!(
                "{} is a site id or folder id, not a record id",
                record_id
            ))),
        }
    }

    /// One page of records starting at `query.offset`.
    pub async fn get_records(&self, site_id: &str, query: RecordQuery) -> Result<RecordPage> {
        let view = View {
            column_filter_hash: query.filters,
            column_filter_search_types: query.search_types,
            grid_columns: query.grid_columns,
            ..View::key_values()
        };
        let payload = self.payload().with_view(view).with_offset(query.offset);

        let url = self.item_url(site_id, ItemAction::Get);
        let response = self.process_request(&url, &payload).await?;
        let (offset, page_size, total_count) = (
            response.offset.unwrap_or(query.offset),
            response.page_size.unwrap_or(0),
            response.total_count.unwrap_or(0),
        );

        match response.require_data()? {
            Value::Array(records) => {
                info!(
                    site_id = site_id,
                    records = records.len(),
                    offset = offset,
                    total_count = total_count,
                    "Fetched records"
                );
                Ok(RecordPage { records, offset, page_size, total_count })
            },
            Value::Object(_) => Err(Error::InvalidId(format!("{} is a folder id", site_id))),
            _ => Err(Error::MalformedEnvelope("Response.Data")),
        }
    }

    pub async fn create_record(&self, site_id: &str, fields: Map<String, Value>) -> Result<()> {
        let url = self.item_url(site_id, ItemAction::Create);
        let payload = self.payload().with_fields(fields);
        self.process_request(&url, &payload).await?;

        info!(site_id = site_id, "Record created");
        Ok(())
    }

    pub async fn update_record(&self, record_id: &str, fields: Map<String, Value>) -> Result<()> {
        let url = self.item_url(record_id, ItemAction::Update);
        let payload = self.payload().with_fields(fields);
        self.process_request(&url, &payload).await?;

        info!(record_id = record_id, "Record updated");
        Ok(())
    }
}
