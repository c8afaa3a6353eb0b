use std::sync::Arc;
use async_trait::async_trait;
use tracing::{debug, error, info};
use crate::error::Result;
use crate::page::output::Output;
use crate::services::ItemsService;

/// Placeholder shown after a reset.
pub const PLACEHOLDER: &str = "読み込み中...";

#[async_trait]
pub trait ClickHandler: Send + Sync {
    async fn on_click(&self, output: &Output);
}

/// Fetches one item and renders its `Response` object into the output.
pub struct FetchAndRender {
    service: Arc<ItemsService>,
    record_id: String,
}

impl FetchAndRender {
    pub fn new(service: Arc<ItemsService>, record_id: impl Into<String>) -> Self {
        Self {
            service,
            record_id: record_id.into(),
        }
    }

    /// Leaves `output` untouched on any error.
    pub async fn fetch_and_render(&self, output: &Output) -> Result<()> {
        let envelope = self.service.fetch_envelope(&self.record_id).await?;

        info!(response = %envelope.raw(), "Created");
        let first_record = envelope.first_record()?;
        debug!(first_record = ?first_record, "First record");

        let rendered = envelope.render_response()?;
        output.set_inner_html(rendered).await;

        Ok(())
    }
}

#[async_trait]
impl ClickHandler for FetchAndRender {
    async fn on_click(&self, output: &Output) {
        if let Err(e) = self.fetch_and_render(output).await {
            error!(
                error = %e,
                record_id = %self.record_id,
                "Error"
            );
        }
    }
}

pub struct Reset;

#[async_trait]
impl ClickHandler for Reset {
    async fn on_click(&self, output: &Output) {
        output.set_text_content(PLACEHOLDER).await;
    }
}
