mod envelope;
mod payload;
mod site;

pub use envelope::{ResponseEnvelope, ApiResponse, RecordPage};
pub use payload::{RequestPayload, View, ApiDataType, SearchType, setup_search_type};
pub use site::{SiteData, SiteSettings, ReferenceType, ColumnDefinition, EditorColumnHash};
