use serde::Deserialize;

/// `Response.Data` of a `/getsite` call.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteData {
    #[serde(rename = "ReferenceType")]
    pub reference_type: ReferenceType,
    #[serde(rename = "SiteSettings", default)]
    pub site_settings: SiteSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ReferenceType {
    Results,
    Issues,
    Sites,
    Other(String),
}

impl From<String> for ReferenceType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Results" => ReferenceType::Results,
            "Issues" => ReferenceType::Issues,
            "Sites" => ReferenceType::Sites,
            _ => ReferenceType::Other(value),
        }
    }
}

impl std::fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceType::Results => write!(f, "Results"),
            ReferenceType::Issues => write!(f, "Issues"),
            ReferenceType::Sites => write!(f, "Sites"),
            ReferenceType::Other(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteSettings {
    #[serde(rename = "Columns", default)]
    pub columns: Vec<ColumnDefinition>,
    #[serde(rename = "EditorColumnHash")]
    pub editor_column_hash: Option<EditorColumnHash>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnDefinition {
    #[serde(rename = "ColumnName")]
    pub column_name: String,
    #[serde(rename = "LabelText")]
    pub label_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditorColumnHash {
    #[serde(rename = "General", default)]
    pub general: Vec<String>,
}
