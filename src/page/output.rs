use std::sync::Arc;
use tokio::sync::Mutex;
use chrono::{DateTime, Utc};

/// How the current content was assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Markup,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputElement {
    pub content: String,
    pub kind: ContentKind,
    pub updated_at: Option<DateTime<Utc>>,
}

impl OutputElement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            kind: ContentKind::Text,
            updated_at: None,
        }
    }
}

/// Shared handle to the page's output element.
///
/// Markup is stored as given; nothing is escaped or sanitized.
#[derive(Debug, Clone)]
pub struct Output {
    element: Arc<Mutex<OutputElement>>,
}

impl Output {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            element: Arc::new(Mutex::new(OutputElement::new(text))),
        }
    }

    pub async fn set_inner_html(&self, markup: impl Into<String>) {
        self.replace(markup.into(), ContentKind::Markup).await;
    }

    pub async fn set_text_content(&self, text: impl Into<String>) {
        self.replace(text.into(), ContentKind::Text).await;
    }

    async fn replace(&self, content: String, kind: ContentKind) {
        let mut element = self.element.lock().await;
        element.content = content;
        element.kind = kind;
        element.updated_at = Some(Utc::now());
    }

    pub async fn snapshot(&self) -> OutputElement {
        self.element.lock().await.clone()
    }

    pub async fn content(&self) -> String {
        self.element.lock().await.content.clone()
    }
}
