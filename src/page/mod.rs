//! An in-process page: named click targets and one shared output element.
//!
//! Each click runs its handlers on their own tasks. Nothing orders the tasks
//! of separate clicks, so when two fetches are in flight the one that
//! resolves last decides what the output shows.

pub mod handlers;
pub mod output;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use crate::error::{Error, Result};
use crate::services::ItemsService;

pub use handlers::{ClickHandler, FetchAndRender, Reset, PLACEHOLDER};
pub use output::{ContentKind, Output, OutputElement};

pub const FETCH_DATA: &str = "fetchData";
pub const RESET: &str = "reset";
pub const OUTPUT: &str = "output";

pub struct Page {
    output: Output,
    listeners: HashMap<String, Vec<Arc<dyn ClickHandler>>>,
}

impl Page {
    pub fn new(initial_text: impl Into<String>) -> Self {
        Self {
            output: Output::new(initial_text),
            listeners: HashMap::new(),
        }
    }

    /// A page with the fetch button bound to `record_id` and the reset button.
    pub fn with_default_handlers(service: Arc<ItemsService>, record_id: &str) -> Self {
        let mut page = Self::new(PLACEHOLDER);
        page.add_click_listener(FETCH_DATA, Arc::new(FetchAndRender::new(service, record_id)));
        page.add_click_listener(RESET, Arc::new(Reset));
        page
    }

    pub fn add_click_listener(&mut self, target: &str, handler: Arc<dyn ClickHandler>) {
        self.listeners
            .entry(target.to_string())
            .or_default()
            .push(handler);
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn has_target(&self, target: &str) -> bool {
        self.listeners.contains_key(target)
    }

    /// Dispatches a click, returning one handle per started handler.
    pub fn click(&self, target: &str) -> Result<Vec<JoinHandle<()>>> {
        let handlers = self
            .listeners
            .get(target)
            .ok_or_else(|| Error::UnknownElement(target.to_string()))?;

        debug!(element = target, handlers = handlers.len(), "Dispatching click");

        let handles = handlers
            .iter()
            .map(|handler| {
                let handler = Arc::clone(handler);
                let output = self.output.clone();
                tokio::spawn(async move {
                    handler.on_click(&output).await;
                })
            })
            .collect();

        Ok(handles)
    }
}

/// Waits for the handlers of a click, logging any that panicked or were cancelled.
///
/// Returns the number of handlers that did not finish normally.
pub async fn settle(handles: Vec<JoinHandle<()>>) -> usize {
    let mut failed = 0;
    for handle in handles {
        if let Err(e) = handle.await {
            warn!(error = %e, "Click handler failed");
            failed += 1;
        }
    }
    failed
}
