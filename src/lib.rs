//! Client for the Pleasanter items API, with a small page model that fetches
//! an item and renders its `Response` into an output element.

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod page;
pub mod services;

pub use clients::HttpClient;
pub use self::config::{ConnectionInfo, Settings};
pub use error::{Error, Result};
pub use page::{Output, Page, PLACEHOLDER};
pub use services::{ItemsService, RecordQuery};
