pub mod items;

pub use items::{ItemsService, ItemAction, RecordQuery};
