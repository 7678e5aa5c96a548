//! Data module - CSV loading, enrichment and filtering

mod loader;
mod processor;
pub mod schema;

pub use loader::{DataCache, DataLoader, DataSources, LoaderError, NbaTables};
pub use processor::{DataProcessor, SeasonRange};
