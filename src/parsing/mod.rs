pub mod dataset_parser;
pub mod loader;
pub mod normalize;
pub mod rows;

// Re-export the entry points the app and CLI reach for
pub use dataset_parser::{load_dataset, parse_dataset, DataFormat};
pub use loader::{DatasetState, PendingLoad};
