// ! Prize draw workbook import: positional row normalization and first-sheet loading

pub mod dataset_loader;
pub mod row_normalizer;

// Re-export commonly used items
pub use dataset_loader::{load, load_records, DatasetError, DatasetLoader, LoadedDataset, RejectedRow};
pub use row_normalizer::{normalize, Column, RowRejection};
