//! Data module - CSV loading, normalization and export

mod export;
mod loader;
mod normalizer;
mod record;

pub use export::{records_to_frame, write_csv};
pub use loader::{parse_csv_text, DataLoader, DataSource, LoaderError, RawTable};
pub use normalizer::{parse_number, NormalizeError, Normalizer, THOUSANDS_SEPARATOR};
pub use record::{Dataset, NumericField, Record, UnknownFieldError};
