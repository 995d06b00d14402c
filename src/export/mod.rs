pub mod csv_writer;
pub mod report;

pub use csv_writer::{CsvExporter, CSV_HEADERS};
pub use report::{BatchReport, BatchSummary, FailureEntry};
