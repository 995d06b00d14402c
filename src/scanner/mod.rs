pub mod document_scanner;
pub mod file_filter;

pub use document_scanner::{DocumentFile, DocumentScanner, InputOrigin, ScanStatistics};
pub use file_filter::FileFilter;
