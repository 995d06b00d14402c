pub mod batch;
pub mod progress;

pub use batch::{
    process_document, BatchPipeline, BatchResult, BatchStatus, DocumentFailure, DocumentOutcome,
    DocumentState, ProgressCallback,
};
pub use progress::{BatchProgress, CancelToken, ProgressSnapshot};
