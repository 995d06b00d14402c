use super::progress::{BatchProgress, CancelToken, ProgressSnapshot};
use crate::config::PipelineConfig;
use crate::document;
use crate::error::DocumentError;
use crate::recognizer::{self, ResumeRecord};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::{self, JoinSet};

/// Where a document is in its pass through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    Pending,
    Extracting,
    Recognizing,
    Succeeded,
    Failed,
}

#[derive(Debug)]
pub enum DocumentOutcome {
    Success(ResumeRecord),
    Failure(DocumentError),
}

impl DocumentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DocumentOutcome::Success(_))
    }

    pub fn state(&self) -> DocumentState {
        match self {
            DocumentOutcome::Success(_) => DocumentState::Succeeded,
            DocumentOutcome::Failure(_) => DocumentState::Failed,
        }
    }
}

#[derive(Debug)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub error: DocumentError,
}

impl DocumentFailure {
    /// The error text followed by its underlying causes.
    pub fn reason(&self) -> String {
        self.error.detailed_message()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// The input list was empty; nothing was dispatched.
    NothingSubmitted,
    /// At least one record was extracted.
    Completed,
    /// Every submitted document failed.
    NoResults,
    /// Cancelled before every document was started.
    Cancelled,
}

/// Outcome of one batch. `successes` and `failures` are both in input
/// order regardless of which worker finished first.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub successes: Vec<ResumeRecord>,
    pub failures: Vec<DocumentFailure>,
    pub skipped: Vec<PathBuf>,
    pub total: usize,
    pub elapsed: Duration,
}

impl BatchResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn status(&self) -> BatchStatus {
        if self.total == 0 {
            BatchStatus::NothingSubmitted
        } else if !self.skipped.is_empty() {
            BatchStatus::Cancelled
        } else if self.successes.is_empty() {
            BatchStatus::NoResults
        } else {
            BatchStatus::Completed
        }
    }

    pub fn processed(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Runs extraction and recognition for one document.
///
/// Never panics on bad input and never fails the caller: every problem is
/// returned as [`DocumentOutcome::Failure`].
pub fn process_document(path: &Path) -> DocumentOutcome {
    trace_state(path, DocumentState::Extracting);
    let text = match document::extract_text(path) {
        Ok(text) => text,
        Err(error) => return fail(path, error),
    };

    if text.is_empty() {
        return fail(path, DocumentError::NoTextExtracted);
    }

    trace_state(path, DocumentState::Recognizing);
    let record = recognizer::recognize(&text);

    trace_state(path, DocumentState::Succeeded);
    DocumentOutcome::Success(record)
}

fn fail(path: &Path, error: DocumentError) -> DocumentOutcome {
    tracing::debug!(path = %path.display(), kind = error.kind(), "Error processing {}: {}", path.display(), error.detailed_message());
    trace_state(path, DocumentState::Failed);
    DocumentOutcome::Failure(error)
}

fn trace_state(path: &Path, state: DocumentState) {
    tracing::debug!(path = %path.display(), ?state, "document state");
}

pub type ProgressCallback = Arc<dyn Fn(&ProgressSnapshot) + Send + Sync>;

/// One batch run. Build it with the documents to process, optionally attach
/// a cancel token and progress callback, then [`run`](Self::run) it.
pub struct BatchPipeline {
    documents: Vec<PathBuf>,
    workers: usize,
    cancel: CancelToken,
    progress: Arc<BatchProgress>,
    progress_callback: Option<ProgressCallback>,
}

impl BatchPipeline {
    pub fn new(documents: Vec<PathBuf>) -> Self {
        let progress = Arc::new(BatchProgress::new(documents.len()));
        Self {
            documents,
            workers: PipelineConfig::default().effective_workers(),
            cancel: CancelToken::new(),
            progress,
            progress_callback: None,
        }
    }

    pub fn from_config(documents: Vec<PathBuf>, config: &PipelineConfig) -> Self {
        Self::new(documents).with_workers(config.effective_workers())
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = PipelineConfig { workers }.effective_workers();
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_progress_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ProgressSnapshot) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(callback));
        self
    }

    /// Shared counter that can be polled while [`run`](Self::run) is in
    /// flight.
    pub fn progress(&self) -> Arc<BatchProgress> {
        self.progress.clone()
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub async fn run(self) -> BatchResult {
        self.run_with(process_document).await
    }

    /// Dispatches documents in input order, keeping at most `workers` of
    /// them in flight. Nothing new is started once the token is cancelled.
    async fn run_with<F>(self, process: F) -> BatchResult
    where
        F: Fn(&Path) -> DocumentOutcome + Copy + Send + 'static,
    {
        let start = Instant::now();
        let total = self.documents.len();

        if total == 0 {
            tracing::debug!("empty batch, nothing dispatched");
            return BatchResult::empty();
        }

        tracing::info!(documents = total, workers = self.workers, "starting batch");

        let mut tasks = JoinSet::new();
        let mut indices: HashMap<task::Id, usize> = HashMap::new();
        let mut slots: Vec<Option<DocumentOutcome>> = (0..total).map(|_| None).collect();
        let mut next = 0;

        loop {
            while next < total && tasks.len() < self.workers && !self.cancel.is_cancelled() {
                let path = self.documents[next].clone();
                let handle = tasks.spawn_blocking(move || process(&path));
                indices.insert(handle.id(), next);
                next += 1;
            }

            let (index, outcome) = match tasks.join_next_with_id().await {
                Some(Ok((id, outcome))) => match indices.remove(&id) {
                    Some(index) => (index, outcome),
                    None => continue,
                },
                Some(Err(e)) => match indices.remove(&e.id()) {
                    Some(index) => {
                        tracing::error!(path = %self.documents[index].display(), "document worker failed: {}", e);
                        let outcome = DocumentOutcome::Failure(DocumentError::extraction_failed(
                            "document worker stopped unexpectedly",
                            e,
                        ));
                        (index, outcome)
                    }
                    None => continue,
                },
                None => break,
            };

            self.progress.record_completion(outcome.is_success());

            if let Some(ref callback) = self.progress_callback {
                let current = self.documents[index]
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string());
                callback(&self.progress.snapshot(current));
            }

            slots[index] = Some(outcome);
        }

        if next < total {
            tracing::debug!(skipped = total - next, "batch cancelled before all documents started");
        }

        let mut result = BatchResult {
            total,
            ..BatchResult::default()
        };

        for (path, slot) in self.documents.into_iter().zip(slots) {
            match slot {
                Some(DocumentOutcome::Success(record)) => result.successes.push(record),
                Some(DocumentOutcome::Failure(error)) => {
                    result.failures.push(DocumentFailure { path, error })
                }
                None => result.skipped.push(path),
            }
        }

        result.elapsed = start.elapsed();

        tracing::info!(
            succeeded = result.successes.len(),
            failed = result.failures.len(),
            skipped = result.skipped.len(),
            "batch finished"
        );

        result
    }
}
