use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeExtractError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("No input documents were given")]
    NoInputs,

    #[error("No resume documents found under the given inputs")]
    NoDocumentsFound { searched_extensions: Vec<String> },

    #[error("No records could be extracted from {attempted} document(s)")]
    NoRecordsExtracted { attempted: usize },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Operation was cancelled by user")]
    Cancelled,

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Output file already exists: {path}")]
    OutputFileExists { path: String },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Why a single document produced no record.
///
/// These never abort a batch; the pipeline records them next to the
/// document's path and moves on.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Unsupported file type: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Failed to extract text: {message}")]
    ExtractionFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("No text extracted from resume")]
    NoTextExtracted,
}

impl DocumentError {
    pub fn extraction_failed<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DocumentError::ExtractionFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Stable short name, used in reports and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            DocumentError::UnsupportedFormat { .. } => "unsupported_format",
            DocumentError::ExtractionFailed { .. } => "extraction_failed",
            DocumentError::NoTextExtracted => "no_text_extracted",
        }
    }

    /// Display text followed by every underlying cause, joined with `": "`.
    pub fn detailed_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ResumeExtractError {
    fn user_message(&self) -> String {
        match self {
            ResumeExtractError::NoInputs => "No resumes uploaded.".to_string(),
            ResumeExtractError::NoDocumentsFound { searched_extensions } => {
                format!(
                    "No resume documents found with extensions: {}",
                    searched_extensions.join(", ")
                )
            }
            ResumeExtractError::NoRecordsExtracted { .. } => {
                "No valid data extracted.".to_string()
            }
            ResumeExtractError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            ResumeExtractError::Cancelled => "Operation was cancelled by user".to_string(),
            ResumeExtractError::InvalidPath { path } => {
                format!("Invalid file path: {}", path)
            }
            ResumeExtractError::OutputFileExists { path } => {
                format!("Output file already exists: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ResumeExtractError::NoInputs => Some(
                "Pass one or more .pdf/.docx files or directories containing them.".to_string()
            ),
            ResumeExtractError::NoDocumentsFound { .. } => Some(
                "Check the input directories, or raise scan.max_depth / scan.max_file_size in the configuration.".to_string()
            ),
            ResumeExtractError::NoRecordsExtracted { .. } => Some(
                "Every document failed; the reason for each is listed above. Scanned PDFs without a text layer cannot be read.".to_string()
            ),
            ResumeExtractError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            ResumeExtractError::InvalidPath { .. } => Some(
                "Check that every input path exists and is readable.".to_string()
            ),
            ResumeExtractError::OutputFileExists { .. } => Some(
                "Remove the existing file, choose a different path with --output, or use --force to overwrite.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ResumeExtractError {
    fn from(error: toml::de::Error) -> Self {
        ResumeExtractError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResumeExtractError>;
