pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod recognizer;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, OutputConfig, PipelineConfig, ScanConfig};
pub use error::{DocumentError, Result, ResumeExtractError, UserFriendlyError};

// Core functionality re-exports
pub use document::extract_text;
pub use export::{BatchReport, CsvExporter};
pub use pipeline::{
    BatchPipeline, BatchProgress, BatchResult, BatchStatus, CancelToken, DocumentFailure,
    DocumentOutcome, ProgressSnapshot,
};
pub use recognizer::{recognize, ResumeRecord, NOT_FOUND};
pub use scanner::{DocumentFile, DocumentScanner, FileFilter, ScanStatistics};
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode, ProgressManager};

use std::path::{Path, PathBuf};

/// What a successful run produced.
#[derive(Debug)]
pub struct ExtractionOutcome {
    pub result: BatchResult,
    pub csv_path: PathBuf,
    pub rows: usize,
    pub report_path: Option<PathBuf>,
}

/// Scan, extract, recognise and export in one call, with terminal output.
pub struct ResumeExtract {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
}

impl ResumeExtract {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        Ok(Self::with_shutdown(
            config,
            output_mode,
            verbose,
            quiet,
            GracefulShutdown::new()?,
        ))
    }

    /// No Ctrl+C handler; for tests and embedding.
    pub fn new_without_signals(
        config: Config,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
    ) -> Self {
        Self::with_shutdown(
            config,
            output_mode,
            verbose,
            quiet,
            GracefulShutdown::new_for_test(),
        )
    }

    fn with_shutdown(
        config: Config,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
        shutdown: GracefulShutdown,
    ) -> Self {
        let show_progress = !quiet && output_mode == OutputMode::Human;

        Self {
            config,
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
            progress_manager: ProgressManager::new(show_progress),
            shutdown,
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        Self::new(
            config,
            cli_args.output_mode(),
            cli_args.verbose,
            cli_args.quiet,
        )
    }

    pub async fn extract(&self, inputs: &[PathBuf]) -> Result<ExtractionOutcome> {
        self.shutdown.check_shutdown()?;

        let documents = self.resolve_inputs(inputs)?;
        self.output_formatter.print_uploaded(documents.len());

        let paths: Vec<PathBuf> = documents.into_iter().map(|d| d.path).collect();
        let result = self.run_batch(paths).await;

        self.output_formatter.print_failures(&result.failures);

        match result.status() {
            BatchStatus::Cancelled => return Err(ResumeExtractError::Cancelled),
            BatchStatus::NothingSubmitted => return Err(ResumeExtractError::NoInputs),
            BatchStatus::NoResults => {
                self.output_formatter.print_batch_summary(&result);
                self.output_formatter
                    .print_report(&BatchReport::from_result(&result));
                return Err(ResumeExtractError::NoRecordsExtracted {
                    attempted: result.total,
                });
            }
            BatchStatus::Completed => {}
        }

        self.output_formatter.print_records(&result.successes);
        self.output_formatter.print_batch_summary(&result);

        let csv_path = self.config.output_path();
        let rows = CsvExporter::new()
            .with_overwrite(self.config.output.overwrite)
            .write(&result, &csv_path)?;
        self.output_formatter.print_csv_written(&csv_path, rows);

        let report = BatchReport::from_result(&result).with_output_path(&csv_path);
        let report_path = if self.config.output.write_report {
            let path = report.save_next_to(&csv_path)?;
            self.output_formatter
                .info(&format!("Report saved to {}", path.display()));
            Some(path)
        } else {
            None
        };
        self.output_formatter.print_report(&report);

        Ok(ExtractionOutcome {
            result,
            csv_path,
            rows,
            report_path,
        })
    }

    /// The documents a run over `inputs` would process, without reading them.
    pub fn plan(&self, inputs: &[PathBuf]) -> Result<(Vec<DocumentFile>, ScanStatistics)> {
        let scanner = DocumentScanner::new(&self.config.scan);
        let documents = scanner.resolve(inputs)?;
        let stats = scanner.get_statistics(&documents);
        Ok((documents, stats))
    }

    fn resolve_inputs(&self, inputs: &[PathBuf]) -> Result<Vec<DocumentFile>> {
        self.output_formatter.start_operation("Collecting resumes");

        let spinner = self.progress_manager.create_spinner("Scanning inputs...");
        let resolved = self.plan(inputs);
        spinner.finish_and_clear();

        let (documents, stats) = resolved?;
        tracing::debug!("{}", stats.display_summary());
        Ok(documents)
    }

    async fn run_batch(&self, documents: Vec<PathBuf>) -> BatchResult {
        self.output_formatter.start_operation("Extracting contact details");

        let bar = self.progress_manager.create_batch_progress(documents.len() as u64);
        let callback_bar = bar.clone();

        let result = BatchPipeline::from_config(documents, &self.config.pipeline)
            .with_cancel_token(self.shutdown.token())
            .with_progress_callback(move |snapshot| {
                ui::progress::update_batch_progress(&callback_bar, snapshot);
            })
            .run()
            .await;

        ui::progress::finish_progress_with_summary(
            &bar,
            &format!("Processed {} resumes", result.processed()),
            result.elapsed,
        );

        result
    }

    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        std::fs::write(output_path.as_ref(), Config::create_sample_config())?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }

    pub fn handle_error(&self, error: &ResumeExtractError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Extracts every resume under `inputs` into `output` with default settings
/// and no terminal output.
pub async fn extract_to_csv(inputs: &[PathBuf], output: &Path) -> Result<ExtractionOutcome> {
    let mut config = Config::default();
    config.merge_with_cli_args(&CliOverrides::new().with_output_path(Some(output.to_path_buf())));

    ResumeExtract::new_without_signals(config, OutputMode::Plain, 0, true)
        .extract(inputs)
        .await
}

pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        build_date: option_env!("BUILD_DATE").unwrap_or("unknown"),
        target: std::env::consts::ARCH.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_date: &'static str,
    pub target: String,
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "resume-extract {} ({}) built on {} for {}",
            self.version, self.git_hash, self.build_date, self.target
        )
    }
}
