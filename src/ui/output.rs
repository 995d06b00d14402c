use crate::error::{ResumeExtractError, UserFriendlyError};
use crate::export::BatchReport;
use crate::pipeline::{BatchResult, BatchStatus, DocumentFailure};
use crate::recognizer::ResumeRecord;
use crate::scanner::{DocumentFile, ScanStatistics};
use crate::ui::progress::format_duration;
use console::{style, Emoji, Term};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

impl OutputMode {
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputMode::Json,
            "plain" => OutputMode::Plain,
            _ => OutputMode::Human,
        }
    }
}

static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

/// `Name: …, Email: …, Contact Number: …`
pub fn format_record(record: &ResumeRecord) -> String {
    format!(
        "Name: {}, Email: {}, Contact Number: {}",
        record.name, record.email, record.contact_number
    )
}

pub fn format_failure(failure: &DocumentFailure) -> String {
    format!(
        "Error processing {}: {}",
        failure.path.display(),
        failure.reason()
    )
}

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Success, message),
            OutputMode::Json => self.print_json_message("success", message),
            OutputMode::Plain => println!("SUCCESS: {}", message),
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(1) {
            self.print_warning(message);
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &ResumeExtractError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    eprintln!();
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    pub fn print_uploaded(&self, count: usize) {
        if self.should_show_message(0) && self.mode != OutputMode::Json {
            match self.mode {
                OutputMode::Human if self.use_colors => {
                    println!("{}", style(format!("{} resumes uploaded", count)).bold())
                }
                _ => println!("{} resumes uploaded", count),
            }
        }
    }

    /// Per-document failures are shown without `-v`; they explain gaps in
    /// the CSV.
    pub fn print_failures(&self, failures: &[DocumentFailure]) {
        if self.quiet || self.mode == OutputMode::Json {
            return;
        }
        for failure in failures {
            self.print_warning(&format_failure(failure));
        }
    }

    pub fn print_records(&self, records: &[ResumeRecord]) {
        if self.quiet || self.mode == OutputMode::Json {
            return;
        }

        for record in records {
            let line = format_record(record);
            if self.use_colors {
                println!("  {}", style(line).dim());
            } else {
                println!("  {}", line);
            }
        }
    }

    pub fn print_batch_summary(&self, result: &BatchResult) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => self.print_human_summary(result),
            OutputMode::Plain => self.print_plain_summary(result),
            // The report carries the summary in JSON mode.
            OutputMode::Json => {}
        }
    }

    pub fn print_csv_written(&self, path: &Path, rows: usize) {
        self.success(&format!(
            "CSV file created successfully at {}! ({} rows)",
            path.display(),
            rows
        ));
    }

    /// Only JSON mode prints the full report; other modes already showed it.
    pub fn print_report(&self, report: &BatchReport) {
        if self.mode == OutputMode::Json {
            match report.to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => self.error(&e.to_string()),
            }
        }
    }

    pub fn print_dry_run(&self, documents: &[DocumentFile], stats: &ScanStatistics) {
        match self.mode {
            OutputMode::Json => {
                let files: Vec<_> = documents
                    .iter()
                    .map(|d| {
                        serde_json::json!({
                            "path": d.path.display().to_string(),
                            "size": d.size,
                        })
                    })
                    .collect();
                self.print_json_object(&serde_json::json!({
                    "type": "dry_run",
                    "total_files": stats.total_files,
                    "total_size": stats.total_size,
                    "files_by_extension": stats.files_by_extension,
                    "files": files,
                }));
            }
            _ => {
                self.print_header("Dry Run");
                print!("{}", stats.display_summary());
                println!();
                for document in documents {
                    println!("  {} ({})", document.path.display(), document.format_size());
                }
            }
        }
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                println!();
                if self.use_colors {
                    println!("{} {}", SPARKLES, style(title).bold().cyan());
                } else {
                    println!("=== {} ===", title);
                }
                println!();
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "header",
                    "title": title
                }));
            }
            OutputMode::Plain => println!("=== {} ===", title),
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human if self.use_colors => println!("{}", style("─".repeat(60)).dim()),
            OutputMode::Human | OutputMode::Plain => println!("{}", "-".repeat(60)),
            OutputMode::Json => {}
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_warning(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Warning, message),
            OutputMode::Json => self.print_json_message("warning", message),
            OutputMode::Plain => println!("WARNING: {}", message),
        }
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let (emoji, styled) = match msg_type {
                MessageType::Success => (CHECKMARK, style(message).green().bold()),
                MessageType::Error => (CROSS, style(message).red().bold()),
                MessageType::Warning => (WARNING, style(message).yellow()),
                MessageType::Info => (INFO, style(message).cyan()),
            };

            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, styled),
                _ => println!("{}{}", emoji, styled),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn highlight(&self, value: String) -> String {
        if self.use_colors {
            style(value).cyan().bold().to_string()
        } else {
            value
        }
    }

    fn print_human_summary(&self, result: &BatchResult) {
        println!();
        self.print_separator();

        let headline = match result.status() {
            BatchStatus::Completed => "Data extraction complete!",
            BatchStatus::NoResults => "No valid data extracted.",
            BatchStatus::Cancelled => "Extraction cancelled.",
            BatchStatus::NothingSubmitted => "No resumes uploaded.",
        };

        match (result.status(), self.use_colors) {
            (BatchStatus::Completed, true) => {
                println!("{} {}", style(headline).green().bold(), CHECKMARK)
            }
            (_, true) => println!("{}", style(headline).yellow().bold()),
            (_, false) => println!("{}", headline),
        }

        println!();
        println!("  Resumes:      {}", self.highlight(result.total.to_string()));
        println!(
            "  Extracted:    {}",
            self.highlight(result.successes.len().to_string())
        );
        if result.has_failures() {
            println!("  Failed:       {}", result.failures.len());
        }
        if !result.skipped.is_empty() {
            println!("  Not started:  {}", result.skipped.len());
        }
        println!(
            "  Time taken:   {}",
            self.highlight(format_duration(result.elapsed))
        );

        self.print_separator();
    }

    fn print_plain_summary(&self, result: &BatchResult) {
        println!("COMPLETED: Resume extraction");
        println!("Resumes: {}", result.total);
        println!("Extracted: {}", result.successes.len());
        println!("Failed: {}", result.failures.len());
        if !result.skipped.is_empty() {
            println!("Skipped: {}", result.skipped.len());
        }
        println!("Duration: {:?}", result.elapsed);
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}
