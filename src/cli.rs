use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "resume-extract")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract names, emails and phone numbers from resumes into a CSV file")]
#[command(
    long_about = "resume-extract reads PDF and DOCX resumes, pulls out the candidate's name, \
                  email address and contact number, and writes one CSV row per resume."
)]
#[command(after_help = "EXAMPLES:\n  \
    resume-extract jane.pdf john.docx\n  \
    resume-extract ./applicants --output shortlist.csv --force\n  \
    resume-extract ./applicants -j 8 --report -v\n  \
    resume-extract ./applicants --output-format json > batch.json")]
pub struct Cli {
    /// Resume files or directories containing them
    pub inputs: Vec<PathBuf>,

    /// CSV file to write (defaults to ./extracted_data.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Number of resumes processed concurrently (0 = one per CPU)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Skip files larger than this when scanning directories
    #[arg(long, value_parser = parse_size_string, help = "Maximum file size (e.g. 10MB, 512KB)")]
    pub max_size: Option<u64>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,

    /// Also write <output>.report.json next to the CSV
    #[arg(long)]
    pub report: bool,

    /// List the resumes that would be processed without reading them
    #[arg(long)]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<&OutputFormat> for OutputMode {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_output_path(self.output.clone())
            .with_workers(self.jobs)
            .with_max_file_size(self.max_size)
            .with_force(self.force)
            .with_write_report(self.report)
    }

    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from(&self.output_format)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn parse_size_string(s: &str) -> std::result::Result<u64, String> {
    let s = s.trim().to_lowercase();

    let (number_str, multiplier) = if s.ends_with("kb") || s.ends_with('k') {
        (s.trim_end_matches("kb").trim_end_matches('k'), 1024)
    } else if s.ends_with("mb") || s.ends_with('m') {
        (s.trim_end_matches("mb").trim_end_matches('m'), 1024 * 1024)
    } else if s.ends_with("gb") || s.ends_with('g') {
        (
            s.trim_end_matches("gb").trim_end_matches('g'),
            1024 * 1024 * 1024,
        )
    } else if s.ends_with('b') {
        (s.trim_end_matches('b'), 1)
    } else {
        (s.as_str(), 1)
    };

    let number: f64 = number_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number format: {}", number_str))?;

    if number < 0.0 {
        return Err("Size cannot be negative".to_string());
    }

    Ok((number * multiplier as f64) as u64)
}
