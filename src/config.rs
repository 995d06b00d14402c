use crate::error::{ResumeExtractError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound on concurrent documents accepted from config or CLI.
pub const MAX_WORKERS: usize = 1024;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub pipeline: PipelineConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub extensions: Vec<String>,
    pub max_file_size: u64,
    pub max_depth: usize,
    pub exclude_dirs: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Documents processed concurrently; 0 means one per CPU.
    pub workers: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub filename: String,
    pub overwrite: bool,
    pub write_report: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["pdf".to_string(), "docx".to_string()],
            max_file_size: 50 * 1024 * 1024, // 50MB
            max_depth: 5,
            exclude_dirs: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
            ],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            filename: "extracted_data.csv".to_string(),
            overwrite: false,
            write_report: false,
        }
    }
}

impl PipelineConfig {
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get().clamp(1, MAX_WORKERS)
        } else {
            self.workers.min(MAX_WORKERS)
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ResumeExtractError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ResumeExtractError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ResumeExtractError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["resume-extract.toml", ".resume-extract.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref output_path) = cli_args.output_path {
            if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                self.output.directory = parent.to_path_buf();
            }
            if let Some(name) = output_path.file_name() {
                self.output.filename = name.to_string_lossy().to_string();
            }
        }

        if let Some(workers) = cli_args.workers {
            self.pipeline.workers = workers;
        }

        if let Some(max_file_size) = cli_args.max_file_size {
            self.scan.max_file_size = max_file_size;
        }

        if cli_args.force {
            self.output.overwrite = true;
        }

        if cli_args.write_report {
            self.output.write_report = true;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ResumeExtractError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ResumeExtractError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan.extensions.is_empty() {
            return Err(ResumeExtractError::Config {
                message: "At least one file extension must be specified".to_string(),
            });
        }

        if let Some(ext) = self
            .scan
            .extensions
            .iter()
            .find(|ext| !matches!(ext.to_lowercase().as_str(), "pdf" | "docx"))
        {
            return Err(ResumeExtractError::Config {
                message: format!("Unsupported extension in scan.extensions: {}", ext),
            });
        }

        if self.scan.max_file_size == 0 {
            return Err(ResumeExtractError::Config {
                message: "Maximum file size must be greater than 0".to_string(),
            });
        }

        if self.scan.max_depth == 0 {
            return Err(ResumeExtractError::Config {
                message: "Maximum directory depth must be greater than 0".to_string(),
            });
        }

        if self.pipeline.workers > MAX_WORKERS {
            return Err(ResumeExtractError::Config {
                message: format!(
                    "pipeline.workers must be at most {} (got {})",
                    MAX_WORKERS, self.pipeline.workers
                ),
            });
        }

        if self.output.filename.trim().is_empty() {
            return Err(ResumeExtractError::Config {
                message: "Output filename must not be empty".to_string(),
            });
        }

        if !self.output.directory.exists() {
            return Err(ResumeExtractError::Config {
                message: format!(
                    "Output directory does not exist: {}",
                    self.output.directory.display()
                ),
            });
        }

        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        self.output.directory.join(&self.output.filename)
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub output_path: Option<PathBuf>,
    pub workers: Option<usize>,
    pub max_file_size: Option<u64>,
    pub force: bool,
    pub write_report: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_path(mut self, output_path: Option<PathBuf>) -> Self {
        self.output_path = output_path;
        self
    }

    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_max_file_size(mut self, max_file_size: Option<u64>) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_write_report(mut self, write_report: bool) -> Self {
        self.write_report = write_report;
        self
    }
}
