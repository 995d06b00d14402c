use clap::Parser;
use resume_extract::{
    logging, Cli, OutputFormatter, ResumeExtract, ResumeExtractError, UserFriendlyError,
};
use std::process;

#[tokio::main]
async fn main() {
    let exit_code = run().await;
    process::exit(exit_code);
}

async fn run() -> i32 {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet);

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match ResumeExtract::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&cli, &e);
            return exit_code_for(&e);
        }
    };

    if cli.dry_run {
        return handle_dry_run(&cli, &app);
    }

    match app.extract(&cli.inputs).await {
        Ok(outcome) => {
            if outcome.result.has_failures() {
                2 // Some resumes could not be read
            } else {
                0
            }
        }
        Err(e) => {
            app.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &ResumeExtractError) -> i32 {
    match error {
        ResumeExtractError::Cancelled => 130, // Interrupted (SIGINT)
        ResumeExtractError::NoInputs | ResumeExtractError::NoDocumentsFound { .. } => 3,
        ResumeExtractError::NoRecordsExtracted { .. } => 4,
        ResumeExtractError::OutputFileExists { .. } => 5,
        ResumeExtractError::InvalidPath { .. } => 6,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "resume-extract.toml".to_string());

    match ResumeExtract::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  resume-extract <resumes...> --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(cli: &Cli, app: &ResumeExtract) -> i32 {
    let formatter = app.output_formatter();

    formatter.info("DRY RUN MODE - No resumes will be read and no CSV written");

    let (documents, stats) = match app.plan(&cli.inputs) {
        Ok(plan) => plan,
        Err(e) => {
            app.handle_error(&e);
            return exit_code_for(&e);
        }
    };

    formatter.print_dry_run(&documents, &stats);

    let config = app.config();
    let output_path = config.output_path();
    formatter.info(&format!("Workers: {}", config.pipeline.effective_workers()));
    formatter.info(&format!("CSV would be written to {}", output_path.display()));

    if output_path.exists() && !config.output.overwrite {
        formatter.warning("Output file already exists; the run would stop unless --force is given");
    }

    0
}

fn print_startup_error(cli: &Cli, error: &ResumeExtractError) {
    let formatter = OutputFormatter::new(cli.output_mode(), 0, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use resume_extract::{Config, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let cli = Cli::parse_from([
            "resume-extract",
            "--generate-config",
            "--config",
            config_path.to_str().unwrap(),
        ]);

        assert_eq!(handle_generate_config(&cli), 0);
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[pipeline]"));
    }

    #[test]
    fn test_dry_run_mode() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("cv.pdf"), b"x").unwrap();

        let app = ResumeExtract::new_without_signals(Config::default(), OutputMode::Plain, 0, true);
        let cli = Cli::parse_from([
            "resume-extract",
            "--dry-run",
            "-q",
            temp_dir.path().to_str().unwrap(),
        ]);

        assert_eq!(handle_dry_run(&cli, &app), 0);
    }

    #[test]
    fn test_dry_run_with_missing_input() {
        let app = ResumeExtract::new_without_signals(Config::default(), OutputMode::Plain, 0, true);
        let cli = Cli::parse_from(["resume-extract", "--dry-run", "-q", "/no/such/resume.pdf"]);

        assert_eq!(handle_dry_run(&cli, &app), 6);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&ResumeExtractError::Cancelled), 130);
        assert_eq!(exit_code_for(&ResumeExtractError::NoInputs), 3);
        assert_eq!(
            exit_code_for(&ResumeExtractError::NoRecordsExtracted { attempted: 2 }),
            4
        );
        assert_eq!(
            exit_code_for(&ResumeExtractError::OutputFileExists {
                path: "x.csv".to_string()
            }),
            5
        );
        assert_eq!(
            exit_code_for(&ResumeExtractError::Config {
                message: "bad".to_string()
            }),
            1
        );
    }
}
