use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive for a `-v` count; `quiet` wins over any count.
pub fn level_for(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "resume_extract=error";
    }

    match verbosity {
        0 => "resume_extract=warn",
        1 => "resume_extract=info",
        2 => "resume_extract=debug",
        _ => "resume_extract=trace",
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the verbosity flags.
/// Output goes to stderr so JSON on stdout stays parseable.
pub fn setup_logging(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity, quiet)));

    let installed = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Logging setup complete.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0, false), "resume_extract=warn");
        assert_eq!(level_for(1, false), "resume_extract=info");
        assert_eq!(level_for(2, false), "resume_extract=debug");
        assert_eq!(level_for(7, false), "resume_extract=trace");
        assert_eq!(level_for(3, true), "resume_extract=error");
    }

    #[test]
    fn test_setup_twice_does_not_panic() {
        setup_logging(0, false);
        setup_logging(2, false);
    }
}
