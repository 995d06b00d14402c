use crate::error::{ResumeExtractError, Result};
use crate::pipeline::CancelToken;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Ctrl+C handling for a batch run. The first interrupt cancels the shared
/// [`CancelToken`] so no further documents start; a second one exits.
pub struct GracefulShutdown {
    token: CancelToken,
    shutdown_message_shown: Arc<AtomicBool>,
}

impl GracefulShutdown {
    pub fn new() -> Result<Self> {
        let token = CancelToken::new();
        let shutdown_message_shown = Arc::new(AtomicBool::new(false));

        let token_clone = token.clone();
        let message_shown_clone = shutdown_message_shown.clone();

        ctrlc::set_handler(move || {
            token_clone.cancel();

            if !message_shown_clone.swap(true, Ordering::SeqCst) {
                eprintln!(
                    "\n🛑 Finishing documents in progress... (press Ctrl+C again to force exit)"
                );
            } else {
                eprintln!("\n💀 Force stopping...");
                std::process::exit(130);
            }
        })
        .map_err(|e| ResumeExtractError::Config {
            message: format!("Failed to set signal handler: {}", e),
        })?;

        Ok(Self {
            token,
            shutdown_message_shown,
        })
    }

    /// No signal handler is registered.
    pub fn new_for_test() -> Self {
        Self {
            token: CancelToken::new(),
            shutdown_message_shown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Token to hand to the pipeline.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn check_shutdown(&self) -> Result<()> {
        if !self.is_running() {
            return Err(ResumeExtractError::Cancelled);
        }
        Ok(())
    }

    pub fn request_shutdown(&self) {
        self.token.cancel();
    }

    pub fn reset(&self) {
        self.token.reset();
        self.shutdown_message_shown.store(false, Ordering::SeqCst);
    }
}

impl Default for GracefulShutdown {
    fn default() -> Self {
        Self::new().unwrap_or_else(|e| {
            tracing::warn!("{}", e);
            Self::new_for_test()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_state_management() {
        let shutdown = GracefulShutdown::new_for_test();

        assert!(shutdown.is_running());
        assert!(shutdown.check_shutdown().is_ok());

        shutdown.request_shutdown();
        assert!(!shutdown.is_running());
        assert!(matches!(
            shutdown.check_shutdown(),
            Err(ResumeExtractError::Cancelled)
        ));

        shutdown.reset();
        assert!(shutdown.is_running());
    }

    #[test]
    fn test_token_is_shared_with_pipeline() {
        let shutdown = GracefulShutdown::new_for_test();
        let token = shutdown.token();

        shutdown.request_shutdown();
        assert!(token.is_cancelled());

        token.reset();
        assert!(shutdown.is_running());
    }
}
