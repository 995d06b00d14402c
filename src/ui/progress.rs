use crate::pipeline::ProgressSnapshot;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    multi_progress: MultiProgress,
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            enabled,
        }
    }

    /// Bar sized to the batch, advanced by [`update_batch_progress`].
    pub fn create_batch_progress(&self, total_documents: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(ProgressBar::new(total_documents));
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>4}/{len:4} resumes {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        pb.set_message("Extracting...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        pb.set_message(message.to_string());
        pb
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(true)
    }
}

pub fn update_batch_progress(pb: &ProgressBar, snapshot: &ProgressSnapshot) {
    pb.set_position(snapshot.completed as u64);

    let eta = if snapshot.completed < snapshot.total && snapshot.estimated_remaining.as_secs() > 0
    {
        format!(" (ETA: {})", format_duration(snapshot.estimated_remaining))
    } else {
        String::new()
    };

    let failed = if snapshot.failed > 0 {
        format!(" [{} failed]", snapshot.failed)
    } else {
        String::new()
    };

    match snapshot.current_file {
        Some(ref file) => pb.set_message(format!("{}{}{}", file, failed, eta)),
        None => pb.set_message(format!("Extracting...{}{}", failed, eta)),
    }
}

pub fn finish_progress_with_summary(pb: &ProgressBar, message: &str, duration: Duration) {
    let final_message = format!("{} (completed in {})", message, format_duration(duration));
    pb.finish_with_message(final_message);
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(completed: usize, failed: usize, current: Option<&str>) -> ProgressSnapshot {
        ProgressSnapshot {
            completed,
            failed,
            total: 4,
            current_file: current.map(str::to_string),
            elapsed: Duration::from_secs(2),
            estimated_remaining: Duration::from_secs(0),
        }
    }

    #[test]
    fn test_progress_manager_creation() {
        assert!(ProgressManager::new(true).is_enabled());
        assert!(!ProgressManager::new(false).is_enabled());
    }

    #[test]
    fn test_disabled_progress_bars() {
        let manager = ProgressManager::new(false);

        assert!(manager.create_batch_progress(10).is_hidden());
        assert!(manager.create_spinner("scanning").is_hidden());
    }

    #[test]
    fn test_update_from_snapshot() {
        let pb = ProgressBar::hidden();
        pb.set_length(4);

        update_batch_progress(&pb, &snapshot(2, 1, Some("jane.pdf")));

        assert_eq!(pb.position(), 2);
        assert_eq!(pb.message(), "jane.pdf [1 failed]");

        update_batch_progress(&pb, &snapshot(3, 0, None));
        assert_eq!(pb.message(), "Extracting...");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
    }
}
