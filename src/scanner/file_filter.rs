use crate::config::ScanConfig;
use std::path::Path;

/// Decides which files a directory walk picks up and which directories it
/// descends into.
pub struct FileFilter {
    extensions: Vec<String>,
    max_file_size: u64,
    exclude_dirs: Vec<String>,
}

impl FileFilter {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            extensions: config.extensions.iter().map(|e| e.to_lowercase()).collect(),
            max_file_size: config.max_file_size,
            exclude_dirs: config.exclude_dirs.clone(),
        }
    }

    pub fn is_resume_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| self.extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }

    pub fn should_traverse_directory(&self, path: &Path) -> bool {
        let Some(dir_name) = path.file_name().and_then(|s| s.to_str()) else {
            return true;
        };

        let dir_name_lower = dir_name.to_lowercase();
        if self
            .exclude_dirs
            .iter()
            .any(|exclude| exclude.to_lowercase() == dir_name_lower)
        {
            return false;
        }

        !(dir_name.starts_with('.') && dir_name != "." && dir_name != "..")
    }

    pub fn is_size_allowed(&self, size: u64) -> bool {
        size <= self.max_file_size
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new(&ScanConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_file_detection() {
        let filter = FileFilter::default();

        assert!(filter.is_resume_file(Path::new("cv.pdf")));
        assert!(filter.is_resume_file(Path::new("CV.PDF")));
        assert!(filter.is_resume_file(Path::new("jane.Docx")));

        assert!(!filter.is_resume_file(Path::new("jane.doc")));
        assert!(!filter.is_resume_file(Path::new("notes.txt")));
        assert!(!filter.is_resume_file(Path::new("README")));
    }

    #[test]
    fn test_extensions_from_config_are_case_insensitive() {
        let config = ScanConfig {
            extensions: vec!["PDF".to_string()],
            ..ScanConfig::default()
        };
        let filter = FileFilter::new(&config);

        assert!(filter.is_resume_file(Path::new("a.pdf")));
        assert!(!filter.is_resume_file(Path::new("a.docx")));
        assert_eq!(filter.extensions(), ["pdf"]);
    }

    #[test]
    fn test_directory_traversal_rules() {
        let filter = FileFilter::default();

        assert!(filter.should_traverse_directory(Path::new("candidates")));
        assert!(filter.should_traverse_directory(Path::new("2024/march")));

        assert!(!filter.should_traverse_directory(Path::new(".git")));
        assert!(!filter.should_traverse_directory(Path::new("node_modules")));
        assert!(!filter.should_traverse_directory(Path::new("Target")));
        assert!(!filter.should_traverse_directory(Path::new(".trash")));
    }

    #[test]
    fn test_size_limits() {
        let config = ScanConfig {
            max_file_size: 1024,
            ..ScanConfig::default()
        };
        let filter = FileFilter::new(&config);

        assert!(filter.is_size_allowed(0));
        assert!(filter.is_size_allowed(1024));
        assert!(!filter.is_size_allowed(1025));
    }
}
