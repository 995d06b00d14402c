use crate::config::ScanConfig;
use crate::error::{ResumeExtractError, Result};
use crate::scanner::file_filter::FileFilter;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// How a document ended up in the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOrigin {
    /// Named directly on the command line.
    Explicit,
    /// Found while walking a directory input.
    Discovered,
}

#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub path: PathBuf,
    pub filename: String,
    pub extension: String,
    pub size: u64,
    pub origin: InputOrigin,
}

impl DocumentFile {
    pub fn new(path: PathBuf, size: u64, origin: InputOrigin) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        Self {
            path,
            filename,
            extension,
            size,
            origin,
        }
    }

    pub fn format_size(&self) -> String {
        format_bytes(self.size)
    }
}

/// Turns the user's inputs (files and directories) into the ordered list of
/// documents for one batch.
pub struct DocumentScanner {
    filter: FileFilter,
    max_depth: usize,
}

impl DocumentScanner {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
            max_depth: config.max_depth,
        }
    }

    /// Explicit files come through in the order given whatever their
    /// extension; directories contribute their matching files sorted by
    /// path. A path reached twice is kept at its first position.
    pub fn resolve<P: AsRef<Path>>(&self, inputs: &[P]) -> Result<Vec<DocumentFile>> {
        if inputs.is_empty() {
            return Err(ResumeExtractError::NoInputs);
        }

        let mut documents = Vec::new();
        let mut seen = HashSet::new();

        for input in inputs {
            let input = input.as_ref();

            if !input.exists() {
                return Err(ResumeExtractError::InvalidPath {
                    path: input.display().to_string(),
                });
            }

            let found = if input.is_dir() {
                self.scan_directory(input)?
            } else {
                let metadata = std::fs::metadata(input)?;
                vec![DocumentFile::new(
                    input.to_path_buf(),
                    metadata.len(),
                    InputOrigin::Explicit,
                )]
            };

            for document in found {
                let key = document
                    .path
                    .canonicalize()
                    .unwrap_or_else(|_| document.path.clone());
                if seen.insert(key) {
                    documents.push(document);
                } else {
                    tracing::debug!(path = %document.path.display(), "duplicate input ignored");
                }
            }
        }

        if documents.is_empty() {
            return Err(ResumeExtractError::NoDocumentsFound {
                searched_extensions: self.filter.extensions().to_vec(),
            });
        }

        tracing::info!(documents = documents.len(), "resolved inputs");
        Ok(documents)
    }

    /// Matching files under `root`, sorted by path. Unreadable entries are
    /// logged and skipped.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<DocumentFile>> {
        let root_path = root.as_ref();

        if !root_path.is_dir() {
            return Err(ResumeExtractError::InvalidPath {
                path: format!("{} is not a directory", root_path.display()),
            });
        }

        let mut documents = Vec::new();

        let walker = WalkDir::new(root_path)
            .max_depth(self.max_depth)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.should_traverse(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("Scan error: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.filter.is_resume_file(entry.path()) {
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    tracing::warn!(path = %entry.path().display(), "cannot stat: {}", err);
                    continue;
                }
            };

            if !self.filter.is_size_allowed(size) {
                tracing::info!(
                    path = %entry.path().display(),
                    size = %format_bytes(size),
                    "skipping file over the size limit"
                );
                continue;
            }

            documents.push(DocumentFile::new(
                entry.path().to_path_buf(),
                size,
                InputOrigin::Discovered,
            ));
        }

        documents.sort_by(|a, b| a.path.cmp(&b.path));
        tracing::debug!(root = %root_path.display(), found = documents.len(), "scanned directory");

        Ok(documents)
    }

    fn should_traverse(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }

        self.filter.should_traverse_directory(entry.path())
    }

    pub fn get_statistics(&self, documents: &[DocumentFile]) -> ScanStatistics {
        let mut files_by_extension = BTreeMap::new();
        for doc in documents {
            let ext = if doc.extension.is_empty() {
                "no_extension".to_string()
            } else {
                doc.extension.clone()
            };
            *files_by_extension.entry(ext).or_insert(0) += 1;
        }

        ScanStatistics {
            total_files: documents.len(),
            total_size: documents.iter().map(|d| d.size).sum(),
            files_by_extension,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanStatistics {
    pub total_files: usize,
    pub total_size: u64,
    pub files_by_extension: BTreeMap<String, usize>,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Scan Results:\n  Total files: {}\n  Total size: {}\n",
            self.total_files,
            format_bytes(self.total_size)
        );

        if !self.files_by_extension.is_empty() {
            summary.push_str("  Files by type:\n");
            for (ext, count) in &self.files_by_extension {
                summary.push_str(&format!("    {}: {} files\n", ext, count));
            }
        }

        summary
    }
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scanner() -> DocumentScanner {
        DocumentScanner::new(&ScanConfig::default())
    }

    fn names(documents: &[DocumentFile]) -> Vec<String> {
        documents.iter().map(|d| d.filename.clone()).collect()
    }

    #[test]
    fn test_document_file_creation() {
        let doc = DocumentFile::new(PathBuf::from("in/Jane.PDF"), 2048, InputOrigin::Explicit);

        assert_eq!(doc.filename, "Jane.PDF");
        assert_eq!(doc.extension, "pdf");
        assert_eq!(doc.format_size(), "2.0 KB");
    }

    #[test]
    fn test_directory_scan_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("b_team")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join(".hidden")).unwrap();

        fs::write(root.join("zoe.docx"), "x").unwrap();
        fs::write(root.join("adam.pdf"), "x").unwrap();
        fs::write(root.join("notes.txt"), "x").unwrap();
        fs::write(root.join("b_team/carl.PDF"), "x").unwrap();
        fs::write(root.join(".git/packed.pdf"), "x").unwrap();
        fs::write(root.join(".hidden/secret.docx"), "x").unwrap();

        let documents = scanner().scan_directory(root).unwrap();

        assert_eq!(names(&documents), vec!["adam.pdf", "carl.PDF", "zoe.docx"]);
        assert!(documents.iter().all(|d| d.origin == InputOrigin::Discovered));
    }

    #[test]
    fn test_size_limit_and_depth() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("big.pdf"), vec![0u8; 64]).unwrap();
        fs::write(root.join("small.pdf"), b"x").unwrap();
        fs::write(root.join("a/b/deep.pdf"), b"x").unwrap();

        let config = ScanConfig {
            max_file_size: 16,
            max_depth: 2,
            ..ScanConfig::default()
        };
        let documents = DocumentScanner::new(&config).scan_directory(root).unwrap();

        assert_eq!(names(&documents), vec!["small.pdf"]);
    }

    #[test]
    fn test_resolve_keeps_explicit_order_and_extension() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let c = root.join("c.docx");
        let a = root.join("a.txt");
        let b = root.join("b.pdf");
        for path in [&c, &a, &b] {
            fs::write(path, "x").unwrap();
        }

        let documents = scanner().resolve(&[c.clone(), a.clone(), b.clone()]).unwrap();

        let paths: Vec<_> = documents.iter().map(|d| d.path.clone()).collect();
        assert_eq!(paths, vec![c, a, b]);
        assert!(documents.iter().all(|d| d.origin == InputOrigin::Explicit));
    }

    #[test]
    fn test_resolve_mixes_files_and_directories_without_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let dir = root.join("batch");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("one.pdf"), "x").unwrap();
        fs::write(dir.join("two.docx"), "x").unwrap();
        let single = root.join("first.docx");
        fs::write(&single, "x").unwrap();

        let documents = scanner()
            .resolve(&[single.clone(), dir.clone(), dir.join("one.pdf")])
            .unwrap();

        assert_eq!(names(&documents), vec!["first.docx", "one.pdf", "two.docx"]);
    }

    #[test]
    fn test_resolve_errors() {
        let temp_dir = TempDir::new().unwrap();

        let empty: [PathBuf; 0] = [];
        assert!(matches!(
            scanner().resolve(&empty),
            Err(ResumeExtractError::NoInputs)
        ));

        assert!(matches!(
            scanner().resolve(&[temp_dir.path().join("missing.pdf")]),
            Err(ResumeExtractError::InvalidPath { .. })
        ));

        fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();
        match scanner().resolve(&[temp_dir.path()]) {
            Err(ResumeExtractError::NoDocumentsFound { searched_extensions }) => {
                assert_eq!(searched_extensions, vec!["pdf", "docx"]);
            }
            other => panic!("unexpected result: {:?}", other.map(|d| d.len())),
        }
    }

    #[test]
    fn test_scan_statistics() {
        let documents = vec![
            DocumentFile::new(PathBuf::from("a.pdf"), 100, InputOrigin::Explicit),
            DocumentFile::new(PathBuf::from("b.pdf"), 50, InputOrigin::Discovered),
            DocumentFile::new(PathBuf::from("c.docx"), 200, InputOrigin::Discovered),
        ];

        let stats = scanner().get_statistics(&documents);

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_size, 350);
        assert_eq!(stats.files_by_extension.get("pdf"), Some(&2));
        assert!(stats.display_summary().contains("docx: 1 files"));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
    }
}
