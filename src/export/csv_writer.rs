use crate::error::{ResumeExtractError, Result};
use crate::pipeline::BatchResult;
use crate::recognizer::ResumeRecord;
use std::path::Path;
use tempfile::NamedTempFile;

/// Column order of the exported file.
pub const CSV_HEADERS: [&str; 3] = ["Name", "Email", "Contact Number"];

/// Writes batch results as CSV. The file appears at its destination only
/// once it is complete.
#[derive(Debug, Default)]
pub struct CsvExporter {
    overwrite: bool,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// One row per success, in input order. Returns the number of rows.
    pub fn write(&self, result: &BatchResult, path: &Path) -> Result<usize> {
        self.write_records(&result.successes, path)
    }

    pub fn write_records(&self, records: &[ResumeRecord], path: &Path) -> Result<usize> {
        if path.exists() && !self.overwrite {
            return Err(ResumeExtractError::OutputFileExists {
                path: path.display().to_string(),
            });
        }

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(directory)?;
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(temp.as_file_mut());

            writer.write_record(CSV_HEADERS)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        temp.as_file_mut().sync_all()?;

        if self.overwrite {
            temp.persist(path).map_err(|e| ResumeExtractError::Io(e.error))?;
        } else {
            // Something may have created the file since the check above.
            temp.persist_noclobber(path).map_err(|e| {
                if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                    ResumeExtractError::OutputFileExists {
                        path: path.display().to_string(),
                    }
                } else {
                    ResumeExtractError::Io(e.error)
                }
            })?;
        }

        tracing::info!(path = %path.display(), rows = records.len(), "wrote CSV");
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::NOT_FOUND;
    use std::fs;
    use tempfile::TempDir;

    fn record(name: &str, email: &str, phone: &str) -> ResumeRecord {
        ResumeRecord {
            name: name.to_string(),
            email: email.to_string(),
            contact_number: phone.to_string(),
        }
    }

    fn batch(records: Vec<ResumeRecord>) -> BatchResult {
        BatchResult {
            total: records.len(),
            successes: records,
            ..BatchResult::default()
        }
    }

    #[test]
    fn test_header_and_one_row_per_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        let result = batch(vec![
            record("Jane Doe", "jane@example.com", "+1 555-123-4567"),
            record("John Roe", NOT_FOUND, NOT_FOUND),
            record("Ann Poe", "ann@x.io", "0171 234 5678"),
        ]);

        let rows = CsvExporter::new().write(&result, &path).unwrap();
        assert_eq!(rows, 3);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Name,Email,Contact Number");
        assert_eq!(lines[1], "Jane Doe,jane@example.com,+1 555-123-4567");
        assert_eq!(lines[2], "John Roe,N/A,N/A");
    }

    #[test]
    fn test_embedded_commas_and_quotes_are_escaped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        let original = record("Doe, Jane \"JD\"", "jd@example.com", NOT_FOUND);

        CsvExporter::new()
            .write_records(std::slice::from_ref(&original), &path)
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Doe, Jane \"\"JD\"\"\""));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let read_back: Vec<ResumeRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(read_back, vec![original]);
    }

    #[test]
    fn test_empty_batch_writes_header_only() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        assert_eq!(CsvExporter::new().write(&batch(Vec::new()), &path).unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap().trim_end(), "Name,Email,Contact Number");
    }

    #[test]
    fn test_existing_file_is_kept_without_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        fs::write(&path, "keep me").unwrap();
        let result = batch(vec![record("A", "a@b.cd", NOT_FOUND)]);

        let error = CsvExporter::new().write(&result, &path).unwrap_err();
        assert!(matches!(error, ResumeExtractError::OutputFileExists { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");

        CsvExporter::new().with_overwrite(true).write(&result, &path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with("Name,"));
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        CsvExporter::new()
            .write(&batch(vec![record("A", NOT_FOUND, NOT_FOUND)]), &path)
            .unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
