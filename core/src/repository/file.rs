use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::model::document::TimesheetDocument;
use crate::repository::traits::{DocumentNames, DocumentRepository};

/// Extension that marks a file in the data directory as a timesheet.
pub const DOCUMENT_SUFFIX: &str = "txt";

/// Accepts `Jane` as well as `Jane.txt` and returns the bare identifier.
pub fn document_stem(name: &str) -> &str {
    name.strip_suffix(".txt").unwrap_or(name)
}

/// Checks a user-supplied document name and returns its identifier. The
/// identifier must name a file directly inside the data directory and must
/// not keep a second `.txt` after stripping.
pub fn validate_name(name: &str) -> StoreResult<&str> {
    let stem = document_stem(name);
    if stem.trim().is_empty()
        || stem.contains(|c: char| c == '/' || c == '\\')
        || stem.ends_with(".txt")
    {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(stem)
}

/// Stores one document per `<name>.txt` file inside a single directory.
#[derive(Clone)]
pub struct FileDocumentRepository {
    base_dir: PathBuf,
}

impl FileDocumentRepository {
    pub fn new(base_dir: Option<PathBuf>) -> StoreResult<Self> {
        let path = match base_dir {
            Some(dir) => dir,
            None => std::env::current_dir().map_err(|e| StoreError::io(".", e))?,
        };
        fs::create_dir_all(&path).map_err(|e| StoreError::io(&path, e))?;

        Ok(FileDocumentRepository { base_dir: path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn path_for(&self, name: &str) -> StoreResult<PathBuf> {
        let stem = validate_name(name)?;
        Ok(self.base_dir.join(format!("{}.{}", stem, DOCUMENT_SUFFIX)))
    }

    fn write_text(&self, file: File, path: &Path, text: &str) -> StoreResult<()> {
        let mut writer = BufWriter::new(file);
        writer
            .write_all(text.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| StoreError::io(path, e))?;
        debug!("wrote {} bytes to {}", text.len(), path.display());
        Ok(())
    }
}

impl DocumentRepository for FileDocumentRepository {
    fn create(&self, doc: &TimesheetDocument) -> StoreResult<()> {
        let path = self.path_for(&doc.name)?;
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StoreError::AlreadyExists(doc.name.clone()),
                _ => StoreError::io(&path, e),
            })?;
        self.write_text(file, &path, &doc.to_text())
    }

    fn load(&self, name: &str) -> StoreResult<TimesheetDocument> {
        let path = self.path_for(name)?;
        let text = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        debug!("read {} bytes from {}", text.len(), path.display());
        Ok(TimesheetDocument::from_text(document_stem(name), &text))
    }

    fn save(&self, doc: &TimesheetDocument) -> StoreResult<()> {
        let path = self.path_for(&doc.name)?;
        let file = File::create(&path).map_err(|e| StoreError::io(&path, e))?;
        self.write_text(file, &path, &doc.to_text())
    }

    fn list(&self) -> StoreResult<DocumentNames> {
        let entries = fs::read_dir(&self.base_dir).map_err(|e| StoreError::io(&self.base_dir, e))?;
        let names = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some(DOCUMENT_SUFFIX))
            .filter_map(|path| {
                let stem = path.file_stem().and_then(|s| s.to_str())?;
                if validate_name(stem).ok() != Some(stem) {
                    debug!("skipping {}: not addressable by name", path.display());
                    return None;
                }
                Some(stem.to_string())
            });
        Ok(Box::new(names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::TimeEntry;

    fn repo() -> (tempfile::TempDir, FileDocumentRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileDocumentRepository::new(Some(dir.path().to_path_buf())).unwrap();
        (dir, repo)
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("Jane").unwrap(), "Jane");
        assert_eq!(validate_name("Jane.txt").unwrap(), "Jane");
        assert!(matches!(validate_name(""), Err(StoreError::InvalidName(_))));
        assert!(matches!(validate_name("   "), Err(StoreError::InvalidName(_))));
        assert!(matches!(validate_name(".txt"), Err(StoreError::InvalidName(_))));
        assert!(matches!(validate_name("a/b"), Err(StoreError::InvalidName(_))));
        assert!(matches!(validate_name("../x"), Err(StoreError::InvalidName(_))));
        assert!(matches!(validate_name("Jane.txt.txt"), Err(StoreError::InvalidName(_))));
    }

    #[test]
    fn test_paths_stay_inside_base_dir() {
        let (dir, repo) = repo();
        assert_eq!(repo.path_for("Jane.txt").unwrap(), dir.path().join("Jane.txt"));
        for name in ["../x", "a/b", "..\\x", ""] {
            assert!(
                matches!(repo.path_for(name), Err(StoreError::InvalidName(_))),
                "expected InvalidName for {:?}",
                name
            );
        }

        let mut doc = TimesheetDocument::new("../x", "Acme");
        assert!(matches!(repo.load("../x"), Err(StoreError::InvalidName(_))));
        assert!(matches!(repo.save(&doc), Err(StoreError::InvalidName(_))));
        doc.name = "Jane".to_string();
        repo.save(&doc).unwrap();
        assert_eq!(repo.list().unwrap().collect::<Vec<_>>(), vec!["Jane".to_string()]);
    }

    #[test]
    fn test_list_skips_names_that_load_another_file() {
        let (dir, repo) = repo();
        repo.create(&TimesheetDocument::new("Jane", "Acme")).unwrap();
        fs::write(dir.path().join("Jane.txt.txt"), "x").unwrap();

        let names: Vec<String> = repo.list().unwrap().collect();
        assert_eq!(names, vec!["Jane".to_string()]);
    }

    #[test]
    fn test_create_then_load() {
        let (_dir, repo) = repo();
        let doc = TimesheetDocument::new("Jane", "Acme");
        repo.create(&doc).unwrap();
        assert!(repo.path_for("Jane").unwrap().exists());
        assert_eq!(repo.load("Jane.txt").unwrap(), doc);
    }

    #[test]
    fn test_create_existing_fails_untouched() {
        let (_dir, repo) = repo();
        let path = repo.path_for("Jane").unwrap();
        fs::write(&path, "keep me\n").unwrap();

        let err = repo.create(&TimesheetDocument::new("Jane", "Acme")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me\n");
    }

    #[test]
    fn test_load_missing_is_io_failure() {
        let (_dir, repo) = repo();
        assert!(matches!(repo.load("Nobody"), Err(StoreError::IoFailure { .. })));
    }

    #[test]
    fn test_save_rewrites_whole_file() {
        let (_dir, repo) = repo();
        let mut doc = TimesheetDocument::new("Jane", "Acme");
        repo.create(&doc).unwrap();

        doc.push_row(TimeEntry::new("01-05-2024", "08:00-16:00", 8.0, 0, 2)).unwrap();
        repo.save(&doc).unwrap();
        doc.rows.clear();
        repo.save(&doc).unwrap();

        let text = fs::read_to_string(repo.path_for("Jane").unwrap()).unwrap();
        assert_eq!(text, doc.to_text());
    }

    #[test]
    fn test_list_filters_by_suffix_and_restarts() {
        let (dir, repo) = repo();
        assert_eq!(repo.list().unwrap().count(), 0);

        repo.create(&TimesheetDocument::new("Jane", "Acme")).unwrap();
        repo.create(&TimesheetDocument::new("Bob", "Acme")).unwrap();
        fs::write(dir.path().join("notes.md"), "x").unwrap();
        fs::create_dir(dir.path().join("folder.txt")).unwrap();

        let mut names: Vec<String> = repo.list().unwrap().collect();
        names.sort();
        assert_eq!(names, vec!["Bob".to_string(), "Jane".to_string()]);
        assert_eq!(repo.list().unwrap().count(), 2);
    }
}
