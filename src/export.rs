//! Print and save-a-copy
//!
//! Both actions are the same scoped acquisition: pull the document's
//! byte buffer through the engine boundary, spool it to a file, and hand
//! that file to the platform. The spool file is owned by the exporter,
//! so it is released on every exit path — dropped immediately when the
//! hand-off fails, replaced when the next action starts, removed with
//! the exporter otherwise.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::{info, warn};
use tempfile::NamedTempFile;

use crate::document::{Document, DocumentError};

const DEFAULT_FILE_NAME: &str = "document.pdf";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("another {action} is still in progress")]
    Busy { action: &'static str },

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not hand the document to the system viewer: {0}")]
    Opener(String),
}

#[derive(Default)]
pub struct Exporter {
    is_printing: bool,
    is_downloading: bool,
    print_spool: Option<NamedTempFile>,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_printing(&self) -> bool {
        self.is_printing
    }

    pub fn is_downloading(&self) -> bool {
        self.is_downloading
    }

    /// Spool the document to a temporary file and open it with the
    /// platform's PDF handler, which owns the print dialog. Re-entry
    /// while an earlier print is outstanding is refused.
    pub fn print(&mut self, doc: &dyn Document) -> Result<(), ExportError> {
        if self.is_printing {
            return Err(ExportError::Busy { action: "print" });
        }
        self.is_printing = true;
        let result = self.print_inner(doc);
        self.is_printing = false;

        if result.is_err() {
            // a spool nobody will read has no reason to linger
            self.print_spool = None;
        }
        result
    }

    fn print_inner(&mut self, doc: &dyn Document) -> Result<(), ExportError> {
        let bytes = doc.data()?;

        let mut spool = tempfile::Builder::new()
            .prefix("folio-print-")
            .suffix(".pdf")
            .tempfile()?;
        spool.write_all(&bytes)?;
        spool.flush()?;

        open::that(spool.path()).map_err(|e| ExportError::Opener(e.to_string()))?;
        info!("print: handed {} to the system viewer", spool.path().display());

        // keep the spool alive until the next print replaces it; the
        // external viewer reads the path after we return
        self.print_spool = Some(spool);
        Ok(())
    }

    /// Write a copy of the document into `dest_dir`, named after the
    /// document title. Returns the path written.
    pub fn save_copy(
        &mut self,
        doc: &dyn Document,
        dest_dir: &Path,
    ) -> Result<PathBuf, ExportError> {
        if self.is_downloading {
            return Err(ExportError::Busy { action: "save" });
        }
        self.is_downloading = true;
        let result = save_copy_inner(doc, dest_dir);
        self.is_downloading = false;
        result
    }
}

fn save_copy_inner(doc: &dyn Document, dest_dir: &Path) -> Result<PathBuf, ExportError> {
    let bytes = doc.data()?;
    let dest = dest_dir.join(suggested_file_name(doc.title().as_deref()));

    // stage next to the destination, promote atomically
    let mut staging = tempfile::Builder::new()
        .prefix(".folio-save-")
        .tempfile_in(dest_dir)?;
    staging.write_all(&bytes)?;
    staging.flush()?;
    staging
        .persist(&dest)
        .map_err(|e| ExportError::Io(e.error))?;

    info!("saved a copy to {}", dest.display());
    Ok(dest)
}

/// A file name derived from the document title, or the fixed fallback.
fn suggested_file_name(title: Option<&str>) -> String {
    let Some(title) = title else {
        return DEFAULT_FILE_NAME.to_string();
    };

    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() {
        warn!("document title unusable as a file name; using the default");
        return DEFAULT_FILE_NAME.to_string();
    }

    if cleaned.to_ascii_lowercase().ends_with(".pdf") {
        cleaned
    } else {
        format!("{cleaned}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeDocument;

    #[test]
    fn test_save_copy_writes_document_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let doc = FakeDocument::from_pages(&[&["hello"]])
            .with_data(b"%PDF-1.7 fake".to_vec())
            .with_title("Quarterly Report");

        let mut exporter = Exporter::new();
        let path = exporter.save_copy(&doc, dir.path()).unwrap();

        assert_eq!(path.file_name().unwrap(), "Quarterly Report.pdf");
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7 fake");
        assert!(!exporter.is_downloading());
    }

    #[test]
    fn test_save_copy_without_title_uses_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let doc = FakeDocument::from_pages(&[&["x"]]).with_data(b"pdf".to_vec());

        let mut exporter = Exporter::new();
        let path = exporter.save_copy(&doc, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), DEFAULT_FILE_NAME);
    }

    #[test]
    fn test_save_copy_failure_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let doc = FakeDocument::from_pages(&[&["x"]]); // no data installed

        let mut exporter = Exporter::new();
        assert!(exporter.save_copy(&doc, dir.path()).is_err());
        assert!(!exporter.is_downloading());

        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_print_failure_releases_spool() {
        let doc = FakeDocument::from_pages(&[&["x"]]); // no data installed
        let mut exporter = Exporter::new();

        assert!(exporter.print(&doc).is_err());
        assert!(!exporter.is_printing());
        assert!(exporter.print_spool.is_none());
    }

    #[test]
    fn test_file_name_sanitization() {
        assert_eq!(suggested_file_name(None), "document.pdf");
        assert_eq!(suggested_file_name(Some("   ")), "document.pdf");
        assert_eq!(suggested_file_name(Some("a/b:c")), "a_b_c.pdf");
        assert_eq!(suggested_file_name(Some("notes.PDF")), "notes.PDF");
    }
}
