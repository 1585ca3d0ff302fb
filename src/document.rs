//! Engine-facing boundary for the viewer
//!
//! The viewer never touches a PDF engine directly. Everything it needs —
//! page count, per-page extracted text, raw bytes for export — comes
//! through the [`Document`] trait, and everything that moves the view
//! goes through [`Navigator`].

/// One fragment of extractable text on a page, as reported by the engine.
///
/// The item index is page-local and stable only within one extraction
/// pass; it is how highlight ranges find their way back to the span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub item_index: u32,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, item_index: u32) -> Self {
        Self {
            text: text.into(),
            item_index,
        }
    }
}

/// Faults crossing the engine boundary
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("text extraction failed for page {page}: {detail}")]
    Extraction { page: u32, detail: String },

    #[error("document bytes unavailable: {0}")]
    Data(String),
}

impl DocumentError {
    pub fn extraction(page: u32, detail: impl Into<String>) -> Self {
        Self::Extraction {
            page,
            detail: detail.into(),
        }
    }
}

/// A loaded document, as far as the viewer is concerned.
///
/// Pages are numbered from 1. `page_text` may fail per page; callers
/// decide whether a single failure poisons the whole operation (the
/// search scan does).
pub trait Document {
    fn page_count(&self) -> u32;

    /// Ordered text spans for one page, 1-based.
    fn page_text(&self, page: u32) -> Result<Vec<TextSpan>, DocumentError>;

    /// The raw document bytes, for print/save-a-copy.
    fn data(&self) -> Result<Vec<u8>, DocumentError>;

    fn title(&self) -> Option<String> {
        None
    }
}

/// Scroll/select a page in the document view. Fire-and-forget: calls are
/// signals of intent, the last requested page wins, and repeating the
/// current page is a no-op for the receiver.
pub trait Navigator {
    fn go_to_page(&mut self, page: u32);
}

/// Pre-extracted text layer as a document: pages separated by form
/// feeds, one span per non-empty line. This is what the binary opens
/// until an engine-backed adapter is wired in.
// TODO: mupdf-backed adapter once the raster surface lands
#[derive(Clone, Debug)]
pub struct PagedTextDocument {
    pages: Vec<Vec<TextSpan>>,
    raw: Vec<u8>,
    title: Option<String>,
}

impl PagedTextDocument {
    pub fn from_bytes(raw: Vec<u8>, title: Option<String>) -> Self {
        let text = String::from_utf8_lossy(&raw);
        let pages = text
            .split('\u{c}')
            .map(|page| {
                page.lines()
                    .filter(|line| !line.trim().is_empty())
                    .enumerate()
                    .map(|(i, line)| TextSpan::new(line, i as u32))
                    .collect()
            })
            .collect();
        Self { pages, raw, title }
    }
}

impl Document for PagedTextDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page: u32) -> Result<Vec<TextSpan>, DocumentError> {
        self.pages
            .get(page.saturating_sub(1) as usize)
            .cloned()
            .ok_or_else(|| DocumentError::extraction(page, "page out of range"))
    }

    fn data(&self) -> Result<Vec<u8>, DocumentError> {
        Ok(self.raw.clone())
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paged_text_document_splits_on_form_feed() {
        let doc = PagedTextDocument::from_bytes(
            b"first page\nsecond line\n\x0csecond page\n".to_vec(),
            Some("notes".to_string()),
        );

        assert_eq!(doc.page_count(), 2);
        let page1 = doc.page_text(1).unwrap();
        assert_eq!(page1.len(), 2);
        assert_eq!(page1[0], TextSpan::new("first page", 0));
        assert_eq!(page1[1], TextSpan::new("second line", 1));
        assert_eq!(doc.page_text(2).unwrap()[0].text, "second page");
        assert!(doc.page_text(3).is_err());
    }

    #[test]
    fn test_blank_lines_are_not_spans() {
        let doc = PagedTextDocument::from_bytes(b"a\n\n\nb\n".to_vec(), None);
        let spans = doc.page_text(1).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1], TextSpan::new("b", 1));
    }
}
