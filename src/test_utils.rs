//! In-memory doubles for the engine boundary, shared by unit and
//! integration tests.

use crate::document::{Document, DocumentError, Navigator, TextSpan};

/// A document whose pages are plain string spans, with optional per-page
/// extraction failures and optional raw bytes.
#[derive(Clone, Debug, Default)]
pub struct FakeDocument {
    pages: Vec<Vec<TextSpan>>,
    failing_pages: Vec<u32>,
    data: Option<Vec<u8>>,
    title: Option<String>,
}

impl FakeDocument {
    /// One inner slice per page; one span per string, item indices in
    /// order of appearance.
    pub fn from_pages(pages: &[&[&str]]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|spans| {
                    spans
                        .iter()
                        .enumerate()
                        .map(|(i, text)| TextSpan::new(*text, i as u32))
                        .collect()
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Make text extraction fail for the given 1-based page.
    pub fn failing_on(mut self, page: u32) -> Self {
        self.failing_pages.push(page);
        self
    }

    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Document for FakeDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page: u32) -> Result<Vec<TextSpan>, DocumentError> {
        if self.failing_pages.contains(&page) {
            return Err(DocumentError::extraction(page, "simulated failure"));
        }
        self.pages
            .get(page.saturating_sub(1) as usize)
            .cloned()
            .ok_or_else(|| DocumentError::extraction(page, "page out of range"))
    }

    fn data(&self) -> Result<Vec<u8>, DocumentError> {
        self.data
            .clone()
            .ok_or_else(|| DocumentError::Data("no bytes installed".to_string()))
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }
}

/// Records every page the search session asks to navigate to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub visited: Vec<u32>,
}

impl Navigator for RecordingNavigator {
    fn go_to_page(&mut self, page: u32) {
        self.visited.push(page);
    }
}
