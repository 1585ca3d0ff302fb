//! In-document match scanning
//!
//! Walks every page of a document in order and finds literal,
//! case-insensitive occurrences of a query inside the extracted text
//! spans. Produces a flat, globally ordered match list plus a per-page
//! index keyed by span for highlight rendering.

use std::collections::BTreeMap;

use log::debug;
use regex::RegexBuilder;

use crate::document::{Document, DocumentError, TextSpan};

/// One occurrence of the query, globally ordered by discovery.
///
/// Offsets are byte offsets into the span's text, end exclusive, always
/// on character boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    /// 0-based position in the global result list
    pub match_index: usize,
    /// 1-based page
    pub page_number: u32,
    /// Page-local span index
    pub item_index: u32,
    pub start: usize,
    pub end: usize,
}

/// A match as recorded in the per-span index
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpanMatch {
    pub match_index: usize,
    pub start: usize,
    pub end: usize,
}

/// Page number → item index → matches in that span, ordered by start,
/// non-overlapping.
pub type PageMatchIndex = BTreeMap<u32, BTreeMap<u32, Vec<SpanMatch>>>;

/// The outcome of one full scan. `results` and `page_matches` describe
/// the same matches and are only ever built together.
#[derive(Clone, Debug, Default)]
pub struct SearchResults {
    pub results: Vec<Match>,
    pub page_matches: PageMatchIndex,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Matches recorded for one span, if any.
    pub fn span_matches(&self, page: u32, item_index: u32) -> Option<&[SpanMatch]> {
        self.page_matches
            .get(&page)?
            .get(&item_index)
            .map(Vec::as_slice)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Retrieval(#[from] DocumentError),
}

/// Scan the whole document for `query`.
///
/// The query is treated as a literal substring, matched case-insensitively;
/// regex metacharacters in it are escaped. An empty or whitespace-only
/// query short-circuits to an empty result set. If text retrieval fails
/// for any page the entire scan is abandoned — no partial results.
pub fn find_matches(query: &str, doc: &dyn Document) -> Result<SearchResults, SearchError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Ok(SearchResults::default());
    }

    let pattern = RegexBuilder::new(&regex::escape(trimmed))
        .case_insensitive(true)
        .build()
        .expect("escaped literal is a valid pattern");

    let mut out = SearchResults::default();

    for page in 1..=doc.page_count() {
        let spans = doc.page_text(page)?;
        scan_page(&pattern, page, &spans, &mut out);
    }

    debug!("search for {trimmed:?}: {} matches", out.len());
    Ok(out)
}

fn scan_page(pattern: &regex::Regex, page: u32, spans: &[TextSpan], out: &mut SearchResults) {
    for span in spans {
        if span.text.is_empty() {
            continue;
        }

        // find_iter resumes past each match's end, so overlapping
        // occurrences are not double-counted.
        for found in pattern.find_iter(&span.text) {
            let match_index = out.results.len();
            out.results.push(Match {
                match_index,
                page_number: page,
                item_index: span.item_index,
                start: found.start(),
                end: found.end(),
            });
            out.page_matches
                .entry(page)
                .or_default()
                .entry(span.item_index)
                .or_default()
                .push(SpanMatch {
                    match_index,
                    start: found.start(),
                    end: found.end(),
                });
        }
    }
}
