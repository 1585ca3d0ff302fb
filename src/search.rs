//! Search session state
//!
//! One open search interaction over the current document: the query, the
//! results of the last completed scan, the active match pointer, and the
//! busy/error flags the overlay renders. All mutation goes through the
//! operations here; results and the page index are only ever replaced
//! together.

use log::{info, warn};

use crate::document::{Document, Navigator};
use crate::search_engine::{self, Match, PageMatchIndex, SearchResults};

/// Fixed user-facing message for a failed scan. The query is preserved
/// so the user can retry as-is.
pub const SEARCH_FAILED_MESSAGE: &str = "Unable to search this document.";

#[derive(Debug, Default)]
pub struct SearchSession {
    pub is_open: bool,
    pub query: String,
    pub is_searching: bool,
    pub error_message: Option<String>,
    results: SearchResults,
    active_match_index: usize,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Close the overlay, discarding all search state.
    pub fn close(&mut self) {
        self.is_open = false;
        self.query.clear();
        self.reset_results();
    }

    pub fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    /// The document was replaced; nothing from the old scan is valid.
    pub fn reset_for_document(&mut self) {
        self.query.clear();
        self.reset_results();
        self.is_open = false;
    }

    /// Update the query text. A query that trims to empty clears the
    /// results immediately (back to Open/Idle) without closing.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        if self.query.trim().is_empty() {
            self.reset_results();
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        if self.query.trim().is_empty() {
            self.reset_results();
        }
    }

    /// Run the scan for the current query.
    ///
    /// Ignored while a scan is already in flight. On success the results
    /// replace the previous ones atomically and navigation is requested
    /// to the first match's page. On failure all results are dropped, the
    /// fixed error message is set, and the query stays put.
    pub fn submit(&mut self, doc: &dyn Document, nav: &mut dyn Navigator) {
        if self.is_searching {
            warn!("search submitted while a scan is in flight; ignored");
            return;
        }

        if self.query.trim().is_empty() || doc.page_count() == 0 {
            self.reset_results();
            return;
        }

        self.is_searching = true;
        self.error_message = None;

        let outcome = search_engine::find_matches(&self.query, doc);
        self.is_searching = false;

        match outcome {
            Ok(results) => {
                info!("search {:?}: {} matches", self.query.trim(), results.len());
                self.results = results;
                self.active_match_index = 0;
                if let Some(first) = self.results.results.first() {
                    nav.go_to_page(first.page_number);
                }
            }
            Err(err) => {
                warn!("search failed: {err}");
                self.reset_results();
                self.error_message = Some(SEARCH_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Step to the next match, wrapping past the end.
    pub fn select_next(&mut self, nav: &mut dyn Navigator) {
        self.step(1, nav);
    }

    /// Step to the previous match, wrapping past the start.
    pub fn select_previous(&mut self, nav: &mut dyn Navigator) {
        self.step(-1, nav);
    }

    fn step(&mut self, direction: isize, nav: &mut dyn Navigator) {
        let total = self.results.len();
        if total == 0 {
            return;
        }

        let current = self.active_match_index.min(total - 1);
        self.active_match_index =
            (current as isize + direction).rem_euclid(total as isize) as usize;

        if let Some(m) = self.results.results.get(self.active_match_index) {
            nav.go_to_page(m.page_number);
        }
    }

    pub fn total_matches(&self) -> usize {
        self.results.len()
    }

    pub fn has_matches(&self) -> bool {
        !self.results.is_empty()
    }

    /// Active match index, clamped in case results shrank underneath it.
    pub fn active_match_index(&self) -> usize {
        if self.results.is_empty() {
            0
        } else {
            self.active_match_index.min(self.results.len() - 1)
        }
    }

    pub fn active_match(&self) -> Option<&Match> {
        self.results.results.get(self.active_match_index())
    }

    pub fn matches(&self) -> &[Match] {
        &self.results.results
    }

    pub fn page_matches(&self) -> &PageMatchIndex {
        &self.results.page_matches
    }

    /// Counter for the overlay: "3 / 14", or "0 / 0" with no matches.
    pub fn counter_label(&self) -> String {
        if self.results.is_empty() {
            "0 / 0".to_string()
        } else {
            format!("{} / {}", self.active_match_index() + 1, self.results.len())
        }
    }

    fn reset_results(&mut self) {
        self.results = SearchResults::default();
        self.active_match_index = 0;
        self.error_message = None;
    }
}
