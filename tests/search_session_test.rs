use folio::document::Navigator;
use folio::search::{SEARCH_FAILED_MESSAGE, SearchSession};
use folio::search_engine::find_matches;
use folio::test_utils::{FakeDocument, RecordingNavigator};

#[test]
fn test_full_search_lifecycle_over_a_document() {
    let doc = FakeDocument::from_pages(&[
        &["The quick brown fox", "jumps over"],
        &["the lazy dog"],
        &["THE END"],
    ]);

    let mut session = SearchSession::new();
    let mut nav = RecordingNavigator::default();

    session.open();
    session.set_query("the");
    session.submit(&doc, &mut nav);

    // "The" (p1), "the" (p2), "THE" (p3)
    assert_eq!(session.total_matches(), 3);
    assert_eq!(session.counter_label(), "1 / 3");
    assert_eq!(nav.visited, vec![1]);

    // cycle forward through every match and wrap
    session.select_next(&mut nav);
    session.select_next(&mut nav);
    session.select_next(&mut nav);
    assert_eq!(session.counter_label(), "1 / 3");
    assert_eq!(nav.visited, vec![1, 2, 3, 1]);

    // backward wraps the other way
    session.select_previous(&mut nav);
    assert_eq!(session.counter_label(), "3 / 3");
    assert_eq!(nav.visited, vec![1, 2, 3, 1, 3]);

    session.close();
    assert_eq!(session.total_matches(), 0);
    assert!(session.query.is_empty());
}

#[test]
fn test_results_are_rebuilt_atomically_on_resubmit() {
    let doc = FakeDocument::from_pages(&[&["alpha beta alpha"]]);
    let mut session = SearchSession::new();
    let mut nav = RecordingNavigator::default();

    session.open();
    session.set_query("alpha");
    session.submit(&doc, &mut nav);
    assert_eq!(session.total_matches(), 2);

    session.set_query("beta");
    session.submit(&doc, &mut nav);

    // nothing of the old scan survives
    assert_eq!(session.total_matches(), 1);
    assert_eq!(session.active_match_index(), 0);
    let m = session.active_match().unwrap();
    assert_eq!((m.start, m.end), (6, 10));
    assert!(session.page_matches().get(&1).unwrap().get(&0).is_some());
}

#[test]
fn test_retrieval_failure_discards_partial_matches() {
    // page 1 has real matches; the failure on page 3 must erase them too
    let doc = FakeDocument::from_pages(&[&["hit hit"], &["hit"], &["hit"]]).failing_on(3);
    let mut session = SearchSession::new();
    let mut nav = RecordingNavigator::default();

    session.open();
    session.set_query("hit");
    session.submit(&doc, &mut nav);

    assert_eq!(session.total_matches(), 0);
    assert_eq!(session.error_message.as_deref(), Some(SEARCH_FAILED_MESSAGE));
    assert_eq!(session.query, "hit");
    assert!(!session.is_searching);
    assert!(nav.visited.is_empty());
}

#[test]
fn test_match_ordering_is_page_major_then_span_then_offset() {
    let doc = FakeDocument::from_pages(&[&["b a", "a a"], &["a"]]);
    let found = find_matches("a", &doc).unwrap();

    let positions: Vec<(u32, u32, usize)> = found
        .results
        .iter()
        .map(|m| (m.page_number, m.item_index, m.start))
        .collect();

    assert_eq!(
        positions,
        vec![(1, 0, 2), (1, 1, 0), (1, 1, 2), (2, 0, 0)]
    );
    for (i, m) in found.results.iter().enumerate() {
        assert_eq!(m.match_index, i);
    }
}

#[test]
fn test_navigator_receives_every_step_target() {
    struct LastWins(u32);
    impl Navigator for LastWins {
        fn go_to_page(&mut self, page: u32) {
            // fire-and-forget: each call supersedes the pending intent
            self.0 = page;
        }
    }

    let doc = FakeDocument::from_pages(&[&["x"], &["x"], &["x"]]);
    let mut session = SearchSession::new();
    let mut nav = LastWins(0);

    session.open();
    session.set_query("x");
    session.submit(&doc, &mut nav);
    session.select_next(&mut nav);
    session.select_next(&mut nav);

    assert_eq!(nav.0, 3);
}
