use folio::document::{Document, PagedTextDocument};
use folio::highlight::render_span;
use folio::search_engine::find_matches;
use folio::viewer::ViewerState;

fn sample_doc() -> PagedTextDocument {
    PagedTextDocument::from_bytes(
        b"intro text\nsome <b>bold</b> claim\n\x0cfinal page text\n".to_vec(),
        Some("sample".to_string()),
    )
}

#[test]
fn test_text_layer_to_markup_pipeline() {
    let doc = sample_doc();
    let found = find_matches("bold", &doc).unwrap();
    assert_eq!(found.len(), 1);

    // the matched span carries markup-sensitive characters around the hit
    let spans = doc.page_text(1).unwrap();
    let span = &spans[1];
    let markup = render_span(
        &span.text,
        span.item_index,
        1,
        &found.page_matches,
        found.results[0].match_index,
    );

    assert_eq!(
        markup,
        "some &lt;b&gt;<mark class=\"match match--active\">bold</mark>&lt;/b&gt; claim"
    );

    // spans without matches are escaped but unwrapped
    let untouched = render_span(&spans[0].text, 0, 1, &found.page_matches, 0);
    assert_eq!(untouched, "intro text");
}

#[test]
fn test_programmatic_jump_then_visibility_settles() {
    let mut viewer = ViewerState::new();
    viewer.set_document(9);

    viewer.go_to_page(7);
    assert_eq!(viewer.current_page(), 7);
    assert!(viewer.scroll.is_pending());

    // pages flying past during the smooth scroll must not move the field
    viewer.observe_visibility(3, 0.9);
    viewer.observe_visibility(5, 1.0);
    assert_eq!(viewer.current_page(), 7);

    viewer.observe_visibility(7, 0.8);
    assert!(!viewer.scroll.is_pending());

    // now hand-scrolling is trusted again
    viewer.observe_visibility(8, 0.7);
    assert_eq!(viewer.current_page(), 8);
    assert_eq!(viewer.page_input, "8");
}

#[test]
fn test_document_bytes_flow_through_export() {
    use folio::export::Exporter;

    let dir = tempfile::tempdir().unwrap();
    let doc = sample_doc();

    let mut exporter = Exporter::new();
    let path = exporter.save_copy(&doc, dir.path()).unwrap();

    assert_eq!(path.file_name().unwrap(), "sample.pdf");
    assert_eq!(std::fs::read(&path).unwrap(), doc.data().unwrap());
}
