//! Loading item sets from record sources and JSON batches.

use marginalia::{
    DocumentRecord, Error, HighlightRecord, ItemSet, LoadReport, Loader, RecordBatch,
    RecordSource, ShapePolicy,
};

/// A corpus lists documents only.
struct Corpus(Vec<DocumentRecord>);

impl RecordSource for Corpus {
    fn documents(&self) -> Vec<DocumentRecord> {
        self.0.clone()
    }
}

const TOPIC: &str = r#"{
    "documents": [
        {"id": "doc1", "name": "One", "resource": "http://example.org/1"},
        {"id": "pic", "name": "Picture", "resource": "http://example.org/pic.png"}
    ],
    "highlights": [
        {"parentItemId": "doc1", "coordinates": [10, 0], "text": ["reversed"]},
        {"parentItemId": "doc1", "coordinates": [5, 15], "text": ["second"]},
        {"parentItemId": "doc1", "coordinates": [1, 2, 3]},
        {"parentItemId": "pic", "coordinates": [0, 0, 10, 10]},
        {"parentItemId": "pic", "coordinates": [10, 10, 20, 20]},
        {"parentItemId": "ghost", "coordinates": [0, 1], "text": ["boo"]}
    ]
}"#;

#[test]
fn corpus_source_builds_bare_documents() {
    let corpus = Corpus(vec![
        DocumentRecord::new("a", "A", "http://example.org/a", ""),
        DocumentRecord::new("b", "B", "http://example.org/b", ""),
    ]);
    let set = ItemSet::from_source(&corpus).unwrap();
    assert_eq!(set.count_items(), 2);
    assert_eq!(set.count_highlights(), 0);
    assert_eq!(set.get("b").unwrap().name(), "B");
}

#[test]
fn strict_load_of_topic_fails_on_three_coordinates() {
    let batch = RecordBatch::from_json(TOPIC).unwrap();
    let err = ItemSet::from_source(&batch).unwrap_err();
    assert!(matches!(err, Error::UnsupportedHighlightShape(3)));
}

#[test]
fn lenient_load_of_topic_reports_everything() {
    let batch = RecordBatch::from_json(TOPIC).unwrap();
    let (set, report) = Loader::new()
        .with_shape_policy(ShapePolicy::Skip)
        .load_source(&batch)
        .unwrap();

    assert_eq!(
        report,
        LoadReport {
            documents: 2,
            highlights: 5,
            skipped_shapes: 1,
            orphaned: 0,
        }
    );
    assert_eq!(set.count_items(), 3);

    // [0,10) from reversed bounds overlaps [5,15).
    let doc1 = set.get("doc1").unwrap();
    assert_eq!(doc1.len(), 1);
    let span = doc1.highlights()[0].as_span().unwrap();
    assert_eq!((span.begin(), span.end()), (0, 15));
    assert_eq!(span.texts(), ["reversed", "second"]);

    // Corner-touching regions stay apart.
    assert_eq!(set.get("pic").unwrap().len(), 2);

    let ghost = set.get("ghost").unwrap();
    assert!(ghost.resource().is_empty());
    assert_eq!(ghost.len(), 1);
}

#[test]
fn orphans_can_be_dropped() {
    let batch = RecordBatch::from_json(TOPIC).unwrap();
    let (set, report) = Loader::new()
        .skip_unsupported(true)
        .create_missing_items(false)
        .load_source(&batch)
        .unwrap();

    assert!(!set.contains("ghost"));
    assert_eq!(report.orphaned, 1);
    assert_eq!(report.highlights, 4);
}

#[test]
fn unknown_fields_are_ignored_and_missing_ones_default() {
    let batch = RecordBatch::from_json(
        r#"{
            "documents": [{"id": "d", "extra": 1}],
            "highlights": [{"item": "d", "coordinates": [2, 4]}]
        }"#,
    )
    .unwrap();
    assert!(batch.documents[0].name.is_empty());
    assert!(batch.highlights[0].text.is_none());

    let set = ItemSet::from_source(&batch).unwrap();
    let span = set.get("d").unwrap().highlights()[0].as_span().unwrap().clone();
    assert!(span.texts().is_empty());
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(RecordBatch::from_json(r#"{"documents": [{"name": "no id"}]}"#).is_err());
    assert!(RecordBatch::from_json("not json").is_err());
}

#[test]
fn records_serialize_back_to_json() {
    let record = HighlightRecord::new("doc1", vec![0, 4]).with_text(["hi"]);
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"item": "doc1", "coordinates": [0, 4], "text": ["hi"]})
    );

    let bare = serde_json::to_value(HighlightRecord::new("doc1", vec![0, 0, 1, 1])).unwrap();
    assert!(bare.get("text").is_none());
}

#[test]
fn documents_extend_an_existing_set() {
    let mut set = ItemSet::from_records(
        &[DocumentRecord::new("a", "Original", "http://example.org/a", "")],
        &[HighlightRecord::new("a", vec![0, 3]).with_text(["x"])],
    )
    .unwrap();

    set.extend(vec![
        DocumentRecord::new("a", "Renamed", "http://elsewhere/a", ""),
        DocumentRecord::new("b", "B", "http://example.org/b", ""),
    ]);

    assert_eq!(set.count_items(), 2);
    assert_eq!(set.get("a").unwrap().name(), "Original");
    assert_eq!(set.get("a").unwrap().len(), 1);
}
