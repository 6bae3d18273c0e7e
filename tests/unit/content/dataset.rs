use super::*;

const SAMPLE: &str = r#"{
  "id": "witnesses",
  "title": "Who saw what",
  "records": [
    { "kind": "timeline_event", "id": "alarm", "title": "Alarm raised", "date": "1911-03-04 02:10",
      "significance": "high" },
    { "kind": "testimony", "id": "keeper", "title": "Night keeper", "witness": "A. Brandt",
      "role": "warehouse keeper", "references": ["alarm"],
      "source": { "label": "Inquest transcript, p. 14" } },
    { "kind": "investigation", "id": "cause", "title": "Cause of the fire", "status": "disputed" },
    { "kind": "relationship", "id": "keeper-cause", "title": "Keeper's account", "from": "keeper",
      "to": "cause", "label": "contradicts" }
  ]
}"#;

#[test]
fn parses_all_record_kinds() {
    let ds = Dataset::from_json_str(SAMPLE).unwrap();
    assert_eq!(ds.len(), 4);
    let kinds: Vec<_> = ds.records.iter().map(Record::kind).collect();
    assert_eq!(
        kinds,
        ["timeline_event", "testimony", "investigation", "relationship"]
    );
    assert_eq!(ds.get("alarm").unwrap().meta().significance, Significance::High);
    assert_eq!(ds.get("cause").unwrap().meta().significance, Significance::Medium);
    assert_eq!(
        ds.get("keeper").unwrap().meta().source.as_ref().unwrap().url,
        None
    );
    assert_eq!(ds.position("cause"), Some(2));
}

#[test]
fn rejects_unknown_kind_at_parse_time() {
    let s = r#"{ "id": "d", "records": [ { "kind": "rumor", "id": "x", "title": "x" } ] }"#;
    let err = Dataset::from_json_str(s).unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"), "{err}");
}

#[test]
fn rejects_missing_type_specific_field() {
    let s = r#"{ "id": "d", "records": [ { "kind": "investigation", "id": "x", "title": "x" } ] }"#;
    assert!(matches!(Dataset::from_json_str(s), Err(ReelError::Serde(_))));
}

#[test]
fn rejects_duplicate_ids() {
    let mut ds = Dataset::from_json_str(SAMPLE).unwrap();
    let dup = ds.records[0].clone();
    ds.records.push(dup);
    let err = ds.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate record id 'alarm'"), "{err}");
}

#[test]
fn rejects_dangling_references_and_endpoints() {
    let s = SAMPLE.replace(r#""references": ["alarm"]"#, r#""references": ["fog"]"#);
    let err = Dataset::from_json_str(&s).unwrap_err();
    assert!(err.to_string().contains("unknown id 'fog'"), "{err}");

    let s = SAMPLE.replace(r#""to": "cause""#, r#""to": "harbor""#);
    assert!(matches!(Dataset::from_json_str(&s), Err(ReelError::Content(_))));
}

#[test]
fn rejects_empty_ids() {
    let s = r#"{ "id": " ", "records": [] }"#;
    assert!(matches!(Dataset::from_json_str(s), Err(ReelError::Content(_))));
    let s = r#"{ "id": "d", "records": [ { "kind": "investigation", "id": "", "title": "x", "status": "open" } ] }"#;
    assert!(matches!(Dataset::from_json_str(s), Err(ReelError::Content(_))));
}

#[test]
fn load_reports_missing_file() {
    let err = Dataset::load(Path::new("/nonexistent/scrollreel/ds.json")).unwrap_err();
    assert!(matches!(err, ReelError::Other(_)));
    assert!(err.to_string().contains("read dataset"), "{err}");
}
