use super::*;
use hotcomments_models::StarRating;
use tempfile::tempdir;

fn record(id: &str, rating: Option<u8>, content: &str) -> CommentRecord {
    CommentRecord {
        comment_id: id.to_string(),
        username: "豆友".to_string(),
        rating: rating.and_then(StarRating::new),
        content: content.to_string(),
        votes: 42,
        time: "2024-01-05 21:13:02".to_string(),
    }
}

fn sample_records() -> Vec<CommentRecord> {
    vec![
        record("3", Some(5), "配乐绝了"),
        record("1", None, "plain, with \"quotes\"\nand a newline"),
        record("2", Some(1), "一星"),
    ]
}

#[test]
fn test_json_round_trip_preserves_order_and_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("comments.json");
    let records = sample_records();

    assert!(export_json(&records, &path).is_written());
    let loaded = load_json(&path).unwrap();

    assert_eq!(loaded.len(), records.len());
    assert_eq!(loaded, records);
}

#[test]
fn test_json_format_is_indented_and_literal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("comments.json");

    write_json(&[record("3", Some(5), "配乐绝了")], &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();

    assert!(text.starts_with("[\n    {\n        \"comment_id\": \"3\""));
    assert!(text.contains("\"content\": \"配乐绝了\""));
    assert!(text.contains("\"rating\": 5"));
    assert!(!text.contains("\\u"));
}

#[test]
fn test_json_missing_rating_is_empty_string() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("comments.json");

    write_json(&[record("1", None, "x")], &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"rating\": \"\""));
}

#[test]
fn test_json_empty_collection_writes_empty_array() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("comments.json");

    assert!(export_json(&[], &path).is_written());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
}

#[test]
fn test_csv_has_bom_header_and_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("comments.csv");

    let outcome = export_csv(&sample_records(), &path);
    assert!(matches!(outcome, ExportOutcome::Written { records: 3, .. }));

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(UTF8_BOM));

    let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
    assert!(text.starts_with("comment_id,username,rating,content,votes,time\r\n"));
    assert!(text.contains("3,豆友,5,配乐绝了,42,2024-01-05 21:13:02\r\n"));
    assert!(text.contains("2,豆友,1,一星,42,"));

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let rows: Vec<CommentRecord> = reader.deserialize().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows, sample_records());
}

#[test]
fn test_csv_empty_collection_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("comments.csv");

    assert!(matches!(export_csv(&[], &path), ExportOutcome::NothingToSave));
    assert!(!path.exists());
}

#[test]
fn test_csv_empty_collection_keeps_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("comments.csv");
    std::fs::write(&path, "previous run").unwrap();

    assert!(matches!(export_csv(&[], &path), ExportOutcome::NothingToSave));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous run");
}

#[test]
fn test_io_failure_is_reported_not_raised() {
    let dir = tempdir().unwrap();
    let json_path = dir.path().join("missing").join("comments.json");
    let csv_path = dir.path().join("missing").join("comments.csv");
    let records = sample_records();

    let json = export_json(&records, &json_path);
    let csv = export_csv(&records, &csv_path);

    assert!(matches!(json, ExportOutcome::Failed { error: ExportError::Io(_), .. }));
    assert!(matches!(csv, ExportOutcome::Failed { error: ExportError::Io(_), .. }));
}
