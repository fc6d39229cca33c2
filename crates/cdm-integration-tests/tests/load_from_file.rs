//! # Loading From Files
//!
//! `load_from_file` reads UTF-8 JSON from disk and delegates to `loads`,
//! including validation. Schema mirrors configured with `CDM_SCHEMA_DIR`
//! take precedence over the bundled documents.

use std::fs;

use cdm_codec::{Codec, CodecConfig, CodecError, Validation};
use cdm_core::Strictness;
use cdm_messages::{AssignResourcesRequest, DishAllocation, ScanRequest};
use cdm_schema::SchemaTier;
use serde_json::json;

const SCAN_2_1: &str = "https://schema.skao.int/ska-tmc-scan/2.1";

#[test]
fn loads_a_legacy_document_from_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("assign.json");
    fs::write(&path, r#"{"subarrayID": 1, "dish": {"receptorIDList": ["0001", "0002"]}}"#).unwrap();

    let request: AssignResourcesRequest = Codec::embedded_ignoring_env().unwrap().load_from_file(&path).unwrap();
    assert_eq!(
        request,
        AssignResourcesRequest::new(1, DishAllocation::new(["0001", "0002"])).unwrap()
    );
}

#[test]
fn file_contents_are_validated() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("scan.json");
    fs::write(&path, json!({"interface": SCAN_2_1, "scan_duration": 5.0}).to_string()).unwrap();

    let codec = Codec::embedded_ignoring_env().unwrap();
    let err = codec.load_from_file::<ScanRequest>(&path).unwrap_err();
    assert!(matches!(err, CodecError::Validation(ref v) if v.tier == SchemaTier::Basic));

    let lenient = Validation::with_strictness(Strictness::BasicWarn);
    let scan: ScanRequest = codec.load_from_file_with(&path, lenient).unwrap();
    assert_eq!(scan.scan_id, None);
}

#[test]
fn missing_file_is_an_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nope.json");
    let err = Codec::embedded_ignoring_env()
        .unwrap()
        .load_from_file::<ScanRequest>(&path)
        .unwrap_err();
    match err {
        CodecError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn malformed_file_is_a_parse_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("broken.json");
    fs::write(&path, "{\"scan_id\": ").unwrap();
    let err = Codec::embedded_ignoring_env()
        .unwrap()
        .load_from_file::<ScanRequest>(&path)
        .unwrap_err();
    assert!(matches!(err, CodecError::MessageParse(_)));
}

#[test]
fn schema_directory_shadows_bundled_documents() {
    let schemas = tempfile::tempdir().unwrap();
    // A local copy of the scan schema that no longer requires scan_id.
    let relaxed = json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": SCAN_2_1,
        "type": "object",
        "properties": {
            "interface": {"const": SCAN_2_1},
            "scan_duration": {"type": "number"}
        },
        "required": ["interface"]
    });
    fs::write(schemas.path().join("scan.json"), relaxed.to_string()).unwrap();

    let codec = Codec::new(&CodecConfig {
        schema_dir: Some(schemas.path().to_path_buf()),
        ..CodecConfig::default()
    })
    .unwrap();

    let docs = tempfile::tempdir().unwrap();
    let path = docs.path().join("scan.json");
    fs::write(&path, json!({"interface": SCAN_2_1, "scan_duration": 5.0}).to_string()).unwrap();

    let strict = Validation::with_strictness(Strictness::AllError);
    let scan: ScanRequest = codec.load_from_file_with(&path, strict).unwrap();
    assert_eq!(scan.interface.as_deref(), Some(SCAN_2_1));
}
