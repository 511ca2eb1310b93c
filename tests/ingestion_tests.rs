use codeguard::enums::language::Language;
use codeguard::errors::CodeguardError;
use codeguard::services::ingestion::Ingestor;
use codeguard::structs::config::analysis_config::AnalysisConfig;

use crate::common::zip_bytes;

fn ingestor() -> Ingestor {
    Ingestor::new(&AnalysisConfig::default())
}

#[test]
fn test_archive_caps_at_fifty_units_in_container_order() {
    let names: Vec<String> = (0..60).map(|i| format!("src/module_{:02}.py", i)).collect();
    let entries: Vec<(&str, &[u8])> = names.iter().map(|n| (n.as_str(), b"x = 1\n" as &[u8])).collect();

    let units = ingestor().ingest_archive("big.zip", &zip_bytes(&entries)).unwrap();

    assert_eq!(units.len(), 50);
    assert_eq!(units[0].filename, "src/module_00.py");
    assert_eq!(units[49].filename, "src/module_49.py");
}

#[test]
fn test_archive_excludes_manifests_and_vendored_code() {
    let payload = zip_bytes(&[
        ("app/", b""),
        ("app/server.js", b"const http = require('http');\n"),
        ("package.json", b"{\"name\": \"demo\"}"),
        ("node_modules/left-pad/index.js", b"module.exports = 1;\n"),
        ("app/__pycache__/cache.py", b"x = 1\n"),
        ("app/.hidden.py", b"x = 1\n"),
        ("README.md", b"# demo"),
        ("scripts/run.sh", b"echo hi\n"),
    ]);

    let units = ingestor().ingest_archive("upload.zip", &payload).unwrap();
    let names: Vec<&str> = units.iter().map(|u| u.filename.as_str()).collect();

    assert_eq!(names, vec!["app/server.js", "scripts/run.sh"]);
    assert_eq!(units[0].language, Language::Javascript);
    assert_eq!(units[1].language, Language::Bash);
}

#[test]
fn test_archive_drops_blank_and_non_utf8_entries() {
    let payload = zip_bytes(&[
        ("blank.py", b"   \n\t\n"),
        ("binary.py", &[0xff, 0xfe, 0x00, 0x81]),
        ("main.go", b"package main\n"),
    ]);

    let units = ingestor().ingest_archive("mixed.zip", &payload).unwrap();

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].language, Language::Go);
}

#[test]
fn test_archive_without_code_is_rejected() {
    let payload = zip_bytes(&[("README.md", b"# docs"), ("package.json", b"{}")]);

    let err = ingestor().ingest_archive("docs.zip", &payload).unwrap_err();

    match err {
        CodeguardError::IngestionError { reason, .. } => assert_eq!(reason, "No valid code files found in ZIP archive"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_non_zip_payload_is_rejected() {
    let err = ingestor().ingest_archive("notes.txt", b"definitely not a zip").unwrap_err();
    assert!(matches!(err, CodeguardError::IngestionError { .. }));
    assert!(!err.is_recoverable());
}

#[test]
fn test_oversized_payload_is_rejected() {
    let config = AnalysisConfig { max_archive_bytes: 64, ..AnalysisConfig::default() };
    let payload = zip_bytes(&[("main.py", b"print('a fairly long line of python source')\n")]);

    let err = Ingestor::new(&config).ingest_archive("big.zip", &payload).unwrap_err();

    assert!(err.to_string().contains("File size exceeds limit"));
}
