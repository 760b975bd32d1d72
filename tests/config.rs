use assert_matches::assert_matches;

use citedex::config::{ConfigLoader, DEFAULT_DB_PATH};
use citedex::error::CitedexError;

#[test]
fn explicit_config_file_is_honored() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("citedex.json");
    std::fs::write(&path, r#"{"db_path": "papers.db", "default_rows": 20}"#).unwrap();

    let resolved = ConfigLoader::resolve(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(resolved.db_path, "papers.db");
    assert_eq!(resolved.default_rows, 20);
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("citedex.json");
    std::fs::write(&path, r#"{"default_rows": 5}"#).unwrap();

    let resolved = ConfigLoader::resolve(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(resolved.db_path, DEFAULT_DB_PATH);
    assert_eq!(resolved.default_rows, 5);
}

#[test]
fn missing_explicit_config_is_an_error() {
    let err = ConfigLoader::resolve(Some("/nonexistent/citedex.json")).unwrap_err();
    assert_matches!(err, CitedexError::ConfigRead(_));
}

#[test]
fn invalid_json_is_a_parse_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("citedex.json");
    std::fs::write(&path, "{broken").unwrap();

    let err = ConfigLoader::resolve(Some(path.to_str().unwrap())).unwrap_err();
    assert_matches!(err, CitedexError::ConfigParse(_));
}
