use std::path::Path;
use wigle2mtscan::output::OutputCompression;
use wigle2mtscan::validation::*;

#[test]
fn test_is_valid_path() {
    assert!(is_valid_path("/some/path.csv").is_ok());
    assert!(is_valid_path("").is_err());
    assert!(is_valid_path("   ").is_err());
    assert!(is_valid_path("path/with\0/null.csv").is_err());
}

#[test]
fn test_is_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("scan.csv");
    std::fs::write(&file, "").unwrap();

    assert!(is_existing_file(&file).is_ok());
    assert!(is_existing_file(&dir.path().join("missing.csv")).is_err());
    // A directory is not an input file
    assert!(is_existing_file(dir.path()).is_err());
}

#[test]
fn test_output_compression() {
    assert_eq!(
        output_compression(Path::new("a.mtscan")),
        Ok(OutputCompression::None)
    );
    assert_eq!(
        output_compression(Path::new("dir/a.mtscan.gz")),
        Ok(OutputCompression::Gzip)
    );
    assert!(output_compression(Path::new("a.csv")).is_err());
    assert!(output_compression(Path::new("a.mtscan.zip")).is_err());
}

#[test]
fn test_is_valid_date_range() {
    assert!(is_valid_date_range(None, None).is_ok());
    assert!(is_valid_date_range(Some(100), None).is_ok());
    assert!(is_valid_date_range(None, Some(100)).is_ok());
    assert!(is_valid_date_range(Some(100), Some(100)).is_ok());
    assert!(is_valid_date_range(Some(100), Some(99)).is_err());
}

#[test]
fn test_is_in_range() {
    assert!(is_in_range(5, 0..=9).is_ok());
    assert!(is_in_range(10, 0..=9).is_err());
}

#[test]
fn test_is_one_of() {
    assert!(is_one_of("info", &["info", "debug"]).is_ok());
    assert!(is_one_of("INFO", &["info", "debug"]).is_ok());
    assert!(is_one_of("loud", &["info", "debug"]).is_err());
}
