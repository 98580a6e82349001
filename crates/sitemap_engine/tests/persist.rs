use std::fs;

use sitemap_engine::{ensure_output_dir, ArtifactStore, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("downloads");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn save_replaces_previous_artifact() {
    let temp = TempDir::new().unwrap();
    let store = ArtifactStore::new(temp.path().join("downloads"));

    let first = store.save("comprehensive_sitemap.xml", b"<urlset/>").unwrap();
    assert_eq!(first.file_name().unwrap(), "comprehensive_sitemap.xml");
    assert_eq!(fs::read(&first).unwrap(), b"<urlset/>");

    let second = store
        .save("comprehensive_sitemap.xml", b"<urlset><url/></urlset>")
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"<urlset><url/></urlset>");
}

#[test]
fn refuses_names_that_escape_the_directory() {
    let temp = TempDir::new().unwrap();
    let store = ArtifactStore::new(temp.path().to_path_buf());

    for name in ["../escape.xml", "nested/report.json", "", ".."] {
        let err = store.save(name, b"x").unwrap_err();
        assert!(matches!(err, PersistError::InvalidName(_)), "{name}");
    }
    assert!(!temp.path().join("../escape.xml").exists());
}

#[test]
fn no_partial_file_when_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let store = ArtifactStore::new(file_path.clone());
    let result = store.save("report.json", b"{}");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("report.json").exists());
}
