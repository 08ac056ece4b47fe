//! Sitemap file behavior: no-op on empty results, full replacement on
//! rewrite, directory creation.

use imagemap::batch::SitemapEntry;
use imagemap::sitemap::{render, SitemapWriter};
use tempfile::TempDir;

fn entry(loc: &str, images: &[&str]) -> SitemapEntry {
    SitemapEntry {
        loc: loc.to_string(),
        images: images.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_empty_map_writes_no_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out").join("image_sitemap.xml");

    let writer = SitemapWriter::new(path.clone());
    assert!(!writer.write(&[]).unwrap());
    assert!(!path.exists());
    // The parent directory is not created either
    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn test_rewrite_fully_replaces_previous_run() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("image_sitemap.xml");
    let writer = SitemapWriter::new(path.clone());

    let first = vec![
        entry("https://example.com/1", &["https://example.com/a.png"]),
        entry("https://example.com/2", &["https://example.com/b.png"]),
    ];
    let second = vec![entry("https://example.com/3", &["https://example.com/c.png"])];

    assert!(writer.write(&first).unwrap());
    assert!(writer.write(&second).unwrap());

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, render(&second));
    assert!(!content.contains("https://example.com/1"));
    assert!(!content.contains("https://example.com/2"));
}

#[test]
fn test_write_is_stable_across_identical_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("image_sitemap.xml");
    let writer = SitemapWriter::new(path.clone());

    let entries = vec![entry(
        "https://example.com/1",
        &["https://example.com/a.png", "https://example.com/b.png"],
    )];

    writer.write(&entries).unwrap();
    let first = std::fs::read_to_string(&path).unwrap();
    writer.write(&entries).unwrap();
    let second = std::fs::read_to_string(&path).unwrap();
    assert_eq!(first, second);
}
