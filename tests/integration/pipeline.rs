//! End-to-end batch pipeline tests: enqueue roots, run, finish, inspect the
//! written sitemap.

use super::support::*;
use imagemap::batch::BatchRunner;
use imagemap::entity::EntityId;
use imagemap::sitemap::SitemapWriter;
use tempfile::TempDir;

#[test]
fn test_batch_through_blocks_to_sitemap_file() {
    let schema = site_schema();
    let store = store_with(vec![
        file("f1", "https://example.com/hero.png"),
        file("f2", "https://example.com/embedded.png"),
        block("b1", "uuid-b1", vec![ref_field("field_media", &["f2"])]),
        article(
            "n1",
            vec![
                ref_field("field_image", &["f1"]),
                block_field("field_blocks", &["block_content:uuid-b1"]),
            ],
        ),
        article("n2", vec![]),
    ]);

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sitemaps").join("image_sitemap.xml");

    let mut runner = BatchRunner::new(&schema, &store);
    runner.enqueue(EntityId::new("n1"));
    runner.enqueue(EntityId::new("n2"));
    runner.run();

    let summary = runner.finish(&SitemapWriter::new(path.clone()));
    assert!(summary.written);
    assert_eq!(summary.urls, 1);
    assert_eq!(summary.failures.len(), 1);

    let xml = std::fs::read_to_string(&path).unwrap();
    assert!(xml.contains("<loc>https://example.com/n1</loc>"));
    assert!(xml.contains("<image:loc>https://example.com/hero.png</image:loc>"));
    assert!(xml.contains("<image:loc>https://example.com/embedded.png</image:loc>"));
    // The image field precedes the block field in the schema
    let hero = xml.find("hero.png").unwrap();
    let embedded = xml.find("embedded.png").unwrap();
    assert!(hero < embedded);
    // The failed root contributes no url entry
    assert!(!xml.contains("https://example.com/n2"));
}

#[test]
fn test_cyclic_graph_batch_terminates_and_writes() {
    let schema = site_schema();
    // n1 embeds block b1; b1's media field references n1's id (dangling as
    // media but present as an entity), and also a real file
    let store = store_with(vec![
        file("f1", "https://example.com/a.png"),
        block(
            "b1",
            "uuid-b1",
            vec![ref_field("field_media", &["f1", "n1"])],
        ),
        article(
            "n1",
            vec![block_field("field_blocks", &["block_content:uuid-b1"])],
        ),
    ]);

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("image_sitemap.xml");

    let mut runner = BatchRunner::new(&schema, &store);
    runner.enqueue(EntityId::new("n1"));
    runner.run();

    let summary = runner.finish(&SitemapWriter::new(path.clone()));
    assert!(summary.written);

    let xml = std::fs::read_to_string(&path).unwrap();
    assert_eq!(xml.matches("image:image").count(), 2); // open + close tag
    assert!(xml.contains("https://example.com/a.png"));
}

#[test]
fn test_checkpointed_stepping_matches_full_run() {
    let schema = site_schema();
    let entities = vec![
        file("f1", "https://example.com/a.png"),
        article("n1", vec![ref_field("field_image", &["f1"])]),
        article("n2", vec![ref_field("field_image", &["f1"])]),
    ];

    let stepped_store = store_with(entities.clone());
    let mut stepped = BatchRunner::new(&schema, &stepped_store);
    stepped.enqueue(EntityId::new("n1"));
    stepped.enqueue(EntityId::new("n2"));
    // Host pauses between operations
    while stepped.step().is_some() {
        assert!(stepped.remaining() <= 1);
    }

    let full_store = store_with(entities);
    let mut full = BatchRunner::new(&schema, &full_store);
    full.enqueue(EntityId::new("n1"));
    full.enqueue(EntityId::new("n2"));
    full.run();

    assert_eq!(stepped.context().entries, full.context().entries);
    assert_eq!(stepped.context().failures, full.context().failures);
}

#[test]
fn test_snapshot_rebuild_via_run_context() {
    use imagemap::cli::{Commands, RunContext};

    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path();

    let config_dir = workspace.join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "bundles = [\"article\"]\n\n[output]\ndirectory = \"public\"\n",
    )
    .unwrap();

    let snapshot_path = workspace.join("snapshot.json");
    std::fs::write(
        &snapshot_path,
        r#"{
            "entities": [
                {"kind": "file", "id": "f1", "url": "https://example.com/a.png"},
                {
                    "kind": "content",
                    "id": "n1",
                    "bundle": "article",
                    "canonical_url": "https://example.com/node/1",
                    "fields": [
                        {"name": "field_image", "payload": {"references": ["f1"]}}
                    ]
                },
                {
                    "kind": "content",
                    "id": "n2",
                    "bundle": "article",
                    "canonical_url": "https://example.com/node/2",
                    "fields": []
                }
            ],
            "schema": [
                {
                    "entity_type": "content",
                    "bundle": "article",
                    "fields": [{"name": "field_image", "field_type": "image"}]
                }
            ]
        }"#,
    )
    .unwrap();

    let context = RunContext::new(workspace.to_path_buf(), None).unwrap();
    let output = context
        .execute(&Commands::Rebuild {
            snapshot: snapshot_path,
            output: None,
        })
        .unwrap();

    assert!(output.starts_with("Process finished successfully."));
    assert!(output.contains("https://example.com/node/2"));

    let sitemap = workspace.join("public").join("image_sitemap.xml");
    assert!(sitemap.is_file());
    let xml = std::fs::read_to_string(sitemap).unwrap();
    assert!(xml.contains("<loc>https://example.com/node/1</loc>"));
    assert!(xml.contains("<image:loc>https://example.com/a.png</image:loc>"));
}
