//! Output contracts for the command-line tooling.

use std::fs;

use gztar::tooling::cli::{CliContext, Commands};
use gztar::{DirectoryNode, TarballError};
use tempfile::TempDir;

async fn write_archive(dir: &TempDir) -> std::path::PathBuf {
    let mut root = DirectoryNode::new();
    root.add_file("package/package.json", "{}").await.unwrap();
    root.add_file("package/lib/a.js", "a").await.unwrap();
    root.add_directory("package/empty", None).unwrap();
    let path = dir.path().join("fixture.tgz");
    fs::write(&path, root.pack().await.unwrap().as_bytes()).unwrap();
    path
}

fn context(dir: &TempDir) -> CliContext {
    let config_path = dir.path().join("gztar.toml");
    fs::write(&config_path, "[pack]\ncompression_level = 9\n[unpack]\nchunk_size = 64\n").unwrap();
    CliContext::new(Some(config_path)).unwrap()
}

#[test]
fn explicit_config_file_is_merged() {
    let dir = TempDir::new().unwrap();
    let cli = context(&dir);
    assert_eq!(cli.config().pack.compression_level, 9);
    assert_eq!(cli.config().unpack.chunk_size, 64);
}

#[tokio::test]
async fn list_json_contract_has_required_fields() {
    let dir = TempDir::new().unwrap();
    let archive = write_archive(&dir).await;
    let cli = context(&dir);

    let output = cli
        .execute(&Commands::List {
            archive,
            format: "json".to_string(),
        })
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.get("files").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(parsed.get("directories").and_then(|v| v.as_u64()), Some(3));
    assert_eq!(parsed.get("total_bytes").and_then(|v| v.as_u64()), Some(3));
    let entries = parsed.get("entries").and_then(|v| v.as_array()).unwrap();
    for entry in entries {
        assert!(entry.get("path").and_then(|v| v.as_str()).is_some());
        assert!(entry.get("type").and_then(|v| v.as_str()).is_some());
        assert!(entry.get("size").and_then(|v| v.as_u64()).is_some());
    }
    assert!(entries
        .iter()
        .any(|e| e["path"] == "package/empty" && e["type"] == "directory"));
}

#[tokio::test]
async fn tree_outline_lists_directories() {
    let dir = TempDir::new().unwrap();
    let archive = write_archive(&dir).await;
    let output = context(&dir)
        .execute(&Commands::Tree { archive })
        .await
        .unwrap();
    assert!(output.starts_with("/\n"));
    assert!(output.contains("  package/\n"));
    assert!(output.contains("    empty/\n"));
}

#[tokio::test]
async fn repack_writes_equivalent_archive() {
    let dir = TempDir::new().unwrap();
    let archive = write_archive(&dir).await;
    let output_path = dir.path().join("out.tgz");

    let output = context(&dir)
        .execute(&Commands::Repack {
            archive,
            output: output_path.clone(),
            level: None,
        })
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.get("entries").and_then(|v| v.as_u64()), Some(3));
    assert!(parsed.get("output_bytes").and_then(|v| v.as_u64()).is_some());

    let restored = DirectoryNode::create(fs::read(&output_path).unwrap())
        .await
        .unwrap();
    assert_eq!(restored.get_file("package/lib/a.js").unwrap().text(), "a");
    assert!(restored.get_directory("package/empty").unwrap().is_empty());
}

#[tokio::test]
async fn repack_into_missing_directory_is_write_error() {
    let dir = TempDir::new().unwrap();
    let archive = write_archive(&dir).await;
    let err = context(&dir)
        .execute(&Commands::Repack {
            archive,
            output: dir.path().join("missing").join("out.tgz"),
            level: Some(1),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TarballError::Write { .. }));
}
