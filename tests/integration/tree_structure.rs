//! Tree construction and lookup behavior.

use gztar::{Blob, ByteSource, DirectoryNode, FileNode, TarballError};

#[tokio::test]
async fn nested_path_creation() {
    let mut root = DirectoryNode::new();
    root.add_file("/a/b/c/file.txt", "x").await.unwrap();

    let a = root.get_directory("a").unwrap();
    let b = a.get_directory("b").unwrap();
    let c = b.get_directory("c").unwrap();
    assert_eq!(c.get_files().len(), 1);
    assert_eq!(root.get_file("/a/b/c/file.txt").unwrap().text(), "x");
}

#[test]
fn get_or_create_directory_is_idempotent() {
    let mut root = DirectoryNode::new();
    let first: *const DirectoryNode = root.get_or_create_directory("x/y").unwrap();
    let second: *const DirectoryNode = root.get_or_create_directory("x/y").unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(root.get_directory("x").unwrap().get_directories().len(), 1);
}

#[tokio::test]
async fn adding_directory_replaces_existing_subtree() {
    let mut root = DirectoryNode::new();
    root.add_file("pkg/old.txt", "old").await.unwrap();
    root.add_directory("pkg", None).unwrap();

    assert!(root.get_file("pkg/old.txt").is_none());
    assert_eq!(root.get_directories().len(), 1);
    assert!(root.get_directory("pkg").unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_file_names_are_both_kept() {
    let mut root = DirectoryNode::new();
    root.add_file("dir/same.txt", "first").await.unwrap();
    root.add_file("dir/same.txt", "second").await.unwrap();

    let dir = root.get_directory("dir").unwrap();
    assert_eq!(dir.get_files().len(), 2);
    assert_eq!(root.get_file("dir/same.txt").unwrap().text(), "first");
}

#[tokio::test]
async fn content_kinds_yield_same_text() {
    let mut root = DirectoryNode::new();
    let bytes: &[u8] = b"same";
    root.add_file("text.txt", "same").await.unwrap();
    root.add_file("owned.txt", String::from("same")).await.unwrap();
    root.add_file("vec.txt", b"same".to_vec()).await.unwrap();
    root.add_file("slice.txt", bytes).await.unwrap();
    root.add_file("blob.txt", Blob::new("same")).await.unwrap();
    root.add_file("source.txt", ByteSource::from_reader(std::io::Cursor::new(b"same".to_vec())))
        .await
        .unwrap();
    root.add_file("node.txt", FileNode::with_name("node.txt", "same"))
        .await
        .unwrap();

    let texts: Vec<String> = root.get_files().iter().map(|f| f.text().into_owned()).collect();
    assert_eq!(texts.len(), 7);
    assert!(texts.iter().all(|t| t == "same"));
}

#[tokio::test]
async fn missing_paths_return_none() {
    let mut root = DirectoryNode::new();
    root.add_file("a/b.txt", "b").await.unwrap();

    assert!(root.get_directory("nope").is_none());
    assert!(root.get_file("a/nope.txt").is_none());
    assert!(root.get_file("a").is_none());
    assert!(root.get_directory("a/b.txt").is_none());
}

#[tokio::test]
async fn empty_segments_are_rejected_on_mutation() {
    let mut root = DirectoryNode::new();
    let err = root.add_file("a//b.txt", "x").await.unwrap_err();
    assert!(matches!(err, TarballError::InvalidPath { .. }));
    assert!(root.is_empty());
    assert!(root.get_directory("a//").is_none());
}
