//! Pack then unpack through the public API.

use gztar::{Blob, ByteSource, DirectoryNode, PackOptions, TreeEntry};

async fn sample_tree() -> DirectoryNode {
    let mut root = DirectoryNode::new();
    root.add_file("package/package.json", "{\"name\":\"demo\"}")
        .await
        .unwrap();
    root.add_file("package/lib/index.js", "module.exports = 42;")
        .await
        .unwrap();
    root.add_file("package/bin/run", vec![0u8, 159, 146, 150])
        .await
        .unwrap();
    root.add_directory("package/empty", None).unwrap();
    root.add_file("README", "top level").await.unwrap();
    root
}

fn snapshot(root: &DirectoryNode) -> Vec<(String, Option<Vec<u8>>)> {
    let mut items: Vec<(String, Option<Vec<u8>>)> = root
        .walk()
        .into_iter()
        .map(|(path, entry)| match entry {
            TreeEntry::File(file) => (path, Some(file.to_vec())),
            TreeEntry::Directory(_) => (path, None),
        })
        .collect();
    items.sort();
    items
}

#[tokio::test]
async fn pack_then_create_preserves_names_and_bytes() {
    let original = sample_tree().await;
    let blob = original.pack().await.unwrap();
    let restored = DirectoryNode::create(blob).await.unwrap();

    assert_eq!(snapshot(&original), snapshot(&restored));
    assert_eq!(
        restored.get_file("package/bin/run").unwrap().content(),
        &[0u8, 159, 146, 150]
    );
}

#[tokio::test]
async fn repack_size_is_stable() {
    let original = sample_tree().await;
    let first = original.pack().await.unwrap();
    let restored = DirectoryNode::create(first.clone()).await.unwrap();
    let second = restored.pack().await.unwrap();

    let diff = (first.size() as i64 - second.size() as i64).abs();
    assert!(diff <= 2, "size drifted by {} bytes", diff);
}

#[tokio::test]
async fn empty_directory_survives_round_trip() {
    let mut root = DirectoryNode::new();
    root.add_directory("lonely", None).unwrap();

    let restored = DirectoryNode::create(root.pack().await.unwrap())
        .await
        .unwrap();
    assert_eq!(restored.get_directories().len(), 1);
    assert!(restored.get_files().is_empty());
    let lonely = restored.get_directory("lonely").unwrap();
    assert_eq!(lonely.name(), "lonely");
    assert!(lonely.is_empty());
}

#[tokio::test]
async fn mtime_option_is_restored_as_metadata() {
    let mut root = DirectoryNode::new();
    root.add_file("stamped.txt", "t").await.unwrap();
    let options = PackOptions {
        mtime: 1_700_000_000,
        ..PackOptions::default()
    };
    let bytes = root.pack_with(&options).unwrap();
    let restored = DirectoryNode::create(bytes).await.unwrap();
    assert_eq!(
        restored.get_file("stamped.txt").unwrap().headers().mtime(),
        Some(1_700_000_000)
    );
}

#[tokio::test]
async fn create_reads_archive_from_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("sample.tgz");
    let blob = sample_tree().await.pack().await.unwrap();
    std::fs::write(&path, blob.as_bytes()).unwrap();

    let source = ByteSource::open(&path).await.unwrap();
    let restored = DirectoryNode::create(source).await.unwrap();
    assert_eq!(restored.get_file("README").unwrap().text(), "top level");
}

#[tokio::test]
async fn packed_subtree_unpacks_relative_to_it() {
    let root = sample_tree().await;
    let package = root.get_directory("package").unwrap();
    let bytes = package.pack_with(&PackOptions::default()).unwrap();
    let restored = DirectoryNode::create(Blob::new(bytes)).await.unwrap();
    assert!(restored.get_file("package.json").is_some());
    assert!(restored.get_directory("package").is_none());
}
