//! Persistence round-trip tests for the vector store.

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use ragdoc_embeddings::DEFAULT_DIMENSION;
use ragdoc_vector_store::{StoreError, VectorStore};

#[tokio::test]
async fn test_persist_then_open_restores_everything() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("embeddings.json");

    let mut store = VectorStore::with_dimension(3);
    store
        .append(vec![0.25, -1.5, 0.125], "first document", "first.txt")
        .unwrap();
    store
        .append(vec![1.0, 0.0, 3.75], "second document", "second.txt")
        .unwrap();
    store
        .append(vec![-0.5, 2.0, 0.0], "third document", "third.txt")
        .unwrap();

    store.persist(&path).await.unwrap();

    let restored = VectorStore::open(&path).await.unwrap();
    assert_eq!(restored.len(), 3);
    assert_eq!(restored.dimension(), 3);

    for id in 0..3 {
        assert_eq!(restored.document(id), store.document(id));
        assert_eq!(restored.filename(id), store.filename(id));
        // Vector bit patterns survive the round trip.
        assert_eq!(restored.vector(id), store.vector(id));
    }

    // Same query, same ranking.
    let query = [0.0, 0.0, 0.0];
    let before: Vec<usize> = store.search(&query, 3).unwrap().iter().map(|h| h.id).collect();
    let after: Vec<usize> = restored
        .search(&query, 3)
        .unwrap()
        .iter()
        .map(|h| h.id)
        .collect();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_persist_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested/deeper/embeddings.json");

    let mut store = VectorStore::with_dimension(1);
    store.append(vec![1.0], "doc", "doc.txt").unwrap();
    store.persist(&path).await.unwrap();

    assert!(path.exists());
}

#[tokio::test]
async fn test_persist_overwrites_existing_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("embeddings.json");

    let mut store = VectorStore::with_dimension(1);
    store.append(vec![1.0], "one", "one.txt").unwrap();
    store.persist(&path).await.unwrap();

    store.append(vec![2.0], "two", "two.txt").unwrap();
    store.persist(&path).await.unwrap();

    let restored = VectorStore::open(&path).await.unwrap();
    assert_eq!(restored.len(), 2);
    assert_eq!(restored.document(1), Some("two"));
}

#[tokio::test]
async fn test_missing_snapshot_yields_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("does-not-exist.json");

    let store = VectorStore::open(&path).await.unwrap();
    assert!(store.is_empty());
    assert_eq!(store.dimension(), DEFAULT_DIMENSION);
}

#[tokio::test]
async fn test_unparseable_snapshot_is_corrupt() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("embeddings.json");
    tokio::fs::write(&path, "not json at all").await.unwrap();

    let result = VectorStore::open(&path).await;
    assert!(matches!(result, Err(StoreError::CorruptSnapshot(_))));
}

#[tokio::test]
async fn test_inconsistent_snapshot_is_corrupt() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("embeddings.json");

    // Two vectors but only one document.
    let json = serde_json::json!({
        "version": 1,
        "dimension": 2,
        "vectors": [[1.0, 2.0], [3.0, 4.0]],
        "documents": ["only one"],
        "filenames": ["one.txt", "two.txt"],
    });
    tokio::fs::write(&path, json.to_string()).await.unwrap();

    let result = VectorStore::open(&path).await;
    assert!(matches!(result, Err(StoreError::CorruptSnapshot(_))));
}

#[tokio::test]
async fn test_ragged_vectors_are_corrupt() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("embeddings.json");

    let json = serde_json::json!({
        "version": 1,
        "dimension": 2,
        "vectors": [[1.0, 2.0], [3.0]],
        "documents": ["a", "b"],
        "filenames": ["a.txt", "b.txt"],
    });
    tokio::fs::write(&path, json.to_string()).await.unwrap();

    let result = VectorStore::open(&path).await;
    assert!(matches!(result, Err(StoreError::CorruptSnapshot(_))));
}

#[tokio::test]
async fn test_future_version_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("embeddings.json");

    let json = serde_json::json!({
        "version": 99,
        "dimension": 1,
        "vectors": [[1.0]],
        "documents": ["a"],
        "filenames": ["a.txt"],
    });
    tokio::fs::write(&path, json.to_string()).await.unwrap();

    let result = VectorStore::open(&path).await;
    assert!(matches!(result, Err(StoreError::CorruptSnapshot(_))));
}
