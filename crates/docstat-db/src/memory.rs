//! In-memory repositories for tests and database-less local runs.
//!
//! They enforce the same uniqueness rules as the PostgreSQL tables: one
//! record per content hash, one analysis per file id. Check-and-insert runs
//! under a single lock, which stands in for the unique index.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use docstat_core::{
    compute_content_hash, AnalysisRecord, AnalysisRepository, CacheLookup, Error, FileRecord,
    FileRepository, Result, UploadOutcome,
};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| Error::Internal("in-memory store lock poisoned".to_string()))
}

#[derive(Default)]
struct FileTables {
    by_id: HashMap<Uuid, FileRecord>,
    by_hash: HashMap<String, Uuid>,
}

/// In-memory file repository.
#[derive(Clone, Default)]
pub struct InMemoryFileRepository {
    tables: Arc<Mutex<FileTables>>,
    reads: Arc<AtomicUsize>,
}

impl InMemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `get_by_id` calls served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn store(&self, name: &str, content: &[u8]) -> Result<UploadOutcome> {
        if content.is_empty() {
            return Err(Error::InvalidInput("Cannot store empty file".to_string()));
        }

        let hash = compute_content_hash(content);
        let mut tables = lock(&self.tables)?;

        if let Some(id) = tables.by_hash.get(&hash) {
            return Ok(UploadOutcome::existing(*id));
        }

        let id = Uuid::now_v7();
        tables.by_hash.insert(hash.clone(), id);
        tables.by_id.insert(
            id,
            FileRecord {
                id,
                name: name.to_string(),
                hash,
                content: content.to_vec(),
                size_bytes: content.len() as i64,
                created_at: Utc::now(),
            },
        );
        Ok(UploadOutcome::created(id))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<FileRecord> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        lock(&self.tables)?
            .by_id
            .get(&id)
            .cloned()
            .ok_or(Error::FileNotFound(id))
    }

    async fn get_by_hash(&self, hash: &str) -> Result<FileRecord> {
        let tables = lock(&self.tables)?;
        tables
            .by_hash
            .get(hash)
            .and_then(|id| tables.by_id.get(id))
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("File not found with hash: {}", hash)))
    }

    async fn exists_by_hash(&self, hash: &str) -> Result<bool> {
        Ok(lock(&self.tables)?.by_hash.contains_key(hash))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tables = lock(&self.tables)?;
        let record = tables.by_id.remove(&id).ok_or(Error::FileNotFound(id))?;
        tables.by_hash.remove(&record.hash);
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        Ok(lock(&self.tables)?.by_id.len() as i64)
    }
}

/// In-memory analysis repository.
#[derive(Clone, Default)]
pub struct InMemoryAnalysisRepository {
    records: Arc<Mutex<HashMap<Uuid, AnalysisRecord>>>,
    inserts: Arc<AtomicUsize>,
}

impl InMemoryAnalysisRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records actually written (conflicting inserts excluded).
    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AnalysisRepository for InMemoryAnalysisRepository {
    async fn lookup(&self, file_id: Uuid) -> Result<CacheLookup> {
        Ok(lock(&self.records)?.get(&file_id).cloned().into())
    }

    async fn insert_once(&self, record: AnalysisRecord) -> Result<AnalysisRecord> {
        let mut records = lock(&self.records)?;
        let stored = records.entry(record.file_id).or_insert_with(|| {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            record
        });
        Ok(stored.clone())
    }

    async fn exists(&self, file_id: Uuid) -> Result<bool> {
        Ok(lock(&self.records)?.contains_key(&file_id))
    }

    async fn delete(&self, file_id: Uuid) -> Result<()> {
        lock(&self.records)?
            .remove(&file_id)
            .map(|_| ())
            .ok_or(Error::AnalysisNotFound(file_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstat_core::TextStats;

    #[tokio::test]
    async fn test_identical_content_is_stored_once() {
        let repo = InMemoryFileRepository::new();

        let first = repo.store("a.txt", b"same bytes").await.unwrap();
        let second = repo.store("b.txt", b"same bytes").await.unwrap();

        assert!(!first.existed);
        assert!(second.existed);
        assert_eq!(first.id, second.id);
        assert_eq!(repo.count().await.unwrap(), 1);

        // First name wins
        assert_eq!(repo.get_by_id(first.id).await.unwrap().name, "a.txt");
    }

    #[tokio::test]
    async fn test_different_content_gets_distinct_ids() {
        let repo = InMemoryFileRepository::new();
        let a = repo.store("x.txt", b"alpha").await.unwrap();
        let b = repo.store("x.txt", b"beta").await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_lookup_by_id_and_hash_return_same_bytes() {
        let repo = InMemoryFileRepository::new();
        let content = "Привет\nмир".as_bytes();
        let outcome = repo.store("ru.txt", content).await.unwrap();

        let by_id = repo.get_by_id(outcome.id).await.unwrap();
        let by_hash = repo.get_by_hash(&compute_content_hash(content)).await.unwrap();
        assert_eq!(by_id.content, content);
        assert_eq!(by_hash, by_id);
    }

    #[tokio::test]
    async fn test_delete_frees_hash() {
        let repo = InMemoryFileRepository::new();
        let outcome = repo.store("a.txt", b"content").await.unwrap();
        repo.delete(outcome.id).await.unwrap();

        assert!(matches!(
            repo.get_by_id(outcome.id).await,
            Err(Error::FileNotFound(_))
        ));
        assert!(!repo
            .exists_by_hash(&compute_content_hash(b"content"))
            .await
            .unwrap());
        assert!(matches!(
            repo.delete(outcome.id).await,
            Err(Error::FileNotFound(_))
        ));

        let again = repo.store("a.txt", b"content").await.unwrap();
        assert!(!again.existed);
        assert_ne!(again.id, outcome.id);
    }

    #[tokio::test]
    async fn test_empty_content_is_rejected() {
        let repo = InMemoryFileRepository::new();
        assert!(matches!(
            repo.store("a.txt", b"").await,
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_uploads_collapse_to_one_record() {
        let repo = InMemoryFileRepository::new();
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.store(&format!("copy-{}.txt", i), b"racing content")
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.push(handle.await.unwrap());
        }

        let id = outcomes[0].id;
        assert!(outcomes.iter().all(|o| o.id == id));
        assert_eq!(outcomes.iter().filter(|o| !o.existed).count(), 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_analysis_insert_once_keeps_first_record() {
        let repo = InMemoryAnalysisRepository::new();
        let file_id = Uuid::new_v4();

        assert_eq!(repo.lookup(file_id).await.unwrap(), CacheLookup::Miss);

        let first = AnalysisRecord::from_stats(file_id, TextStats::compute("one two"), None);
        let second = AnalysisRecord::from_stats(
            file_id,
            TextStats::compute("one two three"),
            Some("https://example.test/cloud.png".into()),
        );

        assert_eq!(repo.insert_once(first.clone()).await.unwrap(), first);
        assert_eq!(repo.insert_once(second).await.unwrap(), first);
        assert_eq!(repo.insert_count(), 1);
        assert_eq!(repo.lookup(file_id).await.unwrap(), CacheLookup::Hit(first));
    }

    #[tokio::test]
    async fn test_analysis_exists_and_delete() {
        let repo = InMemoryAnalysisRepository::new();
        let file_id = Uuid::new_v4();

        assert!(!repo.exists(file_id).await.unwrap());
        assert!(matches!(
            repo.delete(file_id).await,
            Err(Error::AnalysisNotFound(id)) if id == file_id
        ));

        repo.insert_once(AnalysisRecord::from_stats(file_id, TextStats::default(), None))
            .await
            .unwrap();
        assert!(repo.exists(file_id).await.unwrap());
        assert_eq!(repo.len(), 1);

        repo.delete(file_id).await.unwrap();
        assert!(!repo.exists(file_id).await.unwrap());
        assert!(repo.is_empty());
    }
}
