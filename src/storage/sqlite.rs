//! SQLite document store.
//!
//! A small brute-force vector index: passages and their embeddings live in
//! one table, and search computes cosine similarity against every row of a
//! collection. Fine for a single book's worth of passages.

use crate::error::{Error, Result};
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::Duration;

use super::schema::apply_schema;

/// A stored passage, without its vector.
#[derive(Debug, Clone, Serialize)]
pub struct StoredDocument {
    pub id: String,
    pub collection: String,
    pub text: String,
    pub dimensions: usize,
    pub created_at: i64,
}

/// A search hit.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredDocument {
    pub id: String,
    pub text: String,
    pub score: f32,
}

/// Per-collection counts.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionStats {
    pub name: String,
    pub documents: usize,
    pub dimensions: Option<usize>,
}

/// Outcome of [`DocumentStore::add_document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "id", rename_all = "snake_case")]
pub enum AddOutcome {
    Inserted(String),
    Duplicate(String),
}

impl AddOutcome {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Inserted(id) | Self::Duplicate(id) => id,
        }
    }
}

/// SQLite-backed document store.
pub struct DocumentStore {
    conn: Connection,
}

impl DocumentStore {
    /// Open a database at the given path.
    ///
    /// Creates the database and applies schema if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_timeout(path, None)
    }

    /// Open a database with an optional busy timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open_with_timeout(path: &Path, timeout_ms: Option<u64>) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        if let Some(timeout) = timeout_ms {
            conn.busy_timeout(Duration::from_millis(timeout))?;
        } else {
            // Default 5 second timeout
            conn.busy_timeout(Duration::from_secs(5))?;
        }

        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open an existing database, failing if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns `IndexNotFound` if there is no file at `path`.
    pub fn open_existing(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::IndexNotFound {
                path: path.to_path_buf(),
            });
        }
        Self::open(path)
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Store a passage and its embedding.
    ///
    /// Identical text in the same collection is stored once; the existing
    /// id is returned as [`AddOutcome::Duplicate`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for empty text or an empty vector, and a
    /// database error if the insert fails.
    pub fn add_document(
        &mut self,
        collection: &str,
        text: &str,
        embedding: &[f32],
    ) -> Result<AddOutcome> {
        if text.trim().is_empty() {
            return Err(Error::InvalidArgument("Document text is empty".into()));
        }
        if embedding.is_empty() {
            return Err(Error::InvalidArgument("Document embedding is empty".into()));
        }

        let hash = content_hash(text);
        let existing: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM documents WHERE collection = ?1 AND content_hash = ?2",
                rusqlite::params![collection, hash],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(id) = existing {
            return Ok(AddOutcome::Duplicate(id));
        }

        let id = format!("doc_{}", uuid::Uuid::new_v4().simple());
        let now = chrono::Utc::now().timestamp_millis();
        let dimensions = i64::try_from(embedding.len())
            .map_err(|_| Error::InvalidArgument("Embedding too large".into()))?;

        self.conn.execute(
            "INSERT INTO documents (id, collection, text, content_hash, embedding, dimensions, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![id, collection, text, hash, encode_embedding(embedding), dimensions, now],
        )?;

        Ok(AddOutcome::Inserted(id))
    }

    /// Fetch a document by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_document(&self, id: &str) -> Result<Option<StoredDocument>> {
        let doc = self
            .conn
            .query_row(
                "SELECT id, collection, text, dimensions, created_at FROM documents WHERE id = ?1",
                [id],
                map_stored_document,
            )
            .optional()?;
        Ok(doc)
    }

    /// Number of documents in a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self, collection: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            [collection],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// List collections with document counts, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_collections(&self) -> Result<Vec<CollectionStats>> {
        let mut stmt = self.conn.prepare(
            "SELECT collection, COUNT(*), MAX(dimensions)
             FROM documents
             GROUP BY collection
             ORDER BY collection ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            let documents: i64 = row.get(1)?;
            let dimensions: Option<i64> = row.get(2)?;
            Ok(CollectionStats {
                name: row.get(0)?,
                documents: usize::try_from(documents).unwrap_or(0),
                dimensions: dimensions.and_then(|d| usize::try_from(d).ok()),
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    /// Delete every document in a collection. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_collection(&mut self, collection: &str) -> Result<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM documents WHERE collection = ?1", [collection])?;
        Ok(removed)
    }

    /// Perform semantic search using cosine similarity.
    ///
    /// Brute-force over the collection. Rows whose dimensionality differs
    /// from the query score 0. Results are sorted highest first.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a zero limit, or a database error.
    pub fn search(
        &self,
        query_embedding: &[f32],
        collection: &str,
        limit: usize,
    ) -> Result<Vec<ScoredDocument>> {
        if limit == 0 {
            return Err(Error::InvalidArgument("Search limit must be greater than 0".into()));
        }

        let mut stmt = self
            .conn
            .prepare("SELECT id, text, embedding FROM documents WHERE collection = ?1")?;
        let rows = stmt.query_map([collection], |row| {
            let blob: Vec<u8> = row.get(2)?;
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                decode_embedding(&blob),
            ))
        })?;

        let mut results = Vec::new();
        for row in rows {
            let (id, text, embedding) = row?;
            results.push(ScoredDocument {
                id,
                text,
                score: cosine_similarity(query_embedding, &embedding),
            });
        }

        // Sort by similarity (highest first)
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(limit);

        Ok(results)
    }
}

fn map_stored_document(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredDocument> {
    let dimensions: i64 = row.get(3)?;
    Ok(StoredDocument {
        id: row.get(0)?,
        collection: row.get(1)?,
        text: row.get(2)?,
        dimensions: usize::try_from(dimensions).unwrap_or(0),
        created_at: row.get(4)?,
    })
}

/// SHA-256 hex digest of a passage, used for de-duplication.
#[must_use]
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Convert an f32 slice to bytes (little-endian).
fn encode_embedding(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn decode_embedding(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}

/// Compute cosine similarity between two vectors.
///
/// Returns a value between -1.0 and 1.0. Mismatched lengths, empty input
/// and zero-magnitude vectors all score 0.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot_product = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (x, y) in a.iter().zip(b.iter()) {
        dot_product += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let magnitude = (norm_a * norm_b).sqrt();
    if magnitude == 0.0 {
        0.0
    } else {
        dot_product / magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_memory() {
        let storage = DocumentStore::open_memory();
        assert!(storage.is_ok());
    }

    #[test]
    fn test_add_and_get() {
        let mut store = DocumentStore::open_memory().unwrap();
        let outcome = store
            .add_document("book", "Forward kinematics maps joints to pose.", &[1.0, 0.0])
            .unwrap();
        let AddOutcome::Inserted(id) = outcome else {
            panic!("expected insert");
        };

        let doc = store.get_document(&id).unwrap().unwrap();
        assert_eq!(doc.collection, "book");
        assert_eq!(doc.dimensions, 2);
        assert_eq!(store.count("book").unwrap(), 1);
        assert_eq!(store.count("other").unwrap(), 0);
    }

    #[test]
    fn test_duplicate_text_is_stored_once_per_collection() {
        let mut store = DocumentStore::open_memory().unwrap();
        let first = store.add_document("book", "same text", &[1.0]).unwrap();
        let second = store.add_document("book", "same text", &[0.5]).unwrap();
        assert_eq!(second, AddOutcome::Duplicate(first.id().to_string()));
        assert_eq!(store.count("book").unwrap(), 1);

        let other = store.add_document("notes", "same text", &[1.0]).unwrap();
        assert!(matches!(other, AddOutcome::Inserted(_)));
    }

    #[test]
    fn test_rejects_empty_input() {
        let mut store = DocumentStore::open_memory().unwrap();
        assert!(store.add_document("book", "  ", &[1.0]).is_err());
        assert!(store.add_document("book", "text", &[]).is_err());
    }

    #[test]
    fn test_search_orders_by_similarity() {
        let mut store = DocumentStore::open_memory().unwrap();
        store.add_document("book", "east", &[1.0, 0.0]).unwrap();
        store.add_document("book", "north", &[0.0, 1.0]).unwrap();
        store.add_document("book", "north-east", &[0.7, 0.7]).unwrap();
        store.add_document("other", "elsewhere", &[1.0, 0.0]).unwrap();

        let hits = store.search(&[1.0, 0.1], "book", 2).unwrap();
        let texts: Vec<&str> = hits.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["east", "north-east"]);
        assert!(hits[0].score >= hits[1].score);
    }

    #[test]
    fn test_search_zero_limit_is_invalid() {
        let store = DocumentStore::open_memory().unwrap();
        let err = store.search(&[1.0], "book", 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_search_surfaces_undecodable_rows() {
        let mut store = DocumentStore::open_memory().unwrap();
        store.add_document("book", "fine", &[1.0, 0.0]).unwrap();
        store
            .conn
            .execute(
                "INSERT INTO documents (id, collection, text, content_hash, embedding, dimensions, created_at)
                 VALUES ('doc_bad', 'book', 'bad', 'h', 42, 2, 0)",
                [],
            )
            .unwrap();

        let err = store.search(&[1.0, 0.0], "book", 5).unwrap_err();
        assert!(matches!(err, Error::Database(_)));
    }

    #[test]
    fn test_search_empty_collection() {
        let store = DocumentStore::open_memory().unwrap();
        assert!(store.search(&[1.0], "book", 5).unwrap().is_empty());
    }

    #[test]
    fn test_collections_and_delete() {
        let mut store = DocumentStore::open_memory().unwrap();
        store.add_document("b", "one", &[1.0, 0.0, 0.0]).unwrap();
        store.add_document("a", "two", &[1.0]).unwrap();
        store.add_document("a", "three", &[0.0]).unwrap();

        let collections = store.list_collections().unwrap();
        assert_eq!(collections.len(), 2);
        assert_eq!(collections[0].name, "a");
        assert_eq!(collections[0].documents, 2);
        assert_eq!(collections[1].dimensions, Some(3));

        assert_eq!(store.delete_collection("a").unwrap(), 2);
        assert_eq!(store.list_collections().unwrap().len(), 1);
    }

    #[test]
    fn test_open_existing_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DocumentStore::open_existing(&dir.path().join("none.db"))
            .err()
            .unwrap();
        assert!(matches!(err, Error::IndexNotFound { .. }));
    }

    #[test]
    fn test_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("index.db");
        {
            let mut store = DocumentStore::open(&path).unwrap();
            store.add_document("book", "persisted", &[0.25, 0.5]).unwrap();
        }
        let store = DocumentStore::open_existing(&path).unwrap();
        let hits = store.search(&[0.25, 0.5], "book", 1).unwrap();
        assert_eq!(hits[0].text, "persisted");
        assert!((hits[0].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_edge_cases() {
        assert!(cosine_similarity(&[], &[]).abs() < f32::EPSILON);
        assert!(cosine_similarity(&[1.0], &[1.0, 2.0]).abs() < f32::EPSILON);
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).abs() < f32::EPSILON);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_content_hash_is_stable() {
        assert_eq!(content_hash("abc"), content_hash("abc"));
        assert_ne!(content_hash("abc"), content_hash("abd"));
        assert_eq!(content_hash("abc").len(), 64);
    }
}
