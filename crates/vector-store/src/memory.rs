use crate::embedder::cosine_similarity;
use crate::error::{Result, VectorStoreError};
use crate::index::{ChunkFilter, VectorIndex};
use crate::types::{ChunkRecord, ScoredChunk};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredPoint {
    record: ChunkRecord,
    vector: Vec<f32>,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    dimension: usize,
    points: Vec<StoredPoint>,
}

/// Brute-force in-memory vector index.
///
/// An exact O(n) scan behind a read-write lock: queries and filtered reads
/// run concurrently, writes are exclusive. Suitable for corpora up to tens
/// of thousands of chunks; larger deployments substitute a dedicated ANN
/// store behind the same [`VectorIndex`] trait.
pub struct MemoryVectorIndex {
    dimension: usize,
    points: RwLock<HashMap<String, StoredPoint>>,
}

impl MemoryVectorIndex {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            points: RwLock::new(HashMap::new()),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Persist the index as a JSON snapshot.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let snapshot = {
            let points = self.points.read().await;
            Snapshot {
                dimension: self.dimension,
                points: points.values().cloned().collect(),
            }
        };

        let data = serde_json::to_string_pretty(&snapshot)?;
        tokio::fs::write(path, data).await?;
        log::info!("Saved {} chunks to {:?}", snapshot.points.len(), path);
        Ok(())
    }

    /// Load an index from a JSON snapshot written by [`Self::save`].
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read_to_string(path).await?;
        let snapshot: Snapshot = serde_json::from_str(&data)?;

        for point in &snapshot.points {
            if point.vector.len() != snapshot.dimension {
                return Err(VectorStoreError::InvalidDimension {
                    expected: snapshot.dimension,
                    actual: point.vector.len(),
                });
            }
        }

        log::info!("Loaded {} chunks from {:?}", snapshot.points.len(), path);
        Ok(Self {
            dimension: snapshot.dimension,
            points: RwLock::new(
                snapshot
                    .points
                    .into_iter()
                    .map(|point| (point.record.chunk_id.clone(), point))
                    .collect(),
            ),
        })
    }
}

#[async_trait]
impl VectorIndex for MemoryVectorIndex {
    async fn add(&self, records: Vec<ChunkRecord>, vectors: Vec<Vec<f32>>) -> Result<()> {
        if records.len() != vectors.len() {
            return Err(VectorStoreError::IndexError(format!(
                "Record/vector count mismatch: {} records, {} vectors",
                records.len(),
                vectors.len()
            )));
        }

        let mut points = self.points.write().await;

        // Validate the whole batch before touching the map so a rejected
        // add leaves no partial state behind.
        let mut batch_ids: std::collections::HashSet<String> = std::collections::HashSet::new();
        for (record, vector) in records.iter().zip(vectors.iter()) {
            if vector.len() != self.dimension {
                return Err(VectorStoreError::InvalidDimension {
                    expected: self.dimension,
                    actual: vector.len(),
                });
            }
            if points.contains_key(&record.chunk_id) || !batch_ids.insert(record.chunk_id.clone())
            {
                return Err(VectorStoreError::DuplicateChunkId(record.chunk_id.clone()));
            }
        }

        for (record, vector) in records.into_iter().zip(vectors.into_iter()) {
            points.insert(record.chunk_id.clone(), StoredPoint { record, vector });
        }

        Ok(())
    }

    async fn query(
        &self,
        vector: &[f32],
        k: usize,
        filter: &ChunkFilter,
    ) -> Result<Vec<ScoredChunk>> {
        if vector.len() != self.dimension {
            return Err(VectorStoreError::InvalidDimension {
                expected: self.dimension,
                actual: vector.len(),
            });
        }

        let points = self.points.read().await;
        let mut scored: Vec<ScoredChunk> = points
            .values()
            .filter(|point| filter.matches(&point.record))
            .map(|point| ScoredChunk {
                distance: 1.0 - cosine_similarity(vector, &point.vector),
                record: point.record.clone(),
            })
            .collect();

        // Ascending distance; ties broken by chunk id for determinism.
        scored.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.record.chunk_id.cmp(&b.record.chunk_id))
        });
        scored.truncate(k);

        Ok(scored)
    }

    async fn get(&self, filter: &ChunkFilter) -> Result<Vec<ChunkRecord>> {
        let points = self.points.read().await;
        Ok(points
            .values()
            .filter(|point| filter.matches(&point.record))
            .map(|point| point.record.clone())
            .collect())
    }

    async fn delete(&self, ids: &[String]) -> Result<usize> {
        let mut points = self.points.write().await;
        let mut removed = 0;
        for id in ids {
            if points.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.points.read().await.len())
    }
}
