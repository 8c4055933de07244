use crate::types::{QueryResult, ResultSource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Relative weights of the two retrieval legs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionWeights {
    pub keyword: f32,
    pub semantic: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            keyword: 0.3,
            semantic: 0.7,
        }
    }
}

impl FusionWeights {
    pub fn new(keyword: f32, semantic: f32) -> Self {
        Self { keyword, semantic }
    }

    /// Normalize so the pair sums to 1, whatever the caller passed.
    ///
    /// A non-finite or non-positive sum cannot be normalized and falls back
    /// to the default split.
    pub(crate) fn normalized(self) -> (f32, f32) {
        let total = self.keyword + self.semantic;
        if !total.is_finite() || total <= 0.0 {
            log::warn!(
                "Cannot normalize fusion weights (keyword={}, semantic={}); using defaults",
                self.keyword,
                self.semantic
            );
            let defaults = Self::default();
            let total = defaults.keyword + defaults.semantic;
            return (defaults.keyword / total, defaults.semantic / total);
        }
        (self.keyword / total, self.semantic / total)
    }
}

/// Score-level fusion of semantic and keyword result sets.
///
/// Results are keyed by chunk id. A chunk present in one leg contributes its
/// weighted confidence; a chunk present in both contributes the sum of both
/// weighted confidences, so agreement between the legs outranks a single
/// strong signal of the same magnitude. This is not rank fusion: it assumes
/// both confidence scales are comparable in `[0, 1]`.
pub struct ScoreFusion {
    weights: FusionWeights,
}

struct FusedEntry {
    result: QueryResult,
    semantic_confidence: f32,
    keyword_confidence: f32,
}

impl ScoreFusion {
    pub fn new(weights: FusionWeights) -> Self {
        Self { weights }
    }

    /// Merge the two result sets into one ranking by combined confidence.
    pub fn fuse(&self, semantic: Vec<QueryResult>, keyword: Vec<QueryResult>) -> Vec<QueryResult> {
        let (keyword_weight, semantic_weight) = self.weights.normalized();

        // Entries keep insertion order (semantic first, then keyword-only)
        // so the stable sort below preserves it for equal scores.
        let mut entries: Vec<FusedEntry> = Vec::new();
        let mut by_chunk_id: HashMap<String, usize> = HashMap::new();

        for result in semantic {
            by_chunk_id.insert(result.record.chunk_id.clone(), entries.len());
            entries.push(FusedEntry {
                semantic_confidence: result.confidence,
                keyword_confidence: 0.0,
                result,
            });
        }

        for result in keyword {
            if let Some(&idx) = by_chunk_id.get(&result.record.chunk_id) {
                let entry = &mut entries[idx];
                entry.keyword_confidence = result.confidence;
                entry.result.source = ResultSource::Both;
            } else {
                entries.push(FusedEntry {
                    semantic_confidence: 0.0,
                    keyword_confidence: result.confidence,
                    result,
                });
            }
        }

        let mut fused: Vec<QueryResult> = entries
            .into_iter()
            .map(|entry| {
                let combined = entry.semantic_confidence * semantic_weight
                    + entry.keyword_confidence * keyword_weight;
                QueryResult {
                    confidence: combined.clamp(0.0, 1.0),
                    ..entry.result
                }
            })
            .collect();

        fused.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        fused
    }
}

impl Default for ScoreFusion {
    fn default() -> Self {
        Self::new(FusionWeights::default())
    }
}
