use crate::error::Result;
use async_trait::async_trait;

/// External capability mapping text to fixed-length vectors.
///
/// Implementations must be order-preserving (one vector per input, in input
/// order) and must produce the same dimensionality on every call. An index
/// built with one provider must never be queried with vectors from another.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed every text in one batched call.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Vector length produced by this provider.
    fn dimension(&self) -> usize;

    /// Stable identifier of the underlying model.
    fn model_id(&self) -> &str;
}

/// Deterministic feature-hashing embedder.
///
/// Tokens are lower-cased, stripped of surrounding punctuation, and hashed
/// into signed buckets (FNV-1a); the resulting bag-of-words vector is
/// L2-normalized. Texts sharing terms land close in cosine space, which is
/// enough for offline deployments and for exercising the retrieval paths in
/// tests without a model download.
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        for token in text.to_lowercase().split_whitespace() {
            let token = token.trim_matches(|c: char| !c.is_alphanumeric());
            if token.is_empty() {
                continue;
            }
            let hash = fnv1a_64(token.as_bytes());
            let bucket = ((hash >> 1) % self.dimension as u64) as usize;
            let sign = if hash & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }
        normalize(&mut vector);
        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_id(&self) -> &str {
        "feature-hash-v1"
    }
}

/// Cosine similarity in `[-1, 1]`; zero for mismatched or zero-norm inputs.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vector {
        *value /= norm;
    }
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedding_is_deterministic_and_order_preserving() {
        let embedder = HashingEmbedder::default();
        let texts = vec![
            "alpha beta".to_string(),
            "gamma".to_string(),
            "alpha beta".to_string(),
        ];

        let first = embedder.embed(&texts).await.unwrap();
        let second = embedder.embed(&texts).await.unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
        assert_eq!(first[0], first[2]);
        assert_ne!(first[0], first[1]);
    }

    #[tokio::test]
    async fn test_vectors_are_unit_length() {
        let embedder = HashingEmbedder::new(64);
        let vectors = embedder
            .embed(&["the quick brown fox".to_string()])
            .await
            .unwrap();

        let norm: f32 = vectors[0].iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
        assert_eq!(vectors[0].len(), 64);
    }

    #[tokio::test]
    async fn test_shared_terms_score_higher_than_disjoint_terms() {
        let embedder = HashingEmbedder::default();
        let vectors = embedder
            .embed(&[
                "database replication lag".to_string(),
                "replication lag metrics".to_string(),
                "banana smoothie recipe".to_string(),
            ])
            .await
            .unwrap();

        let related = cosine_similarity(&vectors[0], &vectors[1]);
        let unrelated = cosine_similarity(&vectors[0], &vectors[2]);
        assert!(related > unrelated);
    }

    #[tokio::test]
    async fn test_punctuation_and_case_do_not_change_tokens() {
        let embedder = HashingEmbedder::default();
        let vectors = embedder
            .embed(&["Hello, World!".to_string(), "hello world".to_string()])
            .await
            .unwrap();

        assert_eq!(vectors[0], vectors[1]);
    }

    #[tokio::test]
    async fn test_empty_text_embeds_to_zero_vector() {
        let embedder = HashingEmbedder::new(16);
        let vectors = embedder.embed(&["   ".to_string()]).await.unwrap();
        assert!(vectors[0].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_cosine_similarity_basics() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);

        let c = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &c).abs() < 1e-6);

        // Mismatched lengths and zero vectors degrade to 0.
        assert_eq!(cosine_similarity(&a, &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&a, &[0.0, 0.0, 0.0]), 0.0);
    }
}
