//! Embedding-similarity ranking over the vectors stored at ingest time.
//!
//! Pure scoring lives here; the handler fetches the stored vectors, ranks
//! them, and hydrates the winning candidates.

use uuid::Uuid;

/// Minimum cosine similarity for a candidate to count as a match.
pub const MATCH_THRESHOLD: f32 = 0.1;
/// Maximum number of candidates a similarity search returns.
pub const MATCH_COUNT: usize = 10;

/// Cosine similarity in [-1, 1]. Zero for mismatched lengths or a zero
/// vector on either side.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Ranks stored candidate vectors against a query vector: scores above
/// `MATCH_THRESHOLD`, best first, at most `MATCH_COUNT` ids.
pub fn rank_by_similarity(query: &[f32], stored: &[(Uuid, Vec<f32>)]) -> Vec<Uuid> {
    let mut scored: Vec<(Uuid, f32)> = stored
        .iter()
        .map(|(id, embedding)| (*id, cosine_similarity(query, embedding)))
        .filter(|(_, score)| *score >= MATCH_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(MATCH_COUNT);
    scored.into_iter().map(|(id, _)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_cosine_similarity_of_identical_vectors_is_one() {
        let v = vec![0.5, -0.25, 0.75];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_of_orthogonal_vectors_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_similarity_handles_mismatched_and_zero_vectors() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_rank_orders_best_match_first() {
        let query = vec![1.0, 0.0];
        let stored = vec![
            (id(1), vec![0.3, 1.0]),
            (id(2), vec![1.0, 0.0]),
            (id(3), vec![0.8, 0.2]),
        ];
        assert_eq!(rank_by_similarity(&query, &stored), vec![id(2), id(3), id(1)]);
    }

    #[test]
    fn test_rank_drops_scores_below_threshold() {
        let query = vec![1.0, 0.0];
        let stored = vec![
            (id(1), vec![1.0, 0.0]),
            (id(2), vec![0.0, 1.0]),  // orthogonal, score 0
            (id(3), vec![-1.0, 0.0]), // opposite, score -1
        ];
        assert_eq!(rank_by_similarity(&query, &stored), vec![id(1)]);
    }

    #[test]
    fn test_rank_truncates_to_match_count() {
        let query = vec![1.0];
        let stored: Vec<(Uuid, Vec<f32>)> =
            (0..20).map(|n| (id(n), vec![1.0 - n as f32 * 0.01])).collect();
        let ranked = rank_by_similarity(&query, &stored);
        assert_eq!(ranked.len(), MATCH_COUNT);
        assert_eq!(ranked[0], id(0));
    }
}
