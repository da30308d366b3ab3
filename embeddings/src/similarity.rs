//! Similarity computation for embeddings.

use ordered_float::OrderedFloat;

use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// Compute the inner product (dot product) between two embeddings.
///
/// This is the ranking metric used by the flat index: higher means more
/// similar. Vectors are compared as-is, without normalization.
pub fn dot_product(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// Find the top-k candidates by inner-product score.
///
/// Candidates are borrowed, so callers can rank stored embeddings in
/// place without copying them. Returns `(position, score)` pairs sorted
/// by descending score, at most `k` of them. Positions refer to the
/// candidate iteration order.
pub fn find_top_k<'a, I>(query: &Embedding, candidates: I, k: usize) -> Result<Vec<(usize, f32)>>
where
    I: IntoIterator<Item = &'a Embedding>,
{
    let mut scores: Vec<(OrderedFloat<f32>, usize)> = Vec::new();

    for (position, embedding) in candidates.into_iter().enumerate() {
        let score = dot_product(query, embedding)?;
        scores.push((OrderedFloat(score), position));
    }

    // Sort by score descending
    scores.sort_by(|a, b| b.0.cmp(&a.0));

    Ok(scores
        .into_iter()
        .take(k)
        .map(|(score, position)| (position, score.0))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dot_product_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let score = dot_product(&a, &b).unwrap();
        assert!((score - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_dot_product_unnormalized() {
        let a = vec![2.0, 3.0];
        let b = vec![4.0, 5.0];
        let score = dot_product(&a, &b).unwrap();
        assert!((score - 23.0).abs() < 1e-6);
    }

    #[test]
    fn test_dot_product_dimension_mismatch() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!(dot_product(&a, &b).is_err());
    }

    #[test]
    fn test_find_top_k_ordering() {
        let query = vec![1.0, 0.0, 0.0];
        let candidates = vec![
            vec![0.5, 0.0, 0.0], // score 0.5
            vec![1.0, 0.0, 0.0], // score 1.0
            vec![0.0, 1.0, 0.0], // score 0.0
        ];

        let results = find_top_k(&query, &candidates, 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, 1);
        assert_eq!(results[1].0, 0);
    }

    #[test]
    fn test_find_top_k_fewer_candidates_than_k() {
        let query = vec![1.0, 0.0];
        let candidates = vec![vec![1.0, 0.0]];

        let results = find_top_k(&query, &candidates, 5).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_find_top_k_over_borrowed_embeddings() {
        // Candidates can be ranked in place, without copying them into
        // a scratch collection first.
        let query = vec![1.0, 0.0];
        let entries = vec![
            ("a".to_string(), vec![0.2, 0.0]),
            ("b".to_string(), vec![0.9, 0.0]),
        ];

        let results = find_top_k(&query, entries.iter().map(|(_, e)| e), 3).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, 1);
        assert_eq!(results[1].0, 0);
    }

    #[test]
    fn test_find_top_k_empty() {
        let query = vec![1.0, 0.0];
        let results = find_top_k(&query, &[], 3).unwrap();
        assert!(results.is_empty());
    }
}
