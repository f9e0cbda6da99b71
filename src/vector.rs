//! Pure vector math over embedding vectors.
//!
//! Embeddings are opaque fixed-length float sequences; the only comparison
//! ever performed on them is cosine similarity. All helpers degrade to a
//! defined empty/zero result on malformed input instead of erroring, so one
//! bad stored vector never sinks a whole analysis.

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in `[-1.0, 1.0]`. Returns `0.0` when either vector is
/// empty, the lengths differ, or either norm is zero (avoids division by
/// zero).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}

/// Weighted elementwise mean of `(vector, weight)` entries.
///
/// Output length is taken from the first entry with a non-empty vector;
/// entries whose length disagrees with it, or whose weight is not positive,
/// are skipped. Returns an empty vector when no entry qualifies or the total
/// weight is zero. Sum-based, so the result is invariant to input order.
pub fn weighted_average(entries: &[(Vec<f32>, f32)]) -> Vec<f32> {
    let dims = match entries.iter().find(|(v, _)| !v.is_empty()) {
        Some((v, _)) => v.len(),
        None => return Vec::new(),
    };

    let mut sums = vec![0.0f32; dims];
    let mut total_weight = 0.0f32;

    for (vector, weight) in entries {
        if *weight <= 0.0 || vector.len() != dims {
            continue;
        }
        for (sum, value) in sums.iter_mut().zip(vector.iter()) {
            *sum += weight * value;
        }
        total_weight += weight;
    }

    if total_weight <= 0.0 {
        return Vec::new();
    }

    for sum in sums.iter_mut() {
        *sum /= total_weight;
    }
    sums
}

/// Decode a stored description embedding (JSON float-array text).
///
/// Storage keeps embeddings as serialized JSON arrays; rows with unparseable
/// text are skipped with a warning rather than failing the query's analysis.
pub fn parse_embedding(raw: &str) -> Option<Vec<f32>> {
    match serde_json::from_str::<Vec<f32>>(raw) {
        Ok(values) => Some(values),
        Err(e) => {
            tracing::warn!(error = %e, "Skipping unparseable stored embedding");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_mismatched_lengths_is_zero() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![1.0, 2.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_empty_is_zero() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[]), 0.0);
    }

    #[test]
    fn test_cosine_zero_norm_is_zero() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_weighted_average_empty_input() {
        assert!(weighted_average(&[]).is_empty());
    }

    #[test]
    fn test_weighted_average_all_zero_weight() {
        let entries = vec![(vec![1.0, 2.0], 0.0), (vec![3.0, 4.0], 0.0)];
        assert!(weighted_average(&entries).is_empty());
    }

    #[test]
    fn test_weighted_average_skips_mismatched_lengths() {
        let entries = vec![(vec![2.0, 4.0], 1.0), (vec![1.0, 1.0, 1.0], 10.0)];
        let avg = weighted_average(&entries);
        assert_eq!(avg, vec![2.0, 4.0]);
    }

    #[test]
    fn test_weighted_average_rating_scenario() {
        // Item X rated "S" (weight 1.8), item Y rated "C" (weight 0.1).
        let entries = vec![(vec![1.0, 0.0], 1.8), (vec![0.0, 1.0], 0.1)];
        let avg = weighted_average(&entries);

        assert!((avg[0] - 0.947).abs() < 1e-3);
        assert!((avg[1] - 0.053).abs() < 1e-3);
    }

    #[test]
    fn test_weighted_average_order_invariant() {
        let forward = vec![(vec![1.0, 0.0], 1.8), (vec![0.0, 1.0], 0.1)];
        let reversed: Vec<_> = forward.iter().rev().cloned().collect();

        let a = weighted_average(&forward);
        let b = weighted_average(&reversed);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_parse_embedding_valid() {
        assert_eq!(parse_embedding("[1.0, -2.5, 0.0]"), Some(vec![1.0, -2.5, 0.0]));
    }

    #[test]
    fn test_parse_embedding_malformed() {
        assert_eq!(parse_embedding("not json"), None);
        assert_eq!(parse_embedding("{\"a\": 1}"), None);
    }
}
