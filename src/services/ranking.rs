use crate::vector;

/// A candidate with its similarity to the reference vector attached
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub item: T,
    pub similarity: f32,
}

/// Scores candidates against a reference vector and returns the top matches.
///
/// Sort is descending by similarity and stable: candidates with equal scores
/// keep their original relative order. An empty reference vector yields no
/// results at all rather than scoring everything as zero-similarity noise.
pub fn rank<T, F>(reference: &[f32], candidates: Vec<T>, vector_of: F, limit: usize) -> Vec<Ranked<T>>
where
    F: Fn(&T) -> &[f32],
{
    if reference.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<Ranked<T>> = candidates
        .into_iter()
        .map(|item| {
            let similarity = vector::cosine_similarity(reference, vector_of(&item));
            Ranked { item, similarity }
        })
        .collect();

    // Vec::sort_by is stable; ties preserve candidate order.
    ranked.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<(&'static str, Vec<f32>)> {
        vec![
            ("orthogonal", vec![0.0, 1.0]),
            ("aligned", vec![1.0, 0.0]),
            ("diagonal", vec![1.0, 1.0]),
        ]
    }

    #[test]
    fn test_rank_sorts_descending() {
        let ranked = rank(&[1.0, 0.0], candidates(), |c| c.1.as_slice(), 10);

        assert_eq!(ranked[0].item.0, "aligned");
        assert_eq!(ranked[1].item.0, "diagonal");
        assert_eq!(ranked[2].item.0, "orthogonal");
        assert!((ranked[0].similarity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rank_truncates_to_limit() {
        let ranked = rank(&[1.0, 0.0], candidates(), |c| c.1.as_slice(), 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].item.0, "aligned");
    }

    #[test]
    fn test_rank_empty_reference_short_circuits() {
        let ranked = rank(&[], candidates(), |c| c.1.as_slice(), 10);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_rank_stable_on_ties() {
        let tied = vec![
            ("first", vec![2.0, 0.0]),
            ("second", vec![1.0, 0.0]),
            ("third", vec![3.0, 0.0]),
        ];
        let ranked = rank(&[1.0, 0.0], tied, |c| c.1.as_slice(), 10);

        // All three are perfectly aligned; input order must survive.
        assert_eq!(ranked[0].item.0, "first");
        assert_eq!(ranked[1].item.0, "second");
        assert_eq!(ranked[2].item.0, "third");
    }

    #[test]
    fn test_rank_deterministic() {
        let a = rank(&[1.0, 2.0], candidates(), |c| c.1.as_slice(), 10);
        let b = rank(&[1.0, 2.0], candidates(), |c| c.1.as_slice(), 10);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rank_empty_candidates() {
        let ranked = rank(&[1.0], Vec::<(&str, Vec<f32>)>::new(), |c| c.1.as_slice(), 5);
        assert!(ranked.is_empty());
    }
}
