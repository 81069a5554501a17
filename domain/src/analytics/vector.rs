//! Vector similarity helpers for comparing cognitive vectors.

use thiserror::Error;

/// Errors from analytics computations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Vector dimensions do not match: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

fn check_dimensions(a: &[f64], b: &[f64]) -> Result<(), AnalyticsError> {
    if a.len() != b.len() {
        return Err(AnalyticsError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

/// Cosine similarity of two equal-length vectors.
///
/// A zero vector on either side gives 0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64, AnalyticsError> {
    check_dimensions(a, b)?;

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (norm_a * norm_b))
}

/// Euclidean distance between two equal-length vectors.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> Result<f64, AnalyticsError> {
    check_dimensions(a, b)?;
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap() - 1.0).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap().abs() < 1e-9);
        assert!((cosine_similarity(&[1.0, 1.0], &[-1.0, -1.0]).unwrap() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), Ok(0.0));
    }

    #[test]
    fn test_euclidean() {
        assert_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]), Ok(5.0));
        assert_eq!(euclidean_distance(&[], &[]), Ok(0.0));
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = cosine_similarity(&[1.0], &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, AnalyticsError::DimensionMismatch { left: 1, right: 2 });
        assert!(euclidean_distance(&[1.0, 2.0, 3.0], &[1.0]).is_err());
    }
}
