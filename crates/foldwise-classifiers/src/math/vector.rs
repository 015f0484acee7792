use crate::error::{ClassifierError, Result};

/// Dot product of two equal-length slices.
pub fn dot(lhs: &[f64], rhs: &[f64]) -> Result<f64> {
    check_len(lhs, rhs)?;
    Ok(dot_scalar_f64(lhs, rhs))
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub(crate) fn check_len<T>(lhs: &[T], rhs: &[T]) -> Result<()> {
    if lhs.len() != rhs.len() {
        return Err(ClassifierError::DimensionMismatch {
            left: lhs.len(),
            right: rhs.len(),
        });
    }
    Ok(())
}

fn dot_scalar_f64(lhs: &[f64], rhs: &[f64]) -> f64 {
    lhs.iter().zip(rhs.iter()).map(|(a, b)| a * b).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_of_known_vectors() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap(), 32.0);
    }

    #[test]
    fn dot_rejects_mismatched_lengths() {
        assert!(matches!(
            dot(&[1.0], &[1.0, 2.0]),
            Err(ClassifierError::DimensionMismatch { left: 1, right: 2 })
        ));
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    }
}
