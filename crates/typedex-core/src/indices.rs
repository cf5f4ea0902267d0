//! Balance and diversity indices over a weight vector.
//!
//! Both indices are percentages. Balance is `(1 - gini) * 100`, so a
//! perfectly even vector scores 100. Diversity is the Shannon index
//! (base 10) normalized by the maximum attainable for the number of
//! categories, zero-weight categories included.

/// The weight vector cannot produce a defined index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// Empty, single-category, or all-zero input.
    #[error("degenerate sample: {reason}")]
    DegenerateSample {
        /// Which condition was hit.
        reason: &'static str,
    },
}

/// Inverted Gini coefficient of `weights`, 0 to 100.
#[allow(clippy::arithmetic_side_effects)]
pub fn balance(weights: &[f64]) -> Result<f64, IndexError> {
    if weights.is_empty() {
        return Err(IndexError::DegenerateSample {
            reason: "no categories",
        });
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(IndexError::DegenerateSample {
            reason: "total weight is zero",
        });
    }

    let mut sorted = weights.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = count_of(&sorted);
    let mut position = 0.0_f64;
    let mut numerator = 0.0_f64;
    for weight in &sorted {
        position += 1.0;
        numerator += 2.0_f64.mul_add(position, -n - 1.0) * weight;
    }

    let gini = numerator / (n * total);
    Ok((1.0 - gini) * 100.0)
}

/// Normalized Shannon index of `weights`, 0 to 100.
#[allow(clippy::arithmetic_side_effects)]
pub fn diversity(weights: &[f64]) -> Result<f64, IndexError> {
    if weights.len() <= 1 {
        return Err(IndexError::DegenerateSample {
            reason: "fewer than two categories",
        });
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(IndexError::DegenerateSample {
            reason: "total weight is zero",
        });
    }

    let entropy: f64 = -weights
        .iter()
        .filter(|weight| **weight > 0.0)
        .map(|weight| {
            let proportion = weight / total;
            proportion * proportion.log10()
        })
        .sum::<f64>();

    Ok(entropy / count_of(weights).log10() * 100.0)
}

#[allow(clippy::arithmetic_side_effects)]
fn count_of(weights: &[f64]) -> f64 {
    weights.iter().fold(0.0, |n, _| n + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: Result<f64, IndexError>, expected: f64) -> bool {
        actual.is_ok_and(|value| (value - expected).abs() < 1e-9)
    }

    #[test]
    fn balance_of_equal_weights_is_full() {
        for x in [0.5, 1.0, 7.0, 120.0] {
            assert!(close(balance(&[x, x, x, x]), 100.0));
        }
    }

    #[test]
    fn balance_of_concentrated_weights() {
        // One of four categories holds everything: gini = 3/4.
        assert!(close(balance(&[0.0, 0.0, 0.0, 8.0]), 25.0));
        // Input order does not matter.
        assert!(close(balance(&[8.0, 0.0, 0.0, 0.0]), 25.0));
    }

    #[test]
    fn balance_degenerate() {
        assert!(balance(&[]).is_err());
        assert!(balance(&[0.0, 0.0]).is_err());
    }

    #[test]
    fn diversity_single_nonzero_is_zero() {
        let value = diversity(&[1.0, 0.0, 0.0]);
        assert!(value.is_ok_and(|v| v.abs() < 1e-9));
    }

    #[test]
    fn diversity_uniform_is_full() {
        assert!(close(diversity(&[3.0, 3.0, 3.0]), 100.0));
        assert!(close(diversity(&[1.0, 1.0]), 100.0));
    }

    #[test]
    fn diversity_normalizes_by_all_categories() {
        // Two even categories out of four: log10(2) / log10(4) = 0.5.
        assert!(close(diversity(&[2.0, 2.0, 0.0, 0.0]), 50.0));
    }

    #[test]
    fn diversity_degenerate() {
        assert_eq!(
            diversity(&[5.0]),
            Err(IndexError::DegenerateSample {
                reason: "fewer than two categories"
            })
        );
        assert!(diversity(&[0.0, 0.0, 0.0]).is_err());
    }
}
