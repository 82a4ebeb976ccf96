use hse_core::model::{RiskLevel, RiskMatrix};

const CRITICAL_FROM: f64 = 15.0;
const HIGH_FROM: f64 = 9.0;
const MEDIUM_FROM: f64 = 4.0;

/// Level for a severity × likelihood product.
#[must_use]
pub fn level_for_score(score: f64) -> RiskLevel {
    if score >= CRITICAL_FROM {
        RiskLevel::Critical
    } else if score >= HIGH_FROM {
        RiskLevel::High
    } else if score >= MEDIUM_FROM {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Level for a matrix; incomplete matrices are `Low`.
#[must_use]
pub fn risk_level(matrix: &RiskMatrix) -> RiskLevel {
    matrix.score().map_or(RiskLevel::Low, level_for_score)
}

/// True when the matrix scores in the critical band.
#[must_use]
pub fn is_critical(matrix: &RiskMatrix) -> bool {
    risk_level(matrix) == RiskLevel::Critical
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands() {
        assert_eq!(risk_level(&RiskMatrix::new(5.0, 3.0)), RiskLevel::Critical);
        assert_eq!(risk_level(&RiskMatrix::new(3.0, 3.0)), RiskLevel::High);
        assert_eq!(risk_level(&RiskMatrix::new(2.0, 4.0)), RiskLevel::Medium);
        assert_eq!(risk_level(&RiskMatrix::new(2.0, 2.0)), RiskLevel::Medium);
        assert_eq!(risk_level(&RiskMatrix::new(1.0, 3.0)), RiskLevel::Low);
        assert_eq!(level_for_score(14.99), RiskLevel::High);
    }

    #[test]
    fn incomplete_matrix_is_low() {
        assert_eq!(risk_level(&RiskMatrix::default()), RiskLevel::Low);
        assert!(!is_critical(&RiskMatrix {
            severity: Some(5.0),
            likelihood: None,
        }));
    }
}
