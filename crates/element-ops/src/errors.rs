use geom_kernel::KernelError;

/// Errors from element generation.
///
/// Guide and parameter errors are raised before any layout work starts.
/// Geometric degeneracies found during layout (zero-length segments, flights
/// too short for a tread) are not errors; they produce fewer volumes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ElementError {
    #[error("guide cannot be used as a curve: {reason}")]
    InvalidGuide { reason: String },

    #[error("guide is not a polyline: {reason}")]
    NonPolylineGuide { reason: String },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("{what} is not a closed curve")]
    OpenBoundary { what: String },

    #[error("invalid request: {0}")]
    Config(String),

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),
}

/// Reject non-finite and non-positive dimensions.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, ElementError> {
    if !value.is_finite() {
        return Err(ElementError::InvalidParameter {
            name,
            reason: format!("{value} is not a finite number"),
        });
    }
    if value <= 0.0 {
        return Err(ElementError::InvalidParameter {
            name,
            reason: format!("{value} must be > 0"),
        });
    }
    Ok(value)
}

pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64, ElementError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ElementError::InvalidParameter {
            name,
            reason: format!("{value} is not a finite number"),
        })
    }
}

/// Upper bound on the volumes a single generator call may produce.
pub(crate) const MAX_VOLUMES: usize = 1_000_000;

/// `round(length / spacing)` as a count, rejected when it cannot fit the
/// volume budget.
pub(crate) fn rounded_count(
    name: &'static str,
    length: f64,
    spacing: f64,
) -> Result<usize, ElementError> {
    let ratio = (length / spacing).round();
    if !ratio.is_finite() || ratio > MAX_VOLUMES as f64 {
        return Err(ElementError::InvalidParameter {
            name,
            reason: format!("{spacing} over a length of {length} gives {ratio} intervals"),
        });
    }
    Ok(ratio as usize)
}

/// Check a volume total computed with checked arithmetic.
pub(crate) fn within_budget(
    name: &'static str,
    total: Option<usize>,
) -> Result<usize, ElementError> {
    match total {
        Some(n) if n <= MAX_VOLUMES => Ok(n),
        _ => Err(ElementError::InvalidParameter {
            name,
            reason: format!("would produce more than {MAX_VOLUMES} volumes"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_check_rejects_zero_and_nan() {
        assert!(require_positive("width", 0.0).is_err());
        assert!(require_positive("width", -1.0).is_err());
        assert!(require_positive("width", f64::NAN).is_err());
        assert_eq!(require_positive("width", 1200.0), Ok(1200.0));
    }

    #[test]
    fn parameter_error_names_the_field() {
        let err = require_positive("tread_depth", 0.0).unwrap_err();
        assert!(err.to_string().contains("tread_depth"));
    }

    #[test]
    fn counts_beyond_budget_are_rejected() {
        assert_eq!(rounded_count("spacing", 1000.0, 300.0), Ok(3));
        assert!(rounded_count("spacing", 1000.0, 1e-300).is_err());
        assert!(rounded_count("spacing", f64::MAX, 1e-10).is_err());
        assert_eq!(within_budget("stories", Some(12)), Ok(12));
        assert!(within_budget("stories", None).is_err());
        assert!(within_budget("stories", Some(MAX_VOLUMES + 1)).is_err());
    }
}
