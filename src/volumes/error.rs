use thiserror::Error;

/// Errors raised while constructing volumes.
///
/// Evaluation, rendering and equality never fail; every variant here is a
/// construction-time validation failure.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VolumeError {
    #[error("Invalid interval bounds [{min}, {max}]")]
    InvalidBounds { min: f64, max: f64 },

    #[error("Interval span {span} exceeds the periodic domain length {period}")]
    BoundsExceedPeriod { span: f64, period: f64 },

    #[error("Invalid periodic domain [{period_min}, {period_max})")]
    InvalidPeriod { period_min: f64, period_max: f64 },

    #[error("Volume bounds cannot be NaN")]
    NaNBound,

    #[error("Interface bounds have mismatched lengths: {minvals} minima, {maxvals} maxima")]
    InterfaceLengthMismatch { minvals: usize, maxvals: usize },

    #[error("Interface set must contain at least one interface")]
    EmptyInterfaceSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_bounds_display() {
        let e = VolumeError::InvalidBounds { min: 2.0, max: 1.0 };
        assert_eq!(e.to_string(), "Invalid interval bounds [2, 1]");
    }

    #[test]
    fn exceed_period_display() {
        let e = VolumeError::BoundsExceedPeriod {
            span: 630.0,
            period: 360.0,
        };
        assert_eq!(
            e.to_string(),
            "Interval span 630 exceeds the periodic domain length 360"
        );
    }

    #[test]
    fn invalid_period_display() {
        let e = VolumeError::InvalidPeriod {
            period_min: 1.0,
            period_max: 1.0,
        };
        assert!(e.to_string().contains("[1, 1)"));
    }
}
