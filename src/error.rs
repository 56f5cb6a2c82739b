//! Error types for voronoise operations.

use thiserror::Error;

/// Errors that can occur while sampling, triangulating or exporting.
#[derive(Debug, Error)]
pub enum VoronoiError {
    /// A configuration value is outside its accepted range.
    #[error("invalid {field} = {value}: {reason}")]
    InvalidConfig {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value, formatted.
        value: String,
        /// What the accepted range is.
        reason: &'static str,
    },

    /// The density field does not match the configured resolution.
    #[error("density map should be {expected} x {expected}, found {} x {}", found.0, found.1)]
    DensityResolutionMismatch {
        /// Configured image size.
        expected: u32,
        /// Actual (width, height) of the field.
        found: (u32, u32),
    },

    /// The sampler finished without keeping a single point.
    #[error("no points could be placed")]
    NoPointsPlaced,

    /// Two input points share identical coordinates.
    #[error("duplicate point: input {second} repeats input {first}")]
    DuplicatePoint {
        /// Index of the first occurrence.
        first: usize,
        /// Index of the repeated point.
        second: usize,
    },

    /// Three or more points all lie on a single line.
    #[error("all {count} input points are collinear")]
    CollinearInput {
        /// Number of input points.
        count: usize,
    },

    /// An input point has a NaN or infinite coordinate.
    #[error("input point {index} has a non-finite coordinate")]
    InvalidPoint {
        /// Index of the offending point.
        index: usize,
    },

    /// A ray or line has a zero-length direction.
    #[error("degenerate direction: zero-length ray or line")]
    DegenerateDirection,

    /// Malformed line in a points or segments text file.
    #[error("line {line}: {message}")]
    Format {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },

    /// Malformed or unsupported BMP data.
    #[error("bmp: {0}")]
    Bmp(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VoronoiError>;

impl VoronoiError {
    /// Builds an [`VoronoiError::InvalidConfig`] from any displayable value.
    pub(crate) fn invalid_config(
        field: &'static str,
        value: impl std::fmt::Display,
        reason: &'static str,
    ) -> Self {
        VoronoiError::InvalidConfig {
            field,
            value: value.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_identify_input() {
        let err = VoronoiError::DuplicatePoint { first: 3, second: 7 };
        assert_eq!(err.to_string(), "duplicate point: input 7 repeats input 3");

        let err = VoronoiError::DensityResolutionMismatch {
            expected: 512,
            found: (256, 512),
        };
        assert_eq!(err.to_string(), "density map should be 512 x 512, found 256 x 512");
    }

    #[test]
    fn test_invalid_config_helper() {
        let err = VoronoiError::invalid_config("cell_size", 0, "must be between 1 and 1000");
        assert_eq!(err.to_string(), "invalid cell_size = 0: must be between 1 and 1000");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: VoronoiError = io.into();
        assert!(matches!(err, VoronoiError::Io(_)));
    }
}
