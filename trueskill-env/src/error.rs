use serde::Serialize;

pub type Result<T> = std::result::Result<T, RatingError>;

#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Invalid match: {reason}")]
    InvalidMatch { reason: String },

    #[error("Player {name} is already registered")]
    DuplicatePlayer { name: String },

    #[error("Player {name} is not registered in this environment")]
    UnknownPlayer { name: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}")]
    Parse {
        path: String,
        #[source]
        source: json5::Error,
    },
}

impl RatingError {
    pub(crate) fn invalid_match(reason: impl Into<String>) -> Self {
        Self::InvalidMatch {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

/// A truncation step that had to be clamped to keep player state finite. The update still
/// goes through; this only travels inside the report of the affected comparison.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, thiserror::Error)]
pub enum NumericalInstability {
    #[error("truncation denominator underflowed at x = {x}, fell back to the asymptotic v")]
    DenominatorUnderflow { x: f64 },

    #[error("w = {w} left the open interval (0, 1) and was clamped")]
    VarianceFactorClamped { w: f64 },

    #[error("truncation produced a non-finite moment, replaced by a neutral update")]
    NonFinite,
}
