//! Wheel error types

/// Errors raised while building or configuring a wheel.
#[derive(Debug, thiserror::Error)]
pub enum WheelError {
    #[error("a wheel needs at least one candidate")]
    EmptyCandidates,
    #[error("expected {expected} weights, got {actual}")]
    WeightCountMismatch { expected: usize, actual: usize },
    #[error("weight {weight} for candidate {index} is negative")]
    NegativeWeight { index: usize, weight: f64 },
    #[error("weight for candidate {index} is not a finite number")]
    NonFiniteWeight { index: usize },
    #[error("invalid spin config: {0}")]
    InvalidConfig(&'static str),
    #[error("settings parse error: {0}")]
    Settings(#[from] serde_json::Error),
}

impl WheelError {
    /// True for errors caused by bad candidate or weight input
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::EmptyCandidates
                | Self::WeightCountMismatch { .. }
                | Self::NegativeWeight { .. }
                | Self::NonFiniteWeight { .. }
        )
    }

    pub fn error_code(&self) -> &'static str {
        if self.is_invalid_argument() {
            return "E_INVALID_ARGUMENT";
        }
        match self {
            Self::InvalidConfig(_) => "E_INVALID_CONFIG",
            _ => "E_SETTINGS",
        }
    }
}
