use crate::types::TripStatus;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TripError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("cannot {operation} trip from status: {status}")]
    IllegalTransition {
        operation: &'static str,
        status: TripStatus,
    },
}

impl TripError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// The trip status at the time of a rejected transition.
    pub fn status(&self) -> Option<TripStatus> {
        match self {
            Self::IllegalTransition { status, .. } => Some(*status),
            Self::InvalidParameter(_) => None,
        }
    }

    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }

    pub fn is_transition_error(&self) -> bool {
        matches!(self, Self::IllegalTransition { .. })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read pricing config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid pricing config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no fare named '{0}' in pricing config")]
    UnknownFare(String),
    #[error("pricing config rejected: {0}")]
    Invalid(#[from] TripError),
}
