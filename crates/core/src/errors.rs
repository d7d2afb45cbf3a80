use thiserror::Error;

/// Identifies which external collaborator produced a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Oracle {
    Classification,
    Reply,
    Retrieval,
}

impl Oracle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classification => "classification",
            Self::Reply => "reply",
            Self::Retrieval => "retrieval",
        }
    }
}

impl std::fmt::Display for Oracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OracleError {
    #[error("{oracle} oracle unavailable: {message}")]
    Unavailable { oracle: Oracle, message: String },
    #[error("{oracle} oracle timed out")]
    Timeout { oracle: Oracle },
    #[error("{oracle} oracle returned an invalid response: {message}")]
    InvalidResponse { oracle: Oracle, message: String },
}

impl OracleError {
    pub fn oracle(&self) -> Oracle {
        match self {
            Self::Unavailable { oracle, .. }
            | Self::Timeout { oracle }
            | Self::InvalidResponse { oracle, .. } => *oracle,
        }
    }
}

/// Request-level failures raised before the pipeline runs. Oracle failures never reach this
/// layer: the agent degrades them into fixed replies.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. } => correlation_id,
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        match self {
            Self::InvalidRequest(message) => InterfaceError::BadRequest { message, correlation_id },
        }
    }
}
