use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid escalation policy: {reason}")]
    InvalidPolicy { reason: String },

    #[error("Complaint '{id}' not found")]
    NotFound { id: String },

    #[error("Invalid complaint status '{value}'")]
    InvalidStatus { value: String },

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
