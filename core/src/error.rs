use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid system definition: {0}")]
    InvalidSystem(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Scenario targets system '{expected}' but was given '{actual}'")]
    SystemMismatch { expected: String, actual: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
