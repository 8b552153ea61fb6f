use serde::{ Deserialize, Serialize };
use thiserror::Error;

/// Error types surfaced by the math pipeline
#[derive(Debug, Error)]
pub enum MathError {
    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),

    #[error("Model response did not match schema {schema}: {message}")]
    SchemaViolation { schema: String, message: String },

    #[error("Invalid input: {0}")]
    InputValidation(String),

    #[error("Guardrail rejected input: {0}")]
    GuardrailRejected(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type specific to pipeline operations
pub type MathResult<T> = Result<T, MathError>;

/// Coarse error tag carried by a failed pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ModelInvocation,
    SchemaViolation,
    InputValidation,
    GuardrailRejected,
    Config,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::ModelInvocation => "ModelInvocationError",
            ErrorKind::SchemaViolation => "SchemaViolationError",
            ErrorKind::InputValidation => "InputValidationError",
            ErrorKind::GuardrailRejected => "GuardrailRejected",
            ErrorKind::Config => "ConfigError",
        };
        write!(f, "{}", name)
    }
}

impl MathError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MathError::ModelInvocation(_) => ErrorKind::ModelInvocation,
            MathError::SchemaViolation { .. } => ErrorKind::SchemaViolation,
            MathError::InputValidation(_) => ErrorKind::InputValidation,
            MathError::GuardrailRejected(_) => ErrorKind::GuardrailRejected,
            MathError::Config(_) => ErrorKind::Config,
        }
    }

    pub fn schema_violation(schema: &str, message: impl Into<String>) -> Self {
        MathError::SchemaViolation {
            schema: schema.to_string(),
            message: message.into(),
        }
    }
}
