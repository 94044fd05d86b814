use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Execution failed: {0}")]
    Execution(String),
}
