use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::IllegalToken { .. } => "IllegalToken",
            ErrorImpl::ReadFailure { .. } => "ReadFailure",
            ErrorImpl::InputFailure { .. } => "InputFailure",
            ErrorImpl::OutputFailure { .. } => "OutputFailure",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::IllegalToken { token } => ErrorTip::Suggestion(format!(
                "Unrecognised character `{}`",
                token.escape_default()
            )),
            ErrorImpl::ReadFailure { path, message } => {
                ErrorTip::Suggestion(format!("Could not read `{}`: {}", path, message))
            }
            ErrorImpl::InputFailure { .. } | ErrorImpl::OutputFailure { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("illegal token: {token:?}")]
    IllegalToken { token: String },
    #[error("failed to read {path:?}: {message}")]
    ReadFailure { path: String, message: String },
    #[error("failed to read input: {message}")]
    InputFailure { message: String },
    #[error("failed to write output: {message}")]
    OutputFailure { message: String },
}
