//! Todo Error Types

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Todo-specific result type alias
pub type TodoResult<T> = Result<T, TodoError>;

/// Todo-specific error variants
#[derive(Debug, Error)]
pub enum TodoError {
    /// Title input was empty after trimming
    #[error("Todo title cannot be empty")]
    EmptyTitle,

    /// No record with the requested identifier
    #[error("Todo record not found")]
    NotFound,

    /// The remote call failed
    #[error(transparent)]
    Api(#[from] baas::Error),
}

impl TodoError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::EmptyTitle => ErrorKind::BadRequest,
            TodoError::NotFound => ErrorKind::NotFound,
            TodoError::Api(e) => e.kind(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(self) -> AppError {
        match self {
            TodoError::Api(e) => e.into(),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            TodoError::Api(e) if e.kind().is_server_error() => {
                tracing::error!(error = %e, "Todo service error");
            }
            TodoError::Api(e) => {
                tracing::warn!(error = %e, "Todo call rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Todo input rejected");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(TodoError::EmptyTitle.kind(), ErrorKind::BadRequest);
        assert_eq!(TodoError::NotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            TodoError::Api(baas::Error::InvalidResponse("x".into())).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_to_app_error() {
        let app = TodoError::NotFound.to_app_error();
        assert_eq!(app.kind(), ErrorKind::NotFound);
    }
}
