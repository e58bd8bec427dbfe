use thiserror::Error;
use validator::ValidationErrors;

use crate::repository::errors::RepositoryError;

/// Outcome of a failed service call, mapped to an HTTP status by the routes.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Lookup by id found nothing.
    #[error("{0}")]
    NotFound(String),

    /// A write was rejected because of related or duplicated records.
    #[error("{0}")]
    DataIntegrity(String),

    /// Request payload failed field validation.
    #[error("Erro de validação: {0}")]
    Validation(#[from] ValidationErrors),

    /// Request parameters outside the accepted range or vocabulary.
    #[error("{0}")]
    BadRequest(String),

    #[error("Type constraint violation: {0}")]
    TypeConstraint(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Any other persistence fault, propagated unchanged.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
