use thiserror::Error;

use crate::repository::errors::RepositoryError;
use crate::services::category_tree::TreeError;
use crate::services::totals::TotalsError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Entity not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    TypeConstraint(String),

    #[error("Catalog API error: {0}")]
    Repository(RepositoryError),

    #[error("Category structure error: {0}")]
    Tree(#[from] TreeError),

    #[error("Totals error: {0}")]
    Totals(#[from] TotalsError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
