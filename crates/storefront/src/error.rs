use shared::{
    domain::{CourseId, MediaId},
    error::ValidationErrors,
};
use thiserror::Error;

use crate::{cart::InvalidCart, credential::CredentialError};

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("please log in to complete purchase")]
    NotAuthenticated,
    #[error("unknown course: {0}")]
    UnknownCourse(CourseId),
    #[error(transparent)]
    InvalidCart(#[from] InvalidCart),
    #[error("unknown media item: {0}")]
    UnknownMedia(MediaId),
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl StorefrontError {
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            StorefrontError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
