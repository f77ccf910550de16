use thiserror::Error;

use crate::domain::{CategoryKind, PeriodError, TelegramId};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("User is not registered: {0}")]
    UserNotRegistered(TelegramId),

    #[error("Category not found: {name} ({kind})")]
    CategoryNotFound { name: String, kind: CategoryKind },

    #[error("Category already exists: {name} ({kind})")]
    CategoryAlreadyExists { name: String, kind: CategoryKind },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Report totals do not fit in the amount range")]
    TotalOverflow,

    #[error(transparent)]
    Period(#[from] PeriodError),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
