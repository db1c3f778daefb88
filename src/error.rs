//! Error types shared by the validation, persistence and command layers.

use std::io;

use crate::models::SaleField;

/// A user-correctable problem with the form input. Nothing is written while
/// one of these is outstanding.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A text field was empty after trimming.
    #[error("{0} is required.")]
    EmptyField(SaleField),

    /// An amount could not be read as a number.
    #[error("{0} must be a number.")]
    NonNumeric(SaleField),

    /// The beverage price was zero or below.
    #[error("{0} must be greater than zero.")]
    NonPositive(SaleField),

    /// The donation was below zero.
    #[error("{0} cannot be negative.")]
    Negative(SaleField),
}

impl ValidationError {
    /// The field that failed, so the form can move focus to it.
    pub fn field(&self) -> SaleField {
        match self {
            ValidationError::EmptyField(field)
            | ValidationError::NonNumeric(field)
            | ValidationError::NonPositive(field)
            | ValidationError::Negative(field) => *field,
        }
    }
}

/// The database file could not be opened, read or written.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{context}: {source}")]
    Sql {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },
}

/// Attach a short description of the failed operation to a low-level error,
/// in the spirit of `anyhow::Context`.
pub(crate) trait StorageContext<T> {
    fn storage(self, context: &'static str) -> Result<T, StorageError>;
}

impl<T> StorageContext<T> for Result<T, rusqlite::Error> {
    fn storage(self, context: &'static str) -> Result<T, StorageError> {
        self.map_err(|source| StorageError::Sql { context, source })
    }
}

impl<T> StorageContext<T> for Result<T, io::Error> {
    fn storage(self, context: &'static str) -> Result<T, StorageError> {
        self.map_err(|source| StorageError::Io { context, source })
    }
}

/// Everything a command handler can report back to the user.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The change was committed but the table could not be reloaded
    /// afterwards. The store is ahead of what is on screen.
    #[error("The change was saved, but the table could not be reloaded: {0}")]
    StaleView(#[source] StorageError),

    /// Remove was requested while no table row was selected.
    #[error("Select a record to remove first.")]
    NoSelection,
}
