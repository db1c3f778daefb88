//! Core library surface for the sales and donations register.
//!
//! The binary only glues these pieces together; every layer below the UI can
//! be exercised with plain function calls against an in-memory database.
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;
pub mod validation;
pub mod view;

/// Convenience re-exports for the persistence layer.
pub use db::open_store;

pub use error::{CommandError, StorageError, ValidationError};

pub use models::{NewSale, SaleField, SaleInput, SaleRecord};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};

pub use view::SalesTable;
