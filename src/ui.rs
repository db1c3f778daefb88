//! Ratatui front-end: a form for new sales above a table of stored ones, with
//! modal dialogs for confirmations and notifications.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
