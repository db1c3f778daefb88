//! Persistence module split across logical submodules.

mod connection;
mod sales;

pub use connection::{ensure_schema, open_in_memory_store, open_store};
pub use sales::{count_sales, delete_all_sales, delete_sale, fetch_sales, insert_sale};
