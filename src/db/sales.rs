use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::error::{StorageContext, StorageError};
use crate::models::{NewSale, SaleRecord};

/// Retrieve every sale in insertion order. Ordering by id keeps the table
/// stable across reloads.
pub fn fetch_sales(conn: &Connection) -> Result<Vec<SaleRecord>, StorageError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, customer_name, beverage_name, beverage_price, donation_amount,
                    beneficiary_name
             FROM sales
             ORDER BY id",
        )
        .storage("failed to prepare sales query")?;

    let sales = stmt
        .query_map([], |row| {
            Ok(SaleRecord {
                id: row.get(0)?,
                customer_name: row.get(1)?,
                beverage_name: row.get(2)?,
                beverage_price: row.get(3)?,
                donation_amount: row.get(4)?,
                beneficiary_name: row.get(5)?,
            })
        })
        .storage("failed to load sales")?
        .collect::<Result<Vec<_>, _>>()
        .storage("failed to collect sales")?;

    debug!(count = sales.len(), "fetched sales");
    Ok(sales)
}

/// Number of stored sales.
pub fn count_sales(conn: &Connection) -> Result<usize, StorageError> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM sales", [], |row| row.get(0))
        .storage("failed to count sales")?;
    Ok(count as usize)
}

/// Insert a validated sale and return the stored record with its new id.
pub fn insert_sale(conn: &Connection, sale: NewSale) -> Result<SaleRecord, StorageError> {
    conn.execute(
        "INSERT INTO sales
            (customer_name, beverage_name, beverage_price, donation_amount, beneficiary_name)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            sale.customer_name,
            sale.beverage_name,
            sale.beverage_price,
            sale.donation_amount,
            sale.beneficiary_name,
        ],
    )
    .storage("failed to insert sale")?;

    let id = conn.last_insert_rowid();
    info!(id, customer = %sale.customer_name, "inserted sale");
    Ok(sale.into_record(id))
}

/// Remove one sale. Deleting an id that does not exist is not an error; the
/// returned flag says whether a row was actually removed.
pub fn delete_sale(conn: &Connection, id: i64) -> Result<bool, StorageError> {
    let deleted = conn
        .execute("DELETE FROM sales WHERE id = ?1", params![id])
        .storage("failed to delete sale")?;

    info!(id, deleted, "deleted sale");
    Ok(deleted > 0)
}

/// Remove every sale, returning how many rows went away. The AUTOINCREMENT
/// sequence is left alone so ids keep increasing afterwards.
pub fn delete_all_sales(conn: &Connection) -> Result<usize, StorageError> {
    let deleted = conn
        .execute("DELETE FROM sales", [])
        .storage("failed to clear sales")?;

    info!(deleted, "cleared all sales");
    Ok(deleted)
}
