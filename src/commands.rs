//! The three user actions, each running validation, persistence and the
//! table refresh in that order. None of this touches the terminal, so the UI
//! only has to translate key presses into these calls and show the outcome.

use rusqlite::Connection;
use tracing::{error, info, warn};

use crate::db::{delete_all_sales, delete_sale, insert_sale};
use crate::error::CommandError;
use crate::models::{SaleInput, SaleRecord};
use crate::validation::validate_sale;
use crate::view::SalesTable;

/// A removal that is waiting for the user to confirm it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRemoval {
    pub id: i64,
    pub customer: String,
}

/// Validate the form, store the sale and reload the table.
///
/// Nothing is written if any field is invalid. Once the insert succeeded a
/// failed reload is reported as [`CommandError::StaleView`], never as a plain
/// storage error, so the caller knows the sale is already stored.
pub fn register_sale(
    conn: &Connection,
    table: &mut SalesTable,
    input: &SaleInput,
) -> Result<SaleRecord, CommandError> {
    let sale = validate_sale(input).inspect_err(|err| {
        warn!(field = %err.field(), "rejected sale: {err}");
    })?;
    let record = insert_sale(conn, sale).inspect_err(|err| error!("{err}"))?;
    refresh_after_commit(conn, table)?;
    table.select_id(record.id);
    Ok(record)
}

/// Work out which record the current selection refers to. Nothing is
/// deleted yet; pass the result to [`confirm_removal`] once the user agrees.
pub fn request_removal(table: &SalesTable) -> Result<PendingRemoval, CommandError> {
    let row = table.selected_row().ok_or(CommandError::NoSelection)?;
    Ok(PendingRemoval {
        id: row.id,
        customer: row.customer.clone(),
    })
}

/// Delete the confirmed record and reload the table.
pub fn confirm_removal(
    conn: &Connection,
    table: &mut SalesTable,
    pending: &PendingRemoval,
) -> Result<(), CommandError> {
    delete_sale(conn, pending.id).inspect_err(|err| error!(id = pending.id, "{err}"))?;
    refresh_after_commit(conn, table)?;
    info!(id = pending.id, customer = %pending.customer, "removed sale");
    Ok(())
}

/// Delete every record and reload the table. Returns how many were removed.
pub fn clear_all(conn: &Connection, table: &mut SalesTable) -> Result<usize, CommandError> {
    let removed = delete_all_sales(conn).inspect_err(|err| error!("{err}"))?;
    refresh_after_commit(conn, table)?;
    Ok(removed)
}

fn refresh_after_commit(conn: &Connection, table: &mut SalesTable) -> Result<(), CommandError> {
    table.refresh(conn).map_err(|err| {
        error!("table reload failed after commit: {err}");
        CommandError::StaleView(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{count_sales, fetch_sales, open_in_memory_store};
    use crate::error::ValidationError;
    use crate::models::SaleField;

    fn input(customer: &str, price: &str, donation: &str) -> SaleInput {
        SaleInput {
            customer_name: customer.to_string(),
            beverage_name: "Lemonade".to_string(),
            beverage_price: price.to_string(),
            donation_amount: donation.to_string(),
            beneficiary_name: "Shelly".to_string(),
        }
    }

    fn setup() -> (Connection, SalesTable) {
        let conn = open_in_memory_store().unwrap();
        let mut table = SalesTable::default();
        table.refresh(&conn).unwrap();
        (conn, table)
    }

    #[test]
    fn valid_sale_adds_exactly_one_row() {
        let (conn, mut table) = setup();

        let record = register_sale(&conn, &mut table, &input("Ana", "5.50", "1,50")).unwrap();

        assert_eq!(count_sales(&conn).unwrap(), 1);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].id, record.id);
        assert_eq!(table.rows()[0].price, "R$ 5.50");
        assert_eq!(table.rows()[0].donation, "R$ 1.50");
        assert_eq!(table.selected_id(), Some(record.id));
    }

    #[test]
    fn invalid_sales_persist_nothing() {
        let (conn, mut table) = setup();
        register_sale(&conn, &mut table, &input("Ana", "1", "0")).unwrap();

        let bad_inputs = [
            input("Bia", "-3", "0"),
            input("Bia", "0", "0"),
            input("Bia", "2", "-1"),
            input("Bia", "two", "0"),
            input("Bia", "2", "lots"),
            input(" ", "2", "0"),
        ];
        for bad in &bad_inputs {
            let result = register_sale(&conn, &mut table, bad);
            assert!(
                matches!(result, Err(CommandError::Validation(_))),
                "{bad:?} should be rejected"
            );
        }

        assert_eq!(count_sales(&conn).unwrap(), 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn negative_price_reports_the_field() {
        let (conn, mut table) = setup();

        let err = register_sale(&conn, &mut table, &input("Ana", "-3", "0")).unwrap_err();

        assert!(matches!(
            err,
            CommandError::Validation(ValidationError::NonPositive(SaleField::BeveragePrice))
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn removal_without_selection_is_refused() {
        let (conn, mut table) = setup();
        register_sale(&conn, &mut table, &input("Ana", "1", "0")).unwrap();
        table.clear_selection();

        assert!(matches!(
            request_removal(&table),
            Err(CommandError::NoSelection)
        ));
        assert_eq!(count_sales(&conn).unwrap(), 1);
    }

    #[test]
    fn removing_the_first_of_two_keeps_the_second() {
        let (conn, mut table) = setup();
        let first = register_sale(&conn, &mut table, &input("Ana", "1", "0")).unwrap();
        let second = register_sale(&conn, &mut table, &input("Bia", "2", "0,25")).unwrap();
        table.select_id(first.id);

        let pending = request_removal(&table).unwrap();
        assert_eq!(
            pending,
            PendingRemoval {
                id: first.id,
                customer: "Ana".to_string()
            }
        );
        confirm_removal(&conn, &mut table, &pending).unwrap();

        assert_eq!(fetch_sales(&conn).unwrap(), vec![second.clone()]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].id, second.id);
    }

    #[test]
    fn removal_uses_the_record_id_not_the_row_position() {
        let (conn, mut table) = setup();
        let first = register_sale(&conn, &mut table, &input("Ana", "1", "0")).unwrap();
        let second = register_sale(&conn, &mut table, &input("Bia", "2", "0")).unwrap();
        let third = register_sale(&conn, &mut table, &input("Caio", "3", "0")).unwrap();
        delete_sale(&conn, first.id).unwrap();
        table.refresh(&conn).unwrap();

        table.select_first();
        let pending = request_removal(&table).unwrap();
        confirm_removal(&conn, &mut table, &pending).unwrap();

        assert_eq!(pending.id, second.id);
        assert_eq!(fetch_sales(&conn).unwrap(), vec![third]);
    }

    #[test]
    fn clear_all_empties_store_and_table() {
        let (conn, mut table) = setup();
        register_sale(&conn, &mut table, &input("Ana", "1", "0")).unwrap();
        register_sale(&conn, &mut table, &input("Bia", "2", "0")).unwrap();

        let removed = clear_all(&conn, &mut table).unwrap();

        assert_eq!(removed, 2);
        assert!(fetch_sales(&conn).unwrap().is_empty());
        assert!(table.is_empty());
        assert_eq!(table.selected_id(), None);
    }

    /// Makes every row unreadable as text right after it is written, so the
    /// insert commits but the following reload fails.
    fn corrupt_rows_after_insert(conn: &Connection) {
        conn.execute(
            "CREATE TRIGGER corrupt_beneficiary AFTER INSERT ON sales
             BEGIN
                 UPDATE sales SET beneficiary_name = X'FF' WHERE id = NEW.id;
             END",
            [],
        )
        .unwrap();
    }

    #[test]
    fn reload_failure_after_insert_is_reported_as_stale_view() {
        let (conn, mut table) = setup();
        corrupt_rows_after_insert(&conn);

        let result = register_sale(&conn, &mut table, &input("Ana", "1", "0"));

        assert!(matches!(result, Err(CommandError::StaleView(_))));
        assert_eq!(count_sales(&conn).unwrap(), 1);
        assert!(table.is_empty());
    }

    #[test]
    fn storage_failure_leaves_the_table_untouched() {
        let (conn, mut table) = setup();
        register_sale(&conn, &mut table, &input("Ana", "1", "0")).unwrap();
        conn.execute("DROP TABLE sales", []).unwrap();

        let result = register_sale(&conn, &mut table, &input("Bia", "2", "0"));

        assert!(matches!(result, Err(CommandError::Storage(_))));
        assert_eq!(table.len(), 1);
    }
}
