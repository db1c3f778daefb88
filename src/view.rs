//! Keeps the on-screen sales table in step with the database.
//!
//! Rows are keyed by the record id rather than their position, so whatever
//! the user selects can be mapped straight back to the stored sale.

use rusqlite::Connection;
use tracing::debug;

use crate::db::fetch_sales;
use crate::error::StorageError;
use crate::models::SaleRecord;

/// Currency prefix used when none is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";

/// Column headings, in display order.
pub const COLUMN_TITLES: [&str; 5] = [
    "Customer",
    "Beverage",
    "Beverage Price",
    "Donation Amount",
    "Beneficiary",
];

/// A sale formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRow {
    /// Store id of the record behind this row.
    pub id: i64,
    pub customer: String,
    pub beverage: String,
    pub price: String,
    pub donation: String,
    pub beneficiary: String,
}

impl SaleRow {
    pub fn from_record(record: &SaleRecord, currency_symbol: &str) -> Self {
        Self {
            id: record.id,
            customer: record.customer_name.clone(),
            beverage: record.beverage_name.clone(),
            price: format_currency(currency_symbol, record.beverage_price),
            donation: format_currency(currency_symbol, record.donation_amount),
            beneficiary: record.beneficiary_name.clone(),
        }
    }

    /// Cell texts in [`COLUMN_TITLES`] order.
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.customer,
            &self.beverage,
            &self.price,
            &self.donation,
            &self.beneficiary,
        ]
    }
}

/// `R$ 5.50` style text with exactly two decimals.
pub fn format_currency(symbol: &str, amount: f64) -> String {
    format!("{symbol} {amount:.2}")
}

/// The displayed list of sales plus the current selection.
#[derive(Debug, Clone)]
pub struct SalesTable {
    rows: Vec<SaleRow>,
    selected: Option<usize>,
    currency_symbol: String,
}

impl Default for SalesTable {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_SYMBOL)
    }
}

impl SalesTable {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            selected: None,
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Reload every row from the store.
    ///
    /// The replacement list is built in full before the old one is dropped,
    /// so a failed read leaves the table exactly as it was. The selection
    /// follows its record if it still exists and is cleared otherwise.
    pub fn refresh(&mut self, conn: &Connection) -> Result<(), StorageError> {
        let sales = fetch_sales(conn)?;
        let selected_id = self.selected_id();

        self.rows = sales
            .iter()
            .map(|sale| SaleRow::from_record(sale, &self.currency_symbol))
            .collect();
        self.selected = selected_id.and_then(|id| self.position_of(id));

        debug!(rows = self.rows.len(), "refreshed sales table");
        Ok(())
    }

    pub fn rows(&self) -> &[SaleRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&SaleRow> {
        self.selected.and_then(|idx| self.rows.get(idx))
    }

    /// Store id of the selected row, if any.
    pub fn selected_id(&self) -> Option<i64> {
        self.selected_row().map(|row| row.id)
    }

    /// Select the row for `id`. Returns false when no such row is shown.
    pub fn select_id(&mut self, id: i64) -> bool {
        match self.position_of(id) {
            Some(idx) => {
                self.selected = Some(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Move the selection by `offset` rows, clamping at both ends. With no
    /// current selection the first (or last, for negative offsets) row is
    /// picked.
    pub fn move_selection(&mut self, offset: isize) {
        if self.rows.is_empty() {
            self.selected = None;
            return;
        }
        let last = self.rows.len() as isize - 1;
        let next = match self.selected {
            Some(current) => (current as isize + offset).clamp(0, last),
            None if offset < 0 => last,
            None => 0,
        };
        self.selected = Some(next as usize);
    }

    pub fn select_first(&mut self) {
        if !self.rows.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn select_last(&mut self) {
        if !self.rows.is_empty() {
            self.selected = Some(self.rows.len() - 1);
        }
    }

    fn position_of(&self, id: i64) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }
}
