//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. These stay light-weight data holders so the other layers can focus on
//! validation, persistence and presentation.

use std::fmt;

/// One persisted sale paired with its donation. Rows of the `sales` table map
/// one-to-one onto this struct.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    /// Primary key assigned by SQLite. Never reused, even after the table is
    /// cleared, so the UI can map a selected row back to exactly one record.
    pub id: i64,
    pub customer_name: String,
    pub beverage_name: String,
    /// Always strictly positive.
    pub beverage_price: f64,
    /// Zero or more.
    pub donation_amount: f64,
    /// Who or what the donation supports.
    pub beneficiary_name: String,
}

/// A sale that passed validation but has not been stored yet.
///
/// The fields are private to the crate so the only way to build one from
/// outside is [`crate::validation::validate_sale`]; the store accepts nothing
/// else, which keeps invalid rows out of the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub(crate) customer_name: String,
    pub(crate) beverage_name: String,
    pub(crate) beverage_price: f64,
    pub(crate) donation_amount: f64,
    pub(crate) beneficiary_name: String,
}

impl NewSale {
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn beverage_name(&self) -> &str {
        &self.beverage_name
    }

    pub fn beverage_price(&self) -> f64 {
        self.beverage_price
    }

    pub fn donation_amount(&self) -> f64 {
        self.donation_amount
    }

    pub fn beneficiary_name(&self) -> &str {
        &self.beneficiary_name
    }

    /// Attach the identifier the store handed out.
    pub(crate) fn into_record(self, id: i64) -> SaleRecord {
        SaleRecord {
            id,
            customer_name: self.customer_name,
            beverage_name: self.beverage_name,
            beverage_price: self.beverage_price,
            donation_amount: self.donation_amount,
            beneficiary_name: self.beneficiary_name,
        }
    }
}

/// Raw, unvalidated text exactly as typed into the five form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleInput {
    pub customer_name: String,
    pub beverage_name: String,
    pub beverage_price: String,
    pub donation_amount: String,
    pub beneficiary_name: String,
}

/// The five user-editable fields, in form order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SaleField {
    #[default]
    CustomerName,
    BeverageName,
    BeveragePrice,
    DonationAmount,
    BeneficiaryName,
}

impl SaleField {
    pub const ALL: [SaleField; 5] = [
        SaleField::CustomerName,
        SaleField::BeverageName,
        SaleField::BeveragePrice,
        SaleField::DonationAmount,
        SaleField::BeneficiaryName,
    ];

    /// Label shown next to the input and inside error messages.
    pub fn label(self) -> &'static str {
        match self {
            SaleField::CustomerName => "Customer name",
            SaleField::BeverageName => "Beverage name",
            SaleField::BeveragePrice => "Beverage price",
            SaleField::DonationAmount => "Donation amount",
            SaleField::BeneficiaryName => "Beneficiary name",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SaleField::CustomerName => SaleField::BeverageName,
            SaleField::BeverageName => SaleField::BeveragePrice,
            SaleField::BeveragePrice => SaleField::DonationAmount,
            SaleField::DonationAmount => SaleField::BeneficiaryName,
            SaleField::BeneficiaryName => SaleField::CustomerName,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            SaleField::CustomerName => SaleField::BeneficiaryName,
            SaleField::BeverageName => SaleField::CustomerName,
            SaleField::BeveragePrice => SaleField::BeverageName,
            SaleField::DonationAmount => SaleField::BeveragePrice,
            SaleField::BeneficiaryName => SaleField::DonationAmount,
        }
    }
}

impl fmt::Display for SaleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
