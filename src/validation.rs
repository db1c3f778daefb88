//! Pure checks that turn raw form text into a [`NewSale`].
//!
//! Fields are checked in a fixed order: the three text fields first
//! (customer, beverage, beneficiary), then the price, then the donation. The
//! first failure wins so the user fixes one problem at a time.

use crate::error::ValidationError;
use crate::models::{NewSale, SaleField, SaleInput};

/// Validate all five fields, stopping at the first problem.
pub fn validate_sale(input: &SaleInput) -> Result<NewSale, ValidationError> {
    let customer_name = required_text(SaleField::CustomerName, &input.customer_name)?;
    let beverage_name = required_text(SaleField::BeverageName, &input.beverage_name)?;
    let beneficiary_name = required_text(SaleField::BeneficiaryName, &input.beneficiary_name)?;
    let beverage_price = positive_amount(SaleField::BeveragePrice, &input.beverage_price)?;
    let donation_amount = non_negative_amount(SaleField::DonationAmount, &input.donation_amount)?;

    Ok(NewSale {
        customer_name,
        beverage_name,
        beverage_price,
        donation_amount,
        beneficiary_name,
    })
}

/// Trim a text field and reject it when nothing is left.
pub fn required_text(field: SaleField, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Parse an amount, accepting either `,` or `.` as the decimal separator.
/// `NaN` and infinities are treated as non-numeric.
pub fn parse_amount(field: SaleField, raw: &str) -> Result<f64, ValidationError> {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NonNumeric(field)),
    }
}

/// Amount that must be strictly above zero (the beverage price).
pub fn positive_amount(field: SaleField, raw: &str) -> Result<f64, ValidationError> {
    let value = parse_amount(field, raw)?;
    if value <= 0.0 {
        return Err(ValidationError::NonPositive(field));
    }
    Ok(value)
}

/// Amount that may be zero but not below (the donation).
pub fn non_negative_amount(field: SaleField, raw: &str) -> Result<f64, ValidationError> {
    let value = parse_amount(field, raw)?;
    if value < 0.0 {
        return Err(ValidationError::Negative(field));
    }
    // Normalise -0.0 so it never shows up as "-0.00".
    Ok(value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(customer: &str, beverage: &str, price: &str, donation: &str, who: &str) -> SaleInput {
        SaleInput {
            customer_name: customer.to_string(),
            beverage_name: beverage.to_string(),
            beverage_price: price.to_string(),
            donation_amount: donation.to_string(),
            beneficiary_name: who.to_string(),
        }
    }

    #[test]
    fn accepts_comma_and_period_separators() {
        let sale = validate_sale(&input("Ana", "Lemonade", "5.50", "1,50", "Shelly")).unwrap();

        assert_eq!(sale.beverage_price(), 5.50);
        assert_eq!(sale.donation_amount(), 1.50);
    }

    #[test]
    fn trims_text_fields() {
        let sale = validate_sale(&input("  Ana ", "\tTea", "2", "0", " Shelly\n")).unwrap();

        assert_eq!(sale.customer_name(), "Ana");
        assert_eq!(sale.beverage_name(), "Tea");
        assert_eq!(sale.beneficiary_name(), "Shelly");
    }

    #[test]
    fn zero_donation_is_allowed() {
        let sale = validate_sale(&input("Ana", "Tea", "2", "0", "Shelly")).unwrap();

        assert_eq!(sale.donation_amount(), 0.0);
    }

    #[test]
    fn negative_zero_donation_is_normalised() {
        let sale = validate_sale(&input("Ana", "Tea", "2", "-0", "Shelly")).unwrap();

        assert!(sale.donation_amount().is_sign_positive());
    }

    #[test]
    fn blank_text_fields_are_rejected() {
        assert_eq!(
            validate_sale(&input("   ", "Tea", "2", "0", "Shelly")),
            Err(ValidationError::EmptyField(SaleField::CustomerName))
        );
        assert_eq!(
            validate_sale(&input("Ana", "", "2", "0", "Shelly")),
            Err(ValidationError::EmptyField(SaleField::BeverageName))
        );
        assert_eq!(
            validate_sale(&input("Ana", "Tea", "2", "0", " ")),
            Err(ValidationError::EmptyField(SaleField::BeneficiaryName))
        );
    }

    #[test]
    fn price_must_be_positive() {
        assert_eq!(
            validate_sale(&input("Ana", "Tea", "-3", "0", "Shelly")),
            Err(ValidationError::NonPositive(SaleField::BeveragePrice))
        );
        assert_eq!(
            validate_sale(&input("Ana", "Tea", "0,00", "0", "Shelly")),
            Err(ValidationError::NonPositive(SaleField::BeveragePrice))
        );
    }

    #[test]
    fn donation_must_not_be_negative() {
        assert_eq!(
            validate_sale(&input("Ana", "Tea", "2", "-0.01", "Shelly")),
            Err(ValidationError::Negative(SaleField::DonationAmount))
        );
    }

    #[test]
    fn unparseable_amounts_are_non_numeric() {
        for raw in ["", "abc", "1.2.3", "1,2,3", "NaN", "inf", "R$ 5"] {
            assert_eq!(
                parse_amount(SaleField::BeveragePrice, raw),
                Err(ValidationError::NonNumeric(SaleField::BeveragePrice)),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn text_fields_are_checked_before_amounts() {
        let result = validate_sale(&input("Ana", "Tea", "abc", "-1", ""));

        assert_eq!(
            result,
            Err(ValidationError::EmptyField(SaleField::BeneficiaryName))
        );
    }

    #[test]
    fn price_is_checked_before_donation() {
        let result = validate_sale(&input("Ana", "Tea", "x", "y", "Shelly"));

        assert_eq!(
            result,
            Err(ValidationError::NonNumeric(SaleField::BeveragePrice))
        );
    }

    #[test]
    fn error_messages_name_the_field() {
        assert_eq!(
            ValidationError::NonPositive(SaleField::BeveragePrice).to_string(),
            "Beverage price must be greater than zero."
        );
        assert_eq!(
            ValidationError::EmptyField(SaleField::CustomerName).to_string(),
            "Customer name is required."
        );
    }
}
