use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::commands::PendingRemoval;
use crate::models::{SaleField, SaleInput};

/// Editable state of the "register sale" form.
#[derive(Default, Clone, Debug)]
pub(crate) struct SaleForm {
    pub(crate) input: SaleInput,
    pub(crate) active: SaleField,
}

impl SaleForm {
    /// Switch focus to a particular field.
    pub(crate) fn focus(&mut self, field: SaleField) {
        self.active = field;
    }

    pub(crate) fn next_field(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = self.active.previous();
    }

    pub(crate) fn value(&self, field: SaleField) -> &str {
        match field {
            SaleField::CustomerName => &self.input.customer_name,
            SaleField::BeverageName => &self.input.beverage_name,
            SaleField::BeveragePrice => &self.input.beverage_price,
            SaleField::DonationAmount => &self.input.donation_amount,
            SaleField::BeneficiaryName => &self.input.beneficiary_name,
        }
    }

    fn value_mut(&mut self, field: SaleField) -> &mut String {
        match field {
            SaleField::CustomerName => &mut self.input.customer_name,
            SaleField::BeverageName => &mut self.input.beverage_name,
            SaleField::BeveragePrice => &mut self.input.beverage_price,
            SaleField::DonationAmount => &mut self.input.donation_amount,
            SaleField::BeneficiaryName => &mut self.input.beneficiary_name,
        }
    }

    /// Append a character to the active field. Control characters are
    /// ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value_mut(self.active).push(ch);
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        self.value_mut(self.active).pop();
    }

    /// Empty every field and return focus to the first one.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    /// Render a single labelled line for the form widget.
    pub(crate) fn build_line(&self, field: SaleField, label_width: usize) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let placeholder = match field {
            SaleField::BeveragePrice => "<e.g. 5,50>",
            SaleField::DonationAmount => "<0 or more>",
            _ => "<required>",
        };
        let display = if value.is_empty() {
            placeholder.to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(field_prefix(field, label_width)),
            Span::styled(display, style),
        ])
    }

    /// Character length of the requested field.
    pub(crate) fn value_len(&self, field: SaleField) -> usize {
        self.value(field).chars().count()
    }
}

/// `"Label:   "` padded so every value starts in the same column.
pub(crate) fn field_prefix(field: SaleField, label_width: usize) -> String {
    format!("{:<width$}", format!("{}:", field.label()), width = label_width + 2)
}

/// Widest field label, used to line the inputs up.
pub(crate) fn label_width() -> usize {
    SaleField::ALL
        .iter()
        .map(|field| field.label().chars().count())
        .max()
        .unwrap_or(0)
}

/// State for confirming the removal of one sale.
#[derive(Clone, Debug)]
pub(crate) struct ConfirmRemove {
    pub(crate) pending: PendingRemoval,
}

/// Severity of a modal notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum NoticeKind {
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    pub(crate) fn title(self) -> &'static str {
        match self {
            NoticeKind::Info => "Success",
            NoticeKind::Warning => "Warning",
            NoticeKind::Error => "Error",
        }
    }

    pub(crate) fn style(self) -> Style {
        match self {
            NoticeKind::Info => Style::default().fg(Color::Green),
            NoticeKind::Warning => Style::default().fg(Color::Yellow),
            NoticeKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// A modal message that stays up until the user dismisses it.
#[derive(Clone, Debug)]
pub(crate) struct Notice {
    pub(crate) kind: NoticeKind,
    pub(crate) message: String,
}

impl Notice {
    pub(crate) fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_goes_to_the_active_field() {
        let mut form = SaleForm::default();
        for ch in "Ana".chars() {
            form.push_char(ch);
        }
        form.next_field();
        form.push_char('T');
        form.focus(SaleField::DonationAmount);
        form.push_char('1');
        form.push_char(',');
        form.push_char('5');
        form.backspace();

        assert_eq!(form.input.customer_name, "Ana");
        assert_eq!(form.input.beverage_name, "T");
        assert_eq!(form.input.donation_amount, "1,");
    }

    #[test]
    fn control_characters_are_ignored() {
        let mut form = SaleForm::default();

        assert!(!form.push_char('\n'));
        assert!(form.input.customer_name.is_empty());
    }

    #[test]
    fn field_focus_wraps_around() {
        let mut form = SaleForm::default();

        form.previous_field();
        assert_eq!(form.active, SaleField::BeneficiaryName);
        form.next_field();
        assert_eq!(form.active, SaleField::CustomerName);
    }

    #[test]
    fn clear_resets_values_and_focus() {
        let mut form = SaleForm::default();
        form.focus(SaleField::BeveragePrice);
        form.push_char('9');

        form.clear();

        assert_eq!(form.input, SaleInput::default());
        assert_eq!(form.active, SaleField::CustomerName);
    }

    #[test]
    fn prefixes_line_up() {
        let width = label_width();

        let lengths: Vec<usize> = SaleField::ALL
            .iter()
            .map(|field| field_prefix(*field, width).chars().count())
            .collect();

        assert!(lengths.iter().all(|len| *len == width + 2));
    }
}
