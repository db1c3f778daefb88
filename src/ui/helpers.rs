use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::error::CommandError;

use super::forms::{Notice, NoticeKind};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Turn a failed command into the dialog the user gets to see. A missing
/// selection, or a change that was saved while the table went stale, is only
/// a warning. Storage problems get a generic lead-in so the low-level detail
/// reads as context.
pub(crate) fn notice_for(action: &str, err: &CommandError) -> Notice {
    match err {
        CommandError::NoSelection => Notice::new(NoticeKind::Warning, err.to_string()),
        CommandError::Validation(inner) => Notice::new(NoticeKind::Error, inner.to_string()),
        CommandError::StaleView(_) => Notice::new(NoticeKind::Warning, err.to_string()),
        CommandError::Storage(inner) => Notice::new(
            NoticeKind::Error,
            format!("Something went wrong while trying to {action}: {inner}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::models::SaleField;

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);

        let popup = centered_rect(60, 50, area);

        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert!(popup.x >= area.x && popup.right() <= area.right());
    }

    #[test]
    fn missing_selection_is_a_warning() {
        let notice = notice_for("remove the record", &CommandError::NoSelection);

        assert_eq!(notice.kind, NoticeKind::Warning);
    }

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = CommandError::Validation(ValidationError::Negative(SaleField::DonationAmount));

        let notice = notice_for("register the sale", &err);

        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Donation amount cannot be negative.");
    }
}
