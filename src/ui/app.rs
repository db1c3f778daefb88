use std::mem;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::commands::{clear_all, confirm_removal, register_sale, request_removal};
use crate::error::CommandError;
use crate::models::SaleField;
use crate::view::{SalesTable, COLUMN_TITLES};

use super::forms::{field_prefix, label_width, ConfirmRemove, Notice, NoticeKind, SaleForm};
use super::helpers::{centered_rect, notice_for};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Five inputs, one hint line and the border.
const FORM_HEIGHT: u16 = 8;
/// Rows moved by PageUp / PageDown.
const PAGE_STEP: isize = 10;

/// Which half of the screen receives plain key presses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Focus {
    Form,
    Table,
}

/// Modal state layered on top of the main screen.
enum Mode {
    Normal,
    ConfirmRemove(ConfirmRemove),
    ConfirmClear,
    Notice(Notice),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: NoticeKind,
}

/// Central application state: the store connection, the form being typed
/// into, the table mirroring the store and whatever dialog is open.
pub struct App {
    conn: Connection,
    form: SaleForm,
    table: SalesTable,
    focus: Focus,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Build the app around an open store and an already refreshed table.
    pub fn new(conn: Connection, table: SalesTable) -> Self {
        Self {
            conn,
            form: SaleForm::default(),
            table,
            focus: Focus::Form,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Handle a plain key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::ConfirmRemove(confirm) => self.handle_confirm_remove(code, confirm),
            Mode::ConfirmClear => self.handle_confirm_clear(code),
            Mode::Notice(_) => Mode::Normal,
        };

        exit
    }

    /// Handle a key pressed together with Ctrl. These shortcuts mirror the
    /// three action buttons and work from either focus. Returns `true` on quit.
    pub fn handle_ctrl(&mut self, code: KeyCode) -> bool {
        if code == KeyCode::Char('c') {
            return true;
        }
        if !matches!(self.mode, Mode::Normal) {
            return false;
        }

        self.mode = match code {
            KeyCode::Char('r') => self.submit_sale(),
            KeyCode::Char('d') => self.begin_remove(),
            KeyCode::Char('x') => self.begin_clear(),
            _ => Mode::Normal,
        };
        false
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match self.focus {
            Focus::Form => match code {
                KeyCode::Esc => {
                    self.focus = Focus::Table;
                    if self.table.selected_index().is_none() {
                        self.table.select_first();
                    }
                }
                KeyCode::Tab | KeyCode::Down => self.form.next_field(),
                KeyCode::BackTab | KeyCode::Up => self.form.previous_field(),
                KeyCode::Backspace => self.form.backspace(),
                KeyCode::Enter => return self.submit_sale(),
                KeyCode::Char(ch) => {
                    if self.form.push_char(ch) {
                        self.clear_status();
                    }
                }
                _ => {}
            },
            Focus::Table => match code {
                KeyCode::Char('q') | KeyCode::Esc => *exit = true,
                KeyCode::Up => self.table.move_selection(-1),
                KeyCode::Down => self.table.move_selection(1),
                KeyCode::PageUp => self.table.move_selection(-PAGE_STEP),
                KeyCode::PageDown => self.table.move_selection(PAGE_STEP),
                KeyCode::Home => self.table.select_first(),
                KeyCode::End => self.table.select_last(),
                KeyCode::Char('-') | KeyCode::Delete => return self.begin_remove(),
                KeyCode::Char('c') | KeyCode::Char('C') => return self.begin_clear(),
                KeyCode::Tab | KeyCode::Enter | KeyCode::Char('a') | KeyCode::Char('A') => {
                    self.focus = Focus::Form;
                }
                _ => {}
            },
        }
        Mode::Normal
    }

    /// Register Sale: validate, store, refresh, then clear the form. If the
    /// sale was not stored the form keeps its contents and focus jumps to the
    /// bad field. A sale that was stored always clears the form, even when the
    /// table could not be reloaded, so it cannot be submitted twice.
    fn submit_sale(&mut self) -> Mode {
        match register_sale(&self.conn, &mut self.table, &self.form.input) {
            Ok(record) => {
                self.form.clear();
                self.set_status(
                    format!("Sale registered for {}.", record.customer_name),
                    NoticeKind::Info,
                );
                Mode::Normal
            }
            Err(err @ CommandError::StaleView(_)) => {
                self.form.clear();
                Mode::Notice(notice_for("register the sale", &err))
            }
            Err(err) => {
                if let CommandError::Validation(inner) = &err {
                    self.focus = Focus::Form;
                    self.form.focus(inner.field());
                }
                Mode::Notice(notice_for("register the sale", &err))
            }
        }
    }

    /// Remove Selected, first step: find the record behind the selection and
    /// ask before deleting it.
    fn begin_remove(&mut self) -> Mode {
        self.clear_status();
        match request_removal(&self.table) {
            Ok(pending) => Mode::ConfirmRemove(ConfirmRemove { pending }),
            Err(err) => Mode::Notice(notice_for("remove the record", &err)),
        }
    }

    fn begin_clear(&mut self) -> Mode {
        self.clear_status();
        Mode::ConfirmClear
    }

    fn handle_confirm_remove(&mut self, code: KeyCode, confirm: ConfirmRemove) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Removal cancelled.", NoticeKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match confirm_removal(&self.conn, &mut self.table, &confirm.pending) {
                    Ok(()) => {
                        self.set_status(
                            format!("Removed sale for {}.", confirm.pending.customer),
                            NoticeKind::Info,
                        );
                        Mode::Notice(Notice::new(
                            NoticeKind::Info,
                            "Record removed successfully!",
                        ))
                    }
                    Err(err) => Mode::Notice(notice_for("remove the record", &err)),
                }
            }
            _ => Mode::ConfirmRemove(confirm),
        }
    }

    fn handle_confirm_clear(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Clear cancelled.", NoticeKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match clear_all(&self.conn, &mut self.table) {
                    Ok(removed) => {
                        self.set_status(format!("Cleared {removed} records."), NoticeKind::Info);
                        Mode::Notice(Notice::new(
                            NoticeKind::Info,
                            "All records were cleared successfully!",
                        ))
                    }
                    Err(err) => Mode::Notice(notice_for("clear the records", &err)),
                }
            }
            _ => Mode::ConfirmClear,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FORM_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(footer_height),
            ])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_table(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::ConfirmRemove(confirm) => self.draw_confirm_remove(frame, area, confirm),
            Mode::ConfirmClear => self.draw_confirm_clear(frame, area),
            Mode::Notice(notice) => self.draw_notice(frame, area, notice),
            Mode::Normal => {}
        }
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Form && matches!(self.mode, Mode::Normal);
        let block = Block::default()
            .title(" Register New Sale and Donation ")
            .borders(Borders::ALL)
            .border_style(focus_style(focused));
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let width = label_width();
        let mut lines: Vec<Line> = SaleField::ALL
            .iter()
            .map(|field| self.form.build_line(*field, width))
            .collect();
        lines.push(Line::from(Span::styled(
            "Enter: Register Sale • Tab: next field • Esc: go to table",
            Style::default().fg(Color::Gray),
        )));

        frame.render_widget(Paragraph::new(lines), inner);

        if focused {
            let row = SaleField::ALL
                .iter()
                .position(|field| *field == self.form.active)
                .unwrap_or(0) as u16;
            let prefix = field_prefix(self.form.active, width).chars().count();
            let offset = prefix.saturating_add(self.form.value_len(self.form.active));
            if row < inner.height {
                frame.set_cursor_position((cursor_column(inner, offset), inner.y + row));
            }
        }
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Table && matches!(self.mode, Mode::Normal);
        let block = Block::default()
            .title(format!(" Sales ({}) ", self.table.len()))
            .borders(Borders::ALL)
            .border_style(focus_style(focused));

        let header = Row::new(COLUMN_TITLES.iter().map(|title| Cell::from(*title)))
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = self.table.rows().iter().map(|row| {
            let [customer, beverage, price, donation, beneficiary] = row.cells();
            Row::new(vec![
                Cell::from(customer.to_string()),
                Cell::from(beverage.to_string()),
                Cell::from(Line::from(price.to_string()).alignment(Alignment::Right)),
                Cell::from(Line::from(donation.to_string()).alignment(Alignment::Right)),
                Cell::from(beneficiary.to_string()),
            ])
        });

        let widths = [
            Constraint::Percentage(22),
            Constraint::Percentage(22),
            Constraint::Percentage(16),
            Constraint::Percentage(18),
            Constraint::Percentage(22),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(self.table.selected_index());
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.mode, self.focus) {
            (Mode::ConfirmRemove(_) | Mode::ConfirmClear, _) => Line::from(vec![
                Span::styled("[Y]", key_style),
                Span::raw(" Confirm   "),
                Span::styled("[N/Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Mode::Notice(_), _) => Line::from(vec![
                Span::styled("[Any key]", key_style),
                Span::raw(" Dismiss"),
            ]),
            (Mode::Normal, Focus::Form) => Line::from(vec![
                Span::styled("[Ctrl-R]", key_style),
                Span::raw(" Register Sale   "),
                Span::styled("[Ctrl-D]", key_style),
                Span::raw(" Remove Selected   "),
                Span::styled("[Ctrl-X]", key_style),
                Span::raw(" Clear All Records   "),
                Span::styled("[Ctrl-C]", key_style),
                Span::raw(" Quit"),
            ]),
            (Mode::Normal, Focus::Table) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[-]", key_style),
                Span::raw(" Remove Selected   "),
                Span::styled("[C]", key_style),
                Span::raw(" Clear All Records   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Form   "),
                Span::styled("[Q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_confirm_remove(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmRemove) {
        let lines = vec![
            Line::from(format!(
                "Are you sure you want to remove the sale for customer '{}'?",
                confirm.pending.customer
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];
        draw_dialog(frame, area, "Confirm Removal", lines);
    }

    fn draw_confirm_clear(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(format!(
                "Remove all {} sale and donation records?",
                self.table.len()
            )),
            Line::from(Span::styled(
                "This action cannot be undone.",
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];
        draw_dialog(frame, area, "Confirm Clear", lines);
    }

    fn draw_notice(&self, frame: &mut Frame, area: Rect, notice: &Notice) {
        let lines = vec![
            Line::from(Span::styled(notice.message.clone(), notice.kind.style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to continue.",
                Style::default().fg(Color::Gray),
            )),
        ];
        draw_dialog(frame, area, notice.kind.title(), lines);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: NoticeKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Column for a cursor `offset` characters into `inner`, pinned to its right
/// edge when the text is wider than the box.
fn cursor_column(inner: Rect, offset: usize) -> u16 {
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    inner.x.saturating_add(offset).min(inner.right())
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn draw_dialog(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'_>>) {
    let popup_area = centered_rect(60, 30, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}
