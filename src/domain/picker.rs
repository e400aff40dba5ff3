use super::calendar::{DisplayedMonth, MONTH_NAMES, Week, month_grid};
use super::date_range::BoundWindow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";
pub const PLACEHOLDER: &str = "dd/mm/aaaa";
pub const INVALID_RANGE_MESSAGE: &str = "Data inválida! Verifique o intervalo selecionado.";

/// What the picker asks its host to do with the selection it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionChange {
    Set(NaiveDate),
    Cleared,
}

impl SelectionChange {
    pub fn into_selection(self) -> Option<NaiveDate> {
        match self {
            SelectionChange::Set(date) => Some(date),
            SelectionChange::Cleared => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthOption {
    pub index: u32,
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearOption {
    pub year: i32,
    pub disabled: bool,
}

/// Single-date picker with a popover calendar.
///
/// The selected date is not stored here: the host passes it in and applies
/// the [`SelectionChange`] values returned by [`DatePicker::select`] and
/// [`DatePicker::clear`]. The picker only owns the popover state and the
/// displayed month.
#[derive(Debug, Clone)]
pub struct DatePicker {
    label: String,
    open: bool,
    displayed: DisplayedMonth,
}

impl DatePicker {
    pub fn new(label: impl Into<String>, selection: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            label: label.into(),
            open: false,
            displayed: DisplayedMonth::from_date(selection.unwrap_or(today)),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn displayed(&self) -> DisplayedMonth {
        self.displayed
    }

    /// Opens the popover, showing the month of the current selection if any.
    pub fn open(&mut self, selection: Option<NaiveDate>) {
        if let Some(date) = selection {
            self.displayed = DisplayedMonth::from_date(date);
        }
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self, selection: Option<NaiveDate>) {
        if self.open {
            self.close();
        } else {
            self.open(selection);
        }
    }

    /// Handles a pick from the calendar.
    ///
    /// `None` always clears. A date outside `bounds` is ignored and the
    /// popover stays open; a valid date is handed back and the popover closes.
    pub fn select(
        &mut self,
        date: Option<NaiveDate>,
        bounds: &BoundWindow,
    ) -> Option<SelectionChange> {
        let Some(date) = date else {
            return Some(SelectionChange::Cleared);
        };

        if !bounds.contains(date) {
            log::debug!("{}: ignoring {} outside of {:?}", self.label, date, bounds);
            return None;
        }

        self.open = false;
        Some(SelectionChange::Set(date))
    }

    /// The clear control ignores bounds.
    pub fn clear(&self) -> SelectionChange {
        SelectionChange::Cleared
    }

    pub fn change_month(&mut self, month0: u32) {
        self.displayed = self.displayed.with_month(month0);
    }

    pub fn change_year(&mut self, year: i32) {
        self.displayed = self.displayed.with_year(year);
    }

    /// Moves the calendar to `displayed` directly, e.g. when keyboard focus
    /// walks off the edge of the grid.
    pub fn show_month(&mut self, displayed: DisplayedMonth) {
        self.displayed = displayed;
    }

    pub fn can_go_previous(&self, bounds: &BoundWindow) -> bool {
        let target = self.displayed.previous();
        bounds.overlaps_month(target.year(), target.month0())
    }

    pub fn can_go_next(&self, bounds: &BoundWindow) -> bool {
        let target = self.displayed.next();
        bounds.overlaps_month(target.year(), target.month0())
    }

    /// Steps back one month unless that month lies entirely before `bounds`.
    pub fn previous_month(&mut self, bounds: &BoundWindow) -> bool {
        if !self.can_go_previous(bounds) {
            return false;
        }
        self.displayed = self.displayed.previous();
        true
    }

    pub fn next_month(&mut self, bounds: &BoundWindow) -> bool {
        if !self.can_go_next(bounds) {
            return false;
        }
        self.displayed = self.displayed.next();
        true
    }

    pub fn month_options(&self, bounds: &BoundWindow) -> Vec<MonthOption> {
        let year = self.displayed.year();
        MONTH_NAMES
            .iter()
            .enumerate()
            .map(|(index, &label)| {
                let index = index as u32;
                MonthOption {
                    index,
                    label,
                    disabled: !bounds.is_month_allowed(year, index),
                }
            })
            .collect()
    }

    /// Years for the quick-jump dropdown, newest first.
    pub fn year_options(
        &self,
        bounds: &BoundWindow,
        today: NaiveDate,
        fallback_year: i32,
    ) -> Vec<YearOption> {
        let (lower, upper) = bounds.year_span(today, fallback_year);
        (lower..=upper)
            .rev()
            .map(|year| YearOption {
                year,
                disabled: !bounds.is_year_allowed(year),
            })
            .collect()
    }

    pub fn grid(
        &self,
        selection: Option<NaiveDate>,
        bounds: &BoundWindow,
        today: NaiveDate,
    ) -> Vec<Week> {
        month_grid(self.displayed, bounds, selection, today)
    }

    pub fn display_text(selection: Option<NaiveDate>) -> String {
        match selection {
            Some(date) => date.format(DISPLAY_FORMAT).to_string(),
            None => PLACEHOLDER.to_string(),
        }
    }
}
