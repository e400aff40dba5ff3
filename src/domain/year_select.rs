use chrono::{Datelike, NaiveDate};

pub const DEFAULT_LABEL: &str = "Selecione o ano";
pub const DEFAULT_PLACEHOLDER: &str = "Selecione um ano";

/// How many years the selector offers, counting the current one.
const YEARS_OFFERED: i32 = 4;

#[derive(Debug, Clone)]
pub struct YearSelect {
    label: String,
    placeholder: String,
    selected: Option<i32>,
}

impl Default for YearSelect {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL, DEFAULT_PLACEHOLDER)
    }
}

impl YearSelect {
    pub fn new(label: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            placeholder: placeholder.into(),
            selected: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn selected(&self) -> Option<i32> {
        self.selected
    }

    /// The current year and the three before it, newest first.
    pub fn years(today: NaiveDate) -> Vec<i32> {
        let current = today.year();
        (0..YEARS_OFFERED).map(|offset| current - offset).collect()
    }

    /// Records the choice and returns it for the host to act on. Any year is
    /// accepted.
    pub fn choose(&mut self, year: i32) -> i32 {
        self.selected = Some(year);
        year
    }

    pub fn display_text(&self) -> String {
        match self.selected {
            Some(year) => year.to_string(),
            None => self.placeholder.clone(),
        }
    }
}
