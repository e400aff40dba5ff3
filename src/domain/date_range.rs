use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Lower year of the quick-jump list when no minimum date is given.
pub const DEFAULT_FALLBACK_YEAR: i32 = 2024;

/// Oldest configurable fallback year.
pub const MIN_FALLBACK_YEAR: i32 = 1900;

/// Inclusive `[min, max]` window of selectable dates. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundWindow {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

impl BoundWindow {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn new(min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        Self { min, max }
    }

    pub fn at_least(min: Option<NaiveDate>) -> Self {
        Self { min, max: None }
    }

    pub fn at_most(max: Option<NaiveDate>) -> Self {
        Self { min: None, max }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let above_min = self.min.is_none_or(|min| date >= min);
        let below_max = self.max.is_none_or(|max| date <= max);
        above_min && below_max
    }

    /// Whether `month0` (0-based) of `year` is offered by the month dropdown.
    ///
    /// Only the boundary years restrict months; every other year keeps all
    /// twelve enabled even if the year itself is out of the window.
    pub fn is_month_allowed(&self, year: i32, month0: u32) -> bool {
        if let Some(min) = self.min {
            if year == min.year() && month0 < min.month0() {
                return false;
            }
        }
        if let Some(max) = self.max {
            if year == max.year() && month0 > max.month0() {
                return false;
            }
        }
        true
    }

    pub fn is_year_allowed(&self, year: i32) -> bool {
        let above_min = self.min.is_none_or(|min| year >= min.year());
        let below_max = self.max.is_none_or(|max| year <= max.year());
        above_min && below_max
    }

    /// Whether any day of the given month lies inside the window.
    pub fn overlaps_month(&self, year: i32, month0: u32) -> bool {
        let Some(first) = NaiveDate::from_ymd_opt(year, month0 + 1, 1) else {
            return false;
        };
        let last = last_day_of_month(year, month0 + 1).unwrap_or(first);
        let starts_before_max = self.max.is_none_or(|max| first <= max);
        let ends_after_min = self.min.is_none_or(|min| last >= min);
        starts_before_max && ends_after_min
    }

    /// `(lower, upper)` years of the quick-jump list.
    pub fn year_span(&self, today: NaiveDate, fallback_year: i32) -> (i32, i32) {
        let lower = self.min.map(|d| d.year()).unwrap_or(fallback_year);
        let upper = self.max.map(|d| d.year()).unwrap_or(today.year());
        (lower, upper)
    }
}

/// True iff both endpoints are set and the start falls after the end.
pub fn compute_invalid_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => start > end,
        _ => false,
    }
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next?.pred_opt()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    last_day_of_month(year, month).map(|d| d.day()).unwrap_or(28)
}
