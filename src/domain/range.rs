use super::date_range::{BoundWindow, compute_invalid_range};
use super::picker::SelectionChange;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    Start,
    End,
}

impl Endpoint {
    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Start => "Data Início",
            Endpoint::End => "Data Fim",
        }
    }
}

/// Start and end selections of a range page.
///
/// This is the single owner of both dates. Each picker's bounds are derived
/// from it on demand, so there is never a stale copy of the sibling's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangePair {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl RangePair {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn get(&self, endpoint: Endpoint) -> Option<NaiveDate> {
        match endpoint {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }

    /// The start may not pass the end; the end may not precede the start.
    pub fn bounds_for(&self, endpoint: Endpoint) -> BoundWindow {
        match endpoint {
            Endpoint::Start => BoundWindow::at_most(self.end),
            Endpoint::End => BoundWindow::at_least(self.start),
        }
    }

    pub fn apply(&mut self, endpoint: Endpoint, change: SelectionChange) {
        let value = change.into_selection();
        match endpoint {
            Endpoint::Start => self.start = value,
            Endpoint::End => self.end = value,
        }
    }

    pub fn is_invalid_range(&self) -> bool {
        compute_invalid_range(self.start, self.end)
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Inclusive day count, when both ends are set and ordered.
    pub fn len_days(&self) -> Option<i64> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start <= end => Some((end - start).num_days() + 1),
            _ => None,
        }
    }
}
