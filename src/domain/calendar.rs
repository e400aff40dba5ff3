use super::date_range::{BoundWindow, days_in_month};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Column headers, Sunday first.
pub const WEEKDAY_HEADERS: [&str; 7] = ["dom", "seg", "ter", "qua", "qui", "sex", "sáb"];

/// Navigation position of a calendar grid.
///
/// The day is kept as given and only clamped when a concrete date is needed,
/// so jumping Jan 31 -> Feb -> Mar lands back on the 31st.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayedMonth {
    year: i32,
    month0: u32,
    day: u32,
}

impl DisplayedMonth {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
            day: date.day(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 0-based month index.
    pub fn month0(&self) -> u32 {
        self.month0
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Replaces the month, keeping year and day. Indexes past 11 are ignored.
    pub fn with_month(self, month0: u32) -> Self {
        if month0 > 11 {
            return self;
        }
        Self { month0, ..self }
    }

    /// Replaces the year, keeping month and day. Years whose grid would run
    /// past chrono's supported dates are ignored.
    pub fn with_year(self, year: i32) -> Self {
        if !is_supported_year(year) {
            return self;
        }
        Self { year, ..self }
    }

    pub fn next(self) -> Self {
        if self.month0 == 11 {
            if !is_supported_year(self.year + 1) {
                return self;
            }
            Self {
                year: self.year + 1,
                month0: 0,
                ..self
            }
        } else {
            Self {
                month0: self.month0 + 1,
                ..self
            }
        }
    }

    pub fn previous(self) -> Self {
        if self.month0 == 0 {
            if !is_supported_year(self.year - 1) {
                return self;
            }
            Self {
                year: self.year - 1,
                month0: 11,
                ..self
            }
        } else {
            Self {
                month0: self.month0 - 1,
                ..self
            }
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The stored day clamped into this month.
    pub fn anchor(&self) -> NaiveDate {
        let day = self.day.clamp(1, days_in_month(self.year, self.month0 + 1));
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, day).unwrap_or_else(|| self.first_day())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month0 as usize]
    }
}

/// Whether a whole padded grid of any month of `year` fits in `NaiveDate`.
pub fn is_supported_year(year: i32) -> bool {
    let before = year
        .checked_sub(1)
        .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1));
    let after = year
        .checked_add(1)
        .and_then(|y| NaiveDate::from_ymd_opt(y, 12, 31));
    before.is_some() && after.is_some()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Belongs to the previous or next month.
    pub outside: bool,
    pub disabled: bool,
    pub selected: bool,
    pub today: bool,
}

pub type Week = [DayCell; 7];

/// Sunday-first weeks covering the displayed month, padded with outside days.
pub fn month_grid(
    displayed: DisplayedMonth,
    bounds: &BoundWindow,
    selection: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<Week> {
    let first = displayed.first_day();
    let start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);

    let mut weeks = Vec::with_capacity(6);
    let mut cursor = start;
    loop {
        let week: Week = std::array::from_fn(|offset| {
            let date = cursor + Duration::days(offset as i64);
            DayCell {
                date,
                outside: !displayed.contains(date),
                disabled: !bounds.contains(date),
                selected: selection == Some(date),
                today: date == today,
            }
        });
        weeks.push(week);
        cursor += Duration::days(7);
        if !displayed.contains(cursor) {
            break;
        }
    }
    weeks
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
