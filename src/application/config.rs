use crate::domain::{DEFAULT_FALLBACK_YEAR, MIN_FALLBACK_YEAR};
use chrono::{Datelike, Local};
use std::path::PathBuf;

pub struct Config {
    pub data_dir: PathBuf,
    pub theme: String,
    pub fallback_year: i32,
    /// `env_logger` filter string, e.g. `info` or `rangepicker=debug`.
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), Local::now().year())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>, current_year: i32) -> Self {
        let data_dir = lookup("RANGEPICKER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_local_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("rangepicker")
            });

        let theme = lookup("RANGEPICKER_THEME").unwrap_or_else(|| "dark".to_string());

        let fallback_year = lookup("RANGEPICKER_FALLBACK_YEAR")
            .and_then(|raw| raw.trim().parse::<i32>().ok())
            .filter(|year| (MIN_FALLBACK_YEAR..=current_year).contains(year))
            .unwrap_or(DEFAULT_FALLBACK_YEAR);

        let log_filter = lookup("RANGEPICKER_LOG")
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        Self {
            data_dir,
            theme,
            fallback_year,
            log_filter,
        }
    }
}
