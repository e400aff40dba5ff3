use crate::infrastructure::{PageEvent, PageHook};
use anyhow::Result;

/// Writes every page event to the log.
pub struct SimpleLoggerHook;

impl PageHook for SimpleLoggerHook {
    fn on_event(&self, event: &PageEvent) -> Result<()> {
        match event {
            PageEvent::RangeChanged {
                start,
                end,
                invalid,
            } => {
                log::info!(
                    "Intervalo: {} - {}{}",
                    fmt_date(*start),
                    fmt_date(*end),
                    if *invalid { " (inválido)" } else { "" }
                );
            }
            PageEvent::YearSelected { year } => {
                log::info!("Ano selecionado: {}", year);
            }
            PageEvent::PeriodsSaved { periods } => {
                log::info!("Períodos salvos: {:?}", periods);
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Simple Logger"
    }
}

fn fmt_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}
