use crate::application::{PickerApp, RangeOutcome, check_terminal};
use crate::domain::{DISPLAY_FORMAT, DatePicker, RangePair, is_supported_year};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rangepicker")]
#[command(about = "Terminal date-range picker, year selector and period form")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick a start and end date (default)
    Range {
        /// Initial start date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(short, long, value_parser = parse_date)]
        start: Option<NaiveDate>,
        /// Initial end date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(short, long, value_parser = parse_date)]
        end: Option<NaiveDate>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Collect period lengths in days
    Periods {
        /// Print the saved list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check that the terminal supports the interactive pages
    CheckTerminal,
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        let cli = Self::parse();

        match cli.command {
            Some(Commands::CheckTerminal) => {
                check_terminal()?;
            }
            Some(Commands::Periods { json }) => {
                let mut app = PickerApp::new();
                let saved = app.run_period_page()?;
                if json {
                    println!("{}", serde_json::to_string(&saved)?);
                } else {
                    match saved {
                        Some(periods) => println!("Períodos salvos: {:?}", periods),
                        None => println!("Nenhum período salvo"),
                    }
                }
            }
            Some(Commands::Range { start, end, json }) => {
                let mut app = PickerApp::new();
                let outcome = app.run_range_page(RangePair::new(start, end))?;
                print_range(&outcome, json)?;
            }
            None => {
                let mut app = PickerApp::new();
                let outcome = app.run_range_page(RangePair::default())?;
                print_range(&outcome, false)?;
            }
        }

        Ok(())
    }
}

fn print_range(outcome: &RangeOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    println!(
        "{} - {}",
        DatePicker::display_text(outcome.start),
        DatePicker::display_text(outcome.end)
    );
    if outcome.invalid {
        println!("Intervalo inválido: início após o fim");
    }
    if let Some(year) = outcome.year {
        println!("Ano: {}", year);
    }
    Ok(())
}

/// Accepts ISO dates and the day-first format shown by the pickers.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, DISPLAY_FORMAT))
        .ok()
        .filter(|date| is_supported_year(date.year()))
        .ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD or DD/MM/YYYY", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_both_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(parse_date("2025-03-07"), Ok(expected));
        assert_eq!(parse_date("07/03/2025"), Ok(expected));
        assert!(parse_date("2025-13-01").is_err());
        assert!(parse_date("tomorrow").is_err());
        assert!(parse_date("+262143-12-31").is_err());
    }

    #[test]
    fn range_arguments() {
        let cli = Cli::try_parse_from(["rangepicker", "range", "-s", "2025-01-01", "--end", "31/01/2025", "--json"])
            .unwrap();
        match cli.command {
            Some(Commands::Range { start, end, json }) => {
                assert_eq!(start, NaiveDate::from_ymd_opt(2025, 1, 1));
                assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 31));
                assert!(json);
            }
            _ => panic!("expected range command"),
        }
    }

    #[test]
    fn no_subcommand_defaults_to_range_page() {
        let cli = Cli::try_parse_from(["rangepicker"]).unwrap();
        assert!(cli.command.is_none());
    }
}
