use crate::application::Config;
use crate::application::tui::{PeriodView, RangeView, TerminalSession, Theme};
use crate::domain::RangePair;
use crate::infrastructure::{HookRegistry, SimpleLoggerHook, init_logging};
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// What a range page session ended with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeOutcome {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub invalid: bool,
    pub year: Option<i32>,
}

pub struct PickerApp {
    config: Config,
    hooks: HookRegistry,
    today: NaiveDate,
}

impl PickerApp {
    pub fn new() -> Self {
        Self::with_default_plugins()
    }

    pub fn with_default_plugins() -> Self {
        let config = Config::from_env();

        match init_logging(&config.data_dir, &config.log_filter) {
            Ok(path) => log::info!("rangepicker started, logging to {}", path.display()),
            // Not fatal: the pages work without a log file
            Err(e) => eprintln!("Warning: logging disabled: {:#}", e),
        }

        let mut hooks = HookRegistry::new();
        hooks.register(SimpleLoggerHook);

        Self::with_hooks(config, hooks)
    }

    pub fn with_hooks(config: Config, hooks: HookRegistry) -> Self {
        Self {
            config,
            hooks,
            today: Local::now().date_naive(),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::by_name(&self.config.theme)
    }

    pub fn run_range_page(&mut self, initial: RangePair) -> anyhow::Result<RangeOutcome> {
        if initial.is_invalid_range() {
            log::warn!("starting with an inverted range: {:?}", initial);
        }

        let mut view = RangeView::new(
            initial,
            self.today,
            self.config.fallback_year,
            self.theme(),
            &self.hooks,
        );
        {
            let mut session = TerminalSession::new()?;
            session.run(&mut view)?;
        }

        let range = view.range();
        Ok(RangeOutcome {
            start: range.start,
            end: range.end,
            invalid: range.is_invalid_range(),
            year: view.selected_year(),
        })
    }

    /// Returns the last list saved during the session, if any.
    pub fn run_period_page(&mut self) -> anyhow::Result<Option<Vec<u32>>> {
        let mut view = PeriodView::new(self.theme(), &self.hooks);
        {
            let mut session = TerminalSession::new()?;
            session.run(&mut view)?;
        }
        Ok(view.last_saved().map(<[u32]>::to_vec))
    }
}
