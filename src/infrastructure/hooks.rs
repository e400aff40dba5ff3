use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

/// Something a page reports to the outside world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PageEvent {
    RangeChanged {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        invalid: bool,
    },
    YearSelected {
        year: i32,
    },
    PeriodsSaved {
        periods: Vec<u32>,
    },
}

/// Trait for plugins that observe page events
pub trait PageHook: Send + Sync {
    fn on_event(&self, event: &PageEvent) -> Result<()>;

    /// Human-readable name for this hook
    fn name(&self) -> &str;
}

/// Registry for managing page hooks
pub struct HookRegistry {
    hooks: Vec<Box<dyn PageHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a new hook
    pub fn register<H>(&mut self, hook: H)
    where
        H: PageHook + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Deliver an event to every hook. A failing hook is logged and skipped.
    pub fn dispatch(&self, event: &PageEvent) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_event(event) {
                log::warn!("hook '{}' failed: {}", hook.name(), e);
            }
        }
    }

    /// List all registered hooks
    pub fn list_hooks(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub mod test_hooks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Hook that remembers every event it sees.
    #[derive(Clone, Default)]
    pub struct RecordingHook {
        pub events: Arc<Mutex<Vec<PageEvent>>>,
    }

    impl RecordingHook {
        pub fn recorded(&self) -> Vec<PageEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl PageHook for RecordingHook {
        fn on_event(&self, event: &PageEvent) -> Result<()> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }

        fn name(&self) -> &str {
            "Recording"
        }
    }

    pub struct FailingHook;

    impl PageHook for FailingHook {
        fn on_event(&self, _event: &PageEvent) -> Result<()> {
            anyhow::bail!("always fails")
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_hooks::*;
    use super::*;

    #[test]
    fn failing_hook_does_not_stop_others() {
        let recorder = RecordingHook::default();
        let mut registry = HookRegistry::new();
        registry.register(FailingHook);
        registry.register(recorder.clone());

        registry.dispatch(&PageEvent::YearSelected { year: 2025 });

        assert_eq!(registry.list_hooks(), vec!["Failing", "Recording"]);
        assert_eq!(recorder.recorded(), vec![PageEvent::YearSelected { year: 2025 }]);
    }

    #[test]
    fn events_serialize_with_tag() {
        let event = PageEvent::RangeChanged {
            start: NaiveDate::from_ymd_opt(2025, 1, 2),
            end: None,
            invalid: false,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "range_changed");
        assert_eq!(json["start"], "2025-01-02");
        assert!(json["end"].is_null());
    }
}
