use super::picker_panel::{PANEL_HEIGHT, PANEL_WIDTH, PanelContext, PanelOutcome, PickerPanel};
use super::session::Screen;
use super::theme::Theme;
use super::year_panel::{YEAR_PANEL_HEIGHT, YearOutcome, YearPanel};
use crate::domain::{DatePicker, Endpoint, RangePair, SelectionChange, YearSelect};
use crate::infrastructure::{HookRegistry, PageEvent};
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

const YEAR_PANEL_WIDTH: u16 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFocus {
    Start,
    End,
    Year,
}

impl RangeFocus {
    fn next(self) -> Self {
        match self {
            RangeFocus::Start => RangeFocus::End,
            RangeFocus::End => RangeFocus::Year,
            RangeFocus::Year => RangeFocus::Start,
        }
    }

    fn previous(self) -> Self {
        match self {
            RangeFocus::Start => RangeFocus::Year,
            RangeFocus::End => RangeFocus::Start,
            RangeFocus::Year => RangeFocus::End,
        }
    }
}

/// The range page: start and end pickers bound to each other plus a year
/// selector.
///
/// The page is the only owner of the two dates. Bounds and the invalid-range
/// flag are derived from [`RangePair`] every time a panel needs them.
pub struct RangeView<'a> {
    pair: RangePair,
    start: PickerPanel,
    end: PickerPanel,
    years: YearPanel,
    focus: RangeFocus,
    today: NaiveDate,
    fallback_year: i32,
    show_help: bool,
    theme: Theme,
    hooks: &'a HookRegistry,
}

impl<'a> RangeView<'a> {
    pub fn new(
        initial: RangePair,
        today: NaiveDate,
        fallback_year: i32,
        theme: Theme,
        hooks: &'a HookRegistry,
    ) -> Self {
        Self {
            pair: initial,
            start: PickerPanel::new(Endpoint::Start, initial.start, today),
            end: PickerPanel::new(Endpoint::End, initial.end, today),
            years: YearPanel::new(YearSelect::new("Ano", "Selecione o ano"), today),
            focus: RangeFocus::Start,
            today,
            fallback_year,
            show_help: true,
            theme,
            hooks,
        }
    }

    pub fn range(&self) -> RangePair {
        self.pair
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.years.select().selected()
    }

    pub fn focus(&self) -> RangeFocus {
        self.focus
    }

    fn context(&self, endpoint: Endpoint) -> PanelContext {
        PanelContext {
            selection: self.pair.get(endpoint),
            bounds: self.pair.bounds_for(endpoint),
            show_error: self.pair.is_invalid_range(),
            today: self.today,
            fallback_year: self.fallback_year,
        }
    }

    fn panel(&self, endpoint: Endpoint) -> &PickerPanel {
        match endpoint {
            Endpoint::Start => &self.start,
            Endpoint::End => &self.end,
        }
    }

    fn panel_mut(&mut self, endpoint: Endpoint) -> &mut PickerPanel {
        match endpoint {
            Endpoint::Start => &mut self.start,
            Endpoint::End => &mut self.end,
        }
    }

    fn apply(&mut self, endpoint: Endpoint, change: SelectionChange) {
        self.pair.apply(endpoint, change);
        log::debug!("{:?} -> {:?}", endpoint, change);
        self.hooks.dispatch(&PageEvent::RangeChanged {
            start: self.pair.start,
            end: self.pair.end,
            invalid: self.pair.is_invalid_range(),
        });
    }

    fn focused_endpoint(&self) -> Option<Endpoint> {
        match self.focus {
            RangeFocus::Start => Some(Endpoint::Start),
            RangeFocus::End => Some(Endpoint::End),
            RangeFocus::Year => None,
        }
    }

    fn summary_line(&self) -> Line<'static> {
        let colors = &self.theme.colors;
        let text = format!(
            "{} → {}",
            DatePicker::display_text(self.pair.start),
            DatePicker::display_text(self.pair.end)
        );
        let mut spans = vec![Span::styled(text, Style::default().fg(colors.normal_text))];
        if let Some(days) = self.pair.len_days() {
            spans.push(Span::styled(
                format!("  ({} dias)", days),
                Style::default().fg(colors.help_text),
            ));
        }
        if self.pair.is_invalid_range() {
            spans.push(Span::styled(
                "  intervalo inválido",
                Style::default().fg(colors.error_text),
            ));
        }
        Line::from(spans).alignment(Alignment::Center)
    }

    fn help_lines(&self) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                "Tab=Campo • Enter=Abrir/Escolher • x=Limpar • ?=Ajuda • q=Sair",
                self.theme.help(),
            )),
            Line::from(Span::styled(
                "Calendário: ←→↑↓/hjkl=Dia • PgUp/PgDn=Mês • t=Hoje • Tab=Mês/Ano • Esc=Fechar",
                self.theme.help(),
            )),
        ]
    }
}

impl Screen for RangeView<'_> {
    fn draw(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),            // title
                Constraint::Length(PANEL_HEIGHT), // widgets
                Constraint::Min(0),               // popover room
                Constraint::Length(1),            // summary
                Constraint::Length(if self.show_help { 2 } else { 0 }),
            ])
            .split(size);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Intervalo de datas",
                self.theme.header(),
            )))
            .alignment(Alignment::Center),
            rows[0],
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .spacing(2)
            .constraints([
                Constraint::Length(PANEL_WIDTH),
                Constraint::Length(PANEL_WIDTH),
                Constraint::Length(YEAR_PANEL_WIDTH),
                Constraint::Min(0),
            ])
            .split(rows[1]);

        let panels = [(Endpoint::Start, columns[0]), (Endpoint::End, columns[1])];
        for (endpoint, area) in panels {
            let ctx = self.context(endpoint);
            let focused = self.focused_endpoint() == Some(endpoint);
            self.panel(endpoint)
                .render(frame, area, &ctx, &self.theme, focused);
        }

        let year_area = Rect {
            height: YEAR_PANEL_HEIGHT.min(columns[2].height),
            ..columns[2]
        };
        self.years
            .render(frame, year_area, &self.theme, self.focus == RangeFocus::Year);

        frame.render_widget(Paragraph::new(self.summary_line()), rows[3]);
        if self.show_help {
            frame.render_widget(
                Paragraph::new(self.help_lines()).alignment(Alignment::Center),
                rows[4],
            );
        }

        // Popovers last so they sit on top
        for (endpoint, anchor) in panels {
            let panel = self.panel(endpoint);
            if panel.is_open() {
                let ctx = self.context(endpoint);
                let area = panel.popover_area(anchor, size, &ctx);
                panel.render_popover(frame, area, &ctx, &self.theme);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            return false;
        }

        match self.focused_endpoint() {
            Some(endpoint) => {
                let ctx = self.context(endpoint);
                match self.panel_mut(endpoint).handle_key(key, &ctx) {
                    PanelOutcome::Changed(change) => {
                        self.apply(endpoint, change);
                        return true;
                    }
                    PanelOutcome::Handled => return true,
                    PanelOutcome::Ignored => {}
                }
            }
            None => match self.years.handle_key(key) {
                YearOutcome::Chosen(year) => {
                    self.hooks.dispatch(&PageEvent::YearSelected { year });
                    return true;
                }
                YearOutcome::Handled => return true,
                YearOutcome::Ignored => {}
            },
        }

        match key.code {
            KeyCode::Tab | KeyCode::Right => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Left => self.focus = self.focus.previous(),
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Char('q') | KeyCode::Esc => return false,
            _ => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_hooks::RecordingHook;
    use ratatui::{Terminal, backend::TestBackend};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn today() -> NaiveDate {
        date(2026, 10, 18)
    }

    fn press(view: &mut RangeView, codes: &[KeyCode]) {
        for code in codes {
            assert!(view.handle_key(key(*code)), "{code:?} exited the page");
        }
    }

    #[test]
    fn picking_start_then_end_notifies_hooks() {
        let recorder = RecordingHook::default();
        let mut hooks = HookRegistry::new();
        hooks.register(recorder.clone());
        let mut view = RangeView::new(RangePair::default(), today(), 2024, Theme::default(), &hooks);

        // start: today
        press(&mut view, &[KeyCode::Enter, KeyCode::Enter]);
        // end: three days later
        press(
            &mut view,
            &[KeyCode::Tab, KeyCode::Enter, KeyCode::Right, KeyCode::Right, KeyCode::Right, KeyCode::Enter],
        );

        assert_eq!(view.range(), RangePair::new(Some(today()), Some(date(2026, 10, 21))));
        let events = recorder.recorded();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            PageEvent::RangeChanged {
                start: Some(today()),
                end: Some(date(2026, 10, 21)),
                invalid: false,
            }
        );
    }

    #[test]
    fn end_picker_cannot_go_before_start() {
        let hooks = HookRegistry::new();
        let initial = RangePair::new(Some(date(2026, 10, 18)), None);
        let mut view = RangeView::new(initial, today(), 2024, Theme::default(), &hooks);

        press(&mut view, &[KeyCode::Tab, KeyCode::Enter, KeyCode::Left, KeyCode::Enter]);

        assert_eq!(view.range().end, None);
        assert!(view.end.is_open());
    }

    #[test]
    fn start_picker_bounded_by_end() {
        let hooks = HookRegistry::new();
        let initial = RangePair::new(None, Some(date(2026, 10, 18)));
        let mut view = RangeView::new(initial, today(), 2024, Theme::default(), &hooks);

        press(&mut view, &[KeyCode::Enter, KeyCode::Right, KeyCode::Enter]);
        assert_eq!(view.range().start, None);

        press(&mut view, &[KeyCode::Left, KeyCode::Left, KeyCode::Enter]);
        assert_eq!(view.range().start, Some(date(2026, 10, 17)));
        assert!(!view.range().is_invalid_range());
    }

    #[test]
    fn clearing_start_lifts_end_bound() {
        let hooks = HookRegistry::new();
        let initial = RangePair::new(Some(date(2026, 10, 10)), Some(date(2026, 10, 20)));
        let mut view = RangeView::new(initial, today(), 2024, Theme::default(), &hooks);

        press(&mut view, &[KeyCode::Char('x')]);
        assert_eq!(view.range().start, None);
        assert_eq!(view.context(Endpoint::End).bounds.min, None);
    }

    #[test]
    fn inverted_initial_range_shows_error_on_both() {
        let hooks = HookRegistry::new();
        let initial = RangePair::new(Some(date(2026, 10, 20)), Some(date(2026, 10, 10)));
        let mut view = RangeView::new(initial, today(), 2024, Theme::default(), &hooks);

        assert!(view.context(Endpoint::Start).show_error);
        assert!(view.context(Endpoint::End).show_error);

        let mut terminal = Terminal::new(TestBackend::new(110, 16)).unwrap();
        terminal.draw(|frame| view.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("intervalo inválido"));
        assert!(text.contains("Data inválida!"));
    }

    #[test]
    fn year_selection_is_reported() {
        let recorder = RecordingHook::default();
        let mut hooks = HookRegistry::new();
        hooks.register(recorder.clone());
        let mut view = RangeView::new(RangePair::default(), today(), 2024, Theme::default(), &hooks);

        press(&mut view, &[KeyCode::BackTab]);
        assert_eq!(view.focus(), RangeFocus::Year);
        press(&mut view, &[KeyCode::Enter, KeyCode::Down, KeyCode::Down, KeyCode::Enter]);

        assert_eq!(view.selected_year(), Some(2024));
        assert_eq!(recorder.recorded(), vec![PageEvent::YearSelected { year: 2024 }]);
    }

    #[test]
    fn quit_keys_only_when_popover_closed() {
        let hooks = HookRegistry::new();
        let mut view = RangeView::new(RangePair::default(), today(), 2024, Theme::default(), &hooks);

        press(&mut view, &[KeyCode::Enter]);
        // Esc closes the popover instead of leaving the page
        assert!(view.handle_key(key(KeyCode::Esc)));
        assert!(!view.start.is_open());
        assert!(!view.handle_key(key(KeyCode::Char('q'))));
        assert!(!view.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn open_popover_is_drawn() {
        let hooks = HookRegistry::new();
        let initial = RangePair::new(Some(date(2025, 3, 12)), None);
        let mut view = RangeView::new(initial, today(), 2024, Theme::default(), &hooks);
        press(&mut view, &[KeyCode::Enter]);

        let mut terminal = Terminal::new(TestBackend::new(110, 24)).unwrap();
        terminal.draw(|frame| view.draw(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Março"));
        assert!(text.contains("12/03/2025"));
    }
}
