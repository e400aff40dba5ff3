use super::theme::Theme;
use crate::domain::{
    BoundWindow, DatePicker, DisplayedMonth, Endpoint, INVALID_RANGE_MESSAGE, SelectionChange,
    WEEKDAY_HEADERS, is_supported_year, is_weekend,
};
use chrono::{Datelike, Duration, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

pub const PANEL_WIDTH: u16 = 36;
pub const PANEL_HEIGHT: u16 = 6;
pub const POPOVER_WIDTH: u16 = 30;
const DAY_WIDTH: usize = 4;

/// Everything the host passes down on each update.
#[derive(Debug, Clone, Copy)]
pub struct PanelContext {
    pub selection: Option<NaiveDate>,
    pub bounds: BoundWindow,
    pub show_error: bool,
    pub today: NaiveDate,
    pub fallback_year: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    /// Key not meant for this panel.
    Ignored,
    Handled,
    Changed(SelectionChange),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverFocus {
    Grid,
    Month,
    Year,
}

/// Terminal rendition of a [`DatePicker`]: a trigger box plus a popover with
/// the month/year caption and the day grid.
pub struct PickerPanel {
    endpoint: Endpoint,
    picker: DatePicker,
    cursor: NaiveDate,
    focus: PopoverFocus,
    dropdown: Option<usize>,
    style: Option<Style>,
}

impl PickerPanel {
    pub fn new(endpoint: Endpoint, selection: Option<NaiveDate>, today: NaiveDate) -> Self {
        let picker = DatePicker::new(endpoint.label(), selection, today);
        Self {
            endpoint,
            cursor: picker.displayed().anchor(),
            picker,
            focus: PopoverFocus::Grid,
            dropdown: None,
            style: None,
        }
    }

    /// Extra style patched onto the trigger box.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn picker(&self) -> &DatePicker {
        &self.picker
    }

    pub fn is_open(&self) -> bool {
        self.picker.is_open()
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn focus(&self) -> PopoverFocus {
        self.focus
    }

    pub fn dropdown_highlight(&self) -> Option<usize> {
        self.dropdown
    }

    pub fn open(&mut self, selection: Option<NaiveDate>) {
        self.picker.open(selection);
        self.cursor = selection.unwrap_or_else(|| self.picker.displayed().anchor());
        self.focus = PopoverFocus::Grid;
        self.dropdown = None;
    }

    pub fn close(&mut self) {
        self.picker.close();
        self.dropdown = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent, ctx: &PanelContext) -> PanelOutcome {
        if !self.picker.is_open() {
            return self.handle_closed_key(key, ctx);
        }
        if self.dropdown.is_some() {
            return self.handle_dropdown_key(key, ctx);
        }
        match self.focus {
            PopoverFocus::Grid => self.handle_grid_key(key, ctx),
            PopoverFocus::Month | PopoverFocus::Year => self.handle_caption_key(key, ctx),
        }
    }

    fn handle_closed_key(&mut self, key: KeyEvent, ctx: &PanelContext) -> PanelOutcome {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                self.open(ctx.selection);
                PanelOutcome::Handled
            }
            // The clear button only exists while a date is set
            KeyCode::Backspace | KeyCode::Delete | KeyCode::Char('x') if ctx.selection.is_some() => {
                PanelOutcome::Changed(self.picker.clear())
            }
            _ => PanelOutcome::Ignored,
        }
    }

    fn handle_grid_key(&mut self, key: KeyEvent, ctx: &PanelContext) -> PanelOutcome {
        match key.code {
            KeyCode::Esc => self.close(),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, &ctx.bounds),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, &ctx.bounds),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-7, &ctx.bounds),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(7, &ctx.bounds),
            KeyCode::PageUp => {
                if self.picker.previous_month(&ctx.bounds) {
                    self.realign_cursor();
                }
            }
            KeyCode::PageDown => {
                if self.picker.next_month(&ctx.bounds) {
                    self.realign_cursor();
                }
            }
            KeyCode::Char('t') => self.focus_date(ctx.today, &ctx.bounds),
            KeyCode::Tab => self.focus = PopoverFocus::Month,
            KeyCode::BackTab => self.focus = PopoverFocus::Year,
            KeyCode::Backspace | KeyCode::Delete => {
                return match self.picker.select(None, &ctx.bounds) {
                    Some(change) => PanelOutcome::Changed(change),
                    None => PanelOutcome::Handled,
                };
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                return match self.picker.select(Some(self.cursor), &ctx.bounds) {
                    Some(change) => PanelOutcome::Changed(change),
                    None => PanelOutcome::Handled,
                };
            }
            _ => {}
        }
        PanelOutcome::Handled
    }

    fn handle_caption_key(&mut self, key: KeyEvent, ctx: &PanelContext) -> PanelOutcome {
        match key.code {
            KeyCode::Esc => self.close(),
            KeyCode::Tab => {
                self.focus = match self.focus {
                    PopoverFocus::Month => PopoverFocus::Year,
                    _ => PopoverFocus::Grid,
                }
            }
            KeyCode::BackTab => {
                self.focus = match self.focus {
                    PopoverFocus::Year => PopoverFocus::Month,
                    _ => PopoverFocus::Grid,
                }
            }
            KeyCode::Left => self.focus = PopoverFocus::Month,
            KeyCode::Right => self.focus = PopoverFocus::Year,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => self.expand_dropdown(ctx),
            _ => {}
        }
        PanelOutcome::Handled
    }

    fn handle_dropdown_key(&mut self, key: KeyEvent, ctx: &PanelContext) -> PanelOutcome {
        let disabled = self.dropdown_disabled(ctx);
        let Some(highlight) = self.dropdown else {
            return PanelOutcome::Handled;
        };

        match key.code {
            KeyCode::Esc => self.dropdown = None,
            KeyCode::Up | KeyCode::Char('k') => {
                self.dropdown = Some(step_enabled(&disabled, highlight, -1));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.dropdown = Some(step_enabled(&disabled, highlight, 1));
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if disabled.get(highlight).copied().unwrap_or(true) {
                    return PanelOutcome::Handled;
                }
                match self.focus {
                    PopoverFocus::Month => self.picker.change_month(highlight as u32),
                    PopoverFocus::Year => {
                        let options =
                            self.picker
                                .year_options(&ctx.bounds, ctx.today, ctx.fallback_year);
                        if let Some(option) = options.get(highlight) {
                            self.picker.change_year(option.year);
                        }
                    }
                    PopoverFocus::Grid => {}
                }
                self.dropdown = None;
                self.realign_cursor();
            }
            _ => {}
        }
        PanelOutcome::Handled
    }

    fn expand_dropdown(&mut self, ctx: &PanelContext) {
        let disabled = self.dropdown_disabled(ctx);
        if disabled.iter().all(|d| *d) {
            return;
        }

        let displayed = self.picker.displayed();
        let current = match self.focus {
            PopoverFocus::Month => Some(displayed.month0() as usize),
            PopoverFocus::Year => self
                .picker
                .year_options(&ctx.bounds, ctx.today, ctx.fallback_year)
                .iter()
                .position(|o| o.year == displayed.year()),
            PopoverFocus::Grid => None,
        };

        let highlight = match current {
            Some(index) if !disabled[index] => index,
            _ => disabled.iter().position(|d| !*d).unwrap_or(0),
        };
        self.dropdown = Some(highlight);
    }

    fn dropdown_disabled(&self, ctx: &PanelContext) -> Vec<bool> {
        match self.focus {
            PopoverFocus::Month => self
                .picker
                .month_options(&ctx.bounds)
                .iter()
                .map(|o| o.disabled)
                .collect(),
            PopoverFocus::Year => self
                .picker
                .year_options(&ctx.bounds, ctx.today, ctx.fallback_year)
                .iter()
                .map(|o| o.disabled)
                .collect(),
            PopoverFocus::Grid => Vec::new(),
        }
    }

    fn move_cursor(&mut self, days: i64, bounds: &BoundWindow) {
        if let Some(target) = self.cursor.checked_add_signed(Duration::days(days)) {
            self.focus_date(target, bounds);
        }
    }

    /// Moves keyboard focus to `target`, following it with the calendar.
    /// Months with no selectable day are never entered.
    fn focus_date(&mut self, target: NaiveDate, bounds: &BoundWindow) {
        if !is_supported_year(target.year())
            || !bounds.overlaps_month(target.year(), target.month0())
        {
            return;
        }
        self.cursor = target;
        if !self.picker.displayed().contains(target) {
            self.picker.show_month(DisplayedMonth::from_date(target));
        }
    }

    /// Keeps the cursor's day but moves it into the displayed month.
    fn realign_cursor(&mut self) {
        let displayed = self.picker.displayed();
        self.cursor = DisplayedMonth::from_date(self.cursor)
            .with_year(displayed.year())
            .with_month(displayed.month0())
            .anchor();
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        ctx: &PanelContext,
        theme: &Theme,
        focused: bool,
    ) {
        let border = if ctx.show_error {
            Style::default().fg(theme.colors.error_text)
        } else {
            theme.border(focused)
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(format!(" {} ", self.picker.label()), theme.header()));
        if let Some(style) = self.style {
            block = block.style(style);
        }

        let date_style = match ctx.selection {
            Some(_) if ctx.show_error => Style::default().fg(theme.colors.error_text),
            Some(_) => Style::default().fg(theme.colors.normal_text),
            None => Style::default().fg(theme.colors.placeholder),
        };
        let mut trigger = vec![
            Span::styled("▦ ", Style::default().fg(theme.colors.header)),
            Span::styled(DatePicker::display_text(ctx.selection), date_style),
        ];
        if ctx.selection.is_some() {
            trigger.push(Span::styled(
                "  ✕",
                Style::default().fg(theme.colors.error_text),
            ));
        }

        let mut lines = vec![Line::from(trigger)];
        if ctx.show_error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("⚠ {}", INVALID_RANGE_MESSAGE),
                Style::default().fg(theme.colors.error_text),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    /// Where the popover goes when the trigger sits at `anchor`.
    pub fn popover_area(&self, anchor: Rect, screen: Rect, ctx: &PanelContext) -> Rect {
        let weeks = self.picker.grid(ctx.selection, &ctx.bounds, ctx.today).len() as u16;
        let wanted = Rect {
            x: anchor.x,
            y: anchor.y + anchor.height,
            width: POPOVER_WIDTH,
            height: weeks + 4,
        };
        wanted.intersection(screen)
    }

    pub fn render_popover(&self, frame: &mut Frame, area: Rect, ctx: &PanelContext, theme: &Theme) {
        if !self.picker.is_open() || area.area() == 0 {
            return;
        }

        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border(true));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![self.caption_line(ctx, theme), self.weekday_line(theme)];
        for week in self.picker.grid(ctx.selection, &ctx.bounds, ctx.today) {
            let spans: Vec<Span> = week
                .iter()
                .map(|cell| {
                    let mut style = if cell.disabled {
                        Style::default().fg(theme.colors.disabled)
                    } else if cell.outside {
                        Style::default().fg(theme.colors.outside)
                    } else if is_weekend(cell.date) {
                        Style::default().fg(theme.colors.weekend)
                    } else {
                        Style::default().fg(theme.colors.normal_text)
                    };
                    if cell.today {
                        style = style.fg(theme.colors.today).add_modifier(Modifier::UNDERLINED);
                    }
                    if cell.selected {
                        style = style
                            .fg(theme.colors.selected_fg)
                            .bg(theme.colors.selected_bg);
                    } else if cell.date == self.cursor && self.focus == PopoverFocus::Grid {
                        style = style.bg(theme.colors.cursor_bg).add_modifier(Modifier::BOLD);
                    }
                    Span::styled(format!("{:>3} ", cell.date.day()), style)
                })
                .collect();
            lines.push(Line::from(spans));
        }
        frame.render_widget(Paragraph::new(lines), inner);

        if let Some(highlight) = self.dropdown {
            self.render_dropdown(frame, inner, highlight, ctx, theme);
        }
    }

    fn caption_line(&self, ctx: &PanelContext, theme: &Theme) -> Line<'static> {
        let displayed = self.picker.displayed();
        let nav = |enabled: bool| {
            if enabled {
                Style::default().fg(theme.colors.header)
            } else {
                Style::default().fg(theme.colors.disabled)
            }
        };
        let select = |focused: bool| {
            let style = Style::default().fg(theme.colors.header);
            if focused {
                style.add_modifier(Modifier::REVERSED)
            } else {
                style
            }
        };

        Line::from(vec![
            Span::styled("‹ ", nav(self.picker.can_go_previous(&ctx.bounds))),
            Span::styled(
                format!("{:<9} ▾", displayed.month_name()),
                select(self.focus == PopoverFocus::Month),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} ▾", displayed.year()),
                select(self.focus == PopoverFocus::Year),
            ),
            Span::styled(" ›", nav(self.picker.can_go_next(&ctx.bounds))),
        ])
        .alignment(Alignment::Center)
    }

    fn weekday_line(&self, theme: &Theme) -> Line<'static> {
        let spans: Vec<Span> = WEEKDAY_HEADERS
            .iter()
            .map(|name| {
                Span::styled(
                    format!("{:>width$} ", name, width = DAY_WIDTH - 1),
                    Style::default().fg(theme.colors.header),
                )
            })
            .collect();
        Line::from(spans)
    }

    fn render_dropdown(
        &self,
        frame: &mut Frame,
        inner: Rect,
        highlight: usize,
        ctx: &PanelContext,
        theme: &Theme,
    ) {
        let (items, x): (Vec<(String, bool)>, u16) = match self.focus {
            PopoverFocus::Month => (
                self.picker
                    .month_options(&ctx.bounds)
                    .iter()
                    .map(|o| (o.label.to_string(), o.disabled))
                    .collect(),
                inner.x,
            ),
            PopoverFocus::Year => (
                self.picker
                    .year_options(&ctx.bounds, ctx.today, ctx.fallback_year)
                    .iter()
                    .map(|o| (o.year.to_string(), o.disabled))
                    .collect(),
                inner.x + 14,
            ),
            PopoverFocus::Grid => return,
        };

        let list_area = Rect {
            x,
            y: inner.y + 1,
            width: 13,
            height: (items.len() as u16 + 2).min(inner.height.saturating_sub(1)),
        }
        .intersection(frame.area());

        let items: Vec<ListItem> = items
            .into_iter()
            .map(|(label, disabled)| {
                let style = if disabled {
                    Style::default()
                        .fg(theme.colors.disabled)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(theme.colors.normal_text)
                };
                ListItem::new(label).style(style)
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border(true)),
            )
            .highlight_style(
                Style::default()
                    .bg(theme.colors.selected_bg)
                    .fg(theme.colors.selected_fg),
            );
        let mut state = ListState::default();
        state.select(Some(highlight));

        frame.render_widget(Clear, list_area);
        frame.render_stateful_widget(list, list_area, &mut state);
    }
}

/// Next enabled index from `from` in direction `delta`, staying put at the ends.
fn step_enabled(disabled: &[bool], from: usize, delta: isize) -> usize {
    let mut index = from as isize;
    loop {
        index += delta;
        if index < 0 || index as usize >= disabled.len() {
            return from;
        }
        if !disabled[index as usize] {
            return index as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctx(selection: Option<NaiveDate>, bounds: BoundWindow) -> PanelContext {
        PanelContext {
            selection,
            bounds,
            show_error: false,
            today: date(2026, 10, 18),
            fallback_year: 2024,
        }
    }

    #[test]
    fn enter_opens_then_picks_cursor_date() {
        let context = ctx(None, BoundWindow::unbounded());
        let mut panel = PickerPanel::new(Endpoint::Start, None, context.today);

        assert_eq!(panel.handle_key(key(KeyCode::Enter), &context), PanelOutcome::Handled);
        assert!(panel.is_open());
        assert_eq!(panel.cursor(), context.today);

        panel.handle_key(key(KeyCode::Right), &context);
        let outcome = panel.handle_key(key(KeyCode::Enter), &context);

        assert_eq!(
            outcome,
            PanelOutcome::Changed(SelectionChange::Set(date(2026, 10, 19)))
        );
        assert!(!panel.is_open());
    }

    #[test]
    fn picking_out_of_bounds_day_keeps_popover_open() {
        let bounds = BoundWindow::at_least(Some(date(2026, 10, 10)));
        let context = ctx(Some(date(2026, 10, 10)), bounds);
        let mut panel = PickerPanel::new(Endpoint::End, context.selection, context.today);

        panel.handle_key(key(KeyCode::Enter), &context);
        panel.handle_key(key(KeyCode::Left), &context);
        assert_eq!(panel.cursor(), date(2026, 10, 9));

        assert_eq!(panel.handle_key(key(KeyCode::Enter), &context), PanelOutcome::Handled);
        assert!(panel.is_open());
    }

    #[test]
    fn cursor_does_not_enter_months_outside_window() {
        let bounds = BoundWindow::at_least(Some(date(2026, 10, 5)));
        let context = ctx(Some(date(2026, 10, 6)), bounds);
        let mut panel = PickerPanel::new(Endpoint::End, context.selection, context.today);

        panel.handle_key(key(KeyCode::Enter), &context);
        panel.handle_key(key(KeyCode::Up), &context);
        assert_eq!(panel.cursor(), date(2026, 10, 6));
        assert_eq!(panel.handle_key(key(KeyCode::PageUp), &context), PanelOutcome::Handled);
        assert_eq!(panel.picker().displayed().month0(), 9);
    }

    #[test]
    fn arrows_follow_into_next_month() {
        let context = ctx(Some(date(2026, 1, 30)), BoundWindow::unbounded());
        let mut panel = PickerPanel::new(Endpoint::Start, context.selection, context.today);

        panel.handle_key(key(KeyCode::Enter), &context);
        panel.handle_key(key(KeyCode::Down), &context);

        assert_eq!(panel.cursor(), date(2026, 2, 6));
        assert_eq!(panel.picker().displayed().month0(), 1);
    }

    #[test]
    fn clear_key_only_with_selection() {
        let empty = ctx(None, BoundWindow::unbounded());
        let mut panel = PickerPanel::new(Endpoint::Start, None, empty.today);
        assert_eq!(panel.handle_key(key(KeyCode::Delete), &empty), PanelOutcome::Ignored);

        let set = ctx(Some(date(2026, 3, 3)), BoundWindow::unbounded());
        assert_eq!(
            panel.handle_key(key(KeyCode::Char('x')), &set),
            PanelOutcome::Changed(SelectionChange::Cleared)
        );
    }

    #[test]
    fn month_dropdown_skips_disabled_months() {
        let bounds = BoundWindow::new(Some(date(2026, 3, 1)), Some(date(2026, 5, 31)));
        let context = ctx(Some(date(2026, 4, 15)), bounds);
        let mut panel = PickerPanel::new(Endpoint::Start, context.selection, context.today);

        panel.handle_key(key(KeyCode::Enter), &context);
        panel.handle_key(key(KeyCode::Tab), &context);
        assert_eq!(panel.focus(), PopoverFocus::Month);

        panel.handle_key(key(KeyCode::Enter), &context);
        assert_eq!(panel.dropdown_highlight(), Some(3));

        panel.handle_key(key(KeyCode::Down), &context);
        panel.handle_key(key(KeyCode::Down), &context);
        assert_eq!(panel.dropdown_highlight(), Some(4));

        panel.handle_key(key(KeyCode::Up), &context);
        panel.handle_key(key(KeyCode::Up), &context);
        panel.handle_key(key(KeyCode::Up), &context);
        assert_eq!(panel.dropdown_highlight(), Some(2));

        panel.handle_key(key(KeyCode::Enter), &context);
        assert_eq!(panel.dropdown_highlight(), None);
        assert_eq!(panel.picker().displayed().month0(), 2);
        assert_eq!(panel.picker().displayed().day(), 15);
        assert_eq!(panel.cursor(), date(2026, 3, 15));
    }

    #[test]
    fn year_dropdown_changes_displayed_year() {
        let context = ctx(Some(date(2026, 6, 1)), BoundWindow::unbounded());
        let mut panel = PickerPanel::new(Endpoint::Start, context.selection, context.today);

        panel.handle_key(key(KeyCode::Enter), &context);
        panel.handle_key(key(KeyCode::BackTab), &context);
        assert_eq!(panel.focus(), PopoverFocus::Year);

        // years listed newest first: 2026, 2025, 2024
        panel.handle_key(key(KeyCode::Enter), &context);
        assert_eq!(panel.dropdown_highlight(), Some(0));
        panel.handle_key(key(KeyCode::Down), &context);
        panel.handle_key(key(KeyCode::Enter), &context);

        assert_eq!(panel.picker().displayed().year(), 2025);
        assert_eq!(panel.picker().displayed().month0(), 5);
    }

    #[test]
    fn renders_placeholder_and_error() {
        let mut context = ctx(None, BoundWindow::unbounded());
        let panel = PickerPanel::new(Endpoint::Start, None, context.today);
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(60, PANEL_HEIGHT)).unwrap();

        terminal
            .draw(|frame| panel.render(frame, frame.area(), &context, &theme, true))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Data Início"));
        assert!(text.contains("dd/mm/aaaa"));
        assert!(!text.contains("Data inválida"));

        context.selection = Some(date(2026, 5, 2));
        context.show_error = true;
        terminal
            .draw(|frame| panel.render(frame, frame.area(), &context, &theme, true))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("02/05/2026"));
        assert!(text.contains("Data inválida!"));
    }

    #[test]
    fn style_override_is_applied_to_trigger() {
        let context = ctx(None, BoundWindow::unbounded());
        let panel = PickerPanel::new(Endpoint::End, None, context.today)
            .with_style(Style::default().bg(ratatui::style::Color::Magenta));
        assert_eq!(panel.endpoint(), Endpoint::End);

        let mut terminal = Terminal::new(TestBackend::new(40, PANEL_HEIGHT)).unwrap();
        terminal
            .draw(|frame| panel.render(frame, frame.area(), &context, &Theme::default(), false))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(5, 2)].bg, ratatui::style::Color::Magenta);
    }

    #[test]
    fn popover_shows_caption_and_days() {
        let context = ctx(Some(date(2025, 3, 12)), BoundWindow::unbounded());
        let mut panel = PickerPanel::new(Endpoint::Start, context.selection, context.today);
        panel.open(context.selection);
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();

        terminal
            .draw(|frame| {
                let anchor = Rect::new(0, 0, PANEL_WIDTH, 0);
                let area = panel.popover_area(anchor, frame.area(), &context);
                panel.render_popover(frame, area, &context, &theme);
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Março"));
        assert!(text.contains("2025"));
        assert!(text.contains("dom"));
        assert!(text.contains(" 31 "));
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }
}
