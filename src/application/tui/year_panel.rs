use super::theme::Theme;
use crate::domain::YearSelect;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

pub const YEAR_PANEL_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearOutcome {
    Ignored,
    Handled,
    Chosen(i32),
}

pub struct YearPanel {
    select: YearSelect,
    years: Vec<i32>,
    highlight: Option<usize>,
}

impl YearPanel {
    pub fn new(select: YearSelect, today: NaiveDate) -> Self {
        Self {
            select,
            years: YearSelect::years(today),
            highlight: None,
        }
    }

    pub fn select(&self) -> &YearSelect {
        &self.select
    }

    pub fn is_open(&self) -> bool {
        self.highlight.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> YearOutcome {
        let Some(highlight) = self.highlight else {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                    let current = self
                        .select
                        .selected()
                        .and_then(|year| self.years.iter().position(|y| *y == year));
                    self.highlight = Some(current.unwrap_or(0));
                    YearOutcome::Handled
                }
                _ => YearOutcome::Ignored,
            };
        };

        match key.code {
            KeyCode::Esc => self.highlight = None,
            KeyCode::Up | KeyCode::Char('k') => {
                self.highlight = Some(highlight.saturating_sub(1));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.highlight = Some((highlight + 1).min(self.years.len() - 1));
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.highlight = None;
                if let Some(&year) = self.years.get(highlight) {
                    return YearOutcome::Chosen(self.select.choose(year));
                }
            }
            _ => {}
        }
        YearOutcome::Handled
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let value_style = if self.select.selected().is_some() {
            Style::default().fg(theme.colors.normal_text)
        } else {
            Style::default().fg(theme.colors.placeholder)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border(focused))
            .title(Span::styled(format!(" {} ", self.select.label()), theme.header()));
        let line = Line::from(vec![
            Span::styled(self.select.display_text(), value_style),
            Span::styled(" ▾", Style::default().fg(theme.colors.header)),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);

        let Some(highlight) = self.highlight else {
            return;
        };
        let list_area = Rect {
            x: area.x,
            y: area.y + area.height,
            width: area.width,
            height: self.years.len() as u16 + 2,
        }
        .intersection(frame.area());

        let items: Vec<ListItem> = self
            .years
            .iter()
            .map(|year| ListItem::new(year.to_string()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border(true)),
            )
            .style(Style::default().fg(theme.colors.normal_text))
            .highlight_style(
                Style::default()
                    .fg(theme.colors.selected_fg)
                    .bg(theme.colors.selected_bg),
            );
        let mut state = ListState::default();
        state.select(Some(highlight));

        frame.render_widget(Clear, list_area);
        frame.render_stateful_widget(list, list_area, &mut state);
    }
}
