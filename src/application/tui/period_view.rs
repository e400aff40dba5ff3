use super::session::Screen;
use super::theme::Theme;
use crate::domain::{PERIOD_RANGE, PeriodForm};
use crate::infrastructure::{HookRegistry, PageEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

const PAGE_WIDTH: u16 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodFocus {
    Input,
    List,
}

/// The periods page: a numeric input feeding a list of distinct periods.
pub struct PeriodView<'a> {
    form: PeriodForm,
    focus: PeriodFocus,
    list_state: ListState,
    last_saved: Option<Vec<u32>>,
    theme: Theme,
    hooks: &'a HookRegistry,
}

impl<'a> PeriodView<'a> {
    pub fn new(theme: Theme, hooks: &'a HookRegistry) -> Self {
        Self {
            form: PeriodForm::new(),
            focus: PeriodFocus::Input,
            list_state: ListState::default(),
            last_saved: None,
            theme,
            hooks,
        }
    }

    pub fn form(&self) -> &PeriodForm {
        &self.form
    }

    pub fn last_saved(&self) -> Option<&[u32]> {
        self.last_saved.as_deref()
    }

    fn save(&mut self) {
        if let Some(periods) = self.form.save() {
            self.hooks.dispatch(&PageEvent::PeriodsSaved {
                periods: periods.clone(),
            });
            self.last_saved = Some(periods);
            self.list_state.select(None);
            self.focus = PeriodFocus::Input;
        }
    }

    fn remove_selected(&mut self) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        let Some(&value) = self.form.periods().get(index) else {
            return;
        };
        self.form.remove(value);

        let remaining = self.form.periods().len();
        if remaining == 0 {
            self.list_state.select(None);
            self.focus = PeriodFocus::Input;
        } else {
            self.list_state.select(Some(index.min(remaining - 1)));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.form.periods().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.list_state.select(Some(next as usize));
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => {
                let _ = self.form.add();
            }
            KeyCode::Backspace => self.form.pop_char(),
            KeyCode::Char(c) if !c.is_control() => self.form.push_char(c),
            KeyCode::Tab | KeyCode::Down if !self.form.periods().is_empty() => {
                self.focus = PeriodFocus::List;
                if self.list_state.selected().is_none() {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Esc => return false,
            _ => {}
        }
        true
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('d') => self.remove_selected(),
            KeyCode::Tab | KeyCode::BackTab => self.focus = PeriodFocus::Input,
            KeyCode::Char('q') | KeyCode::Esc => return false,
            _ => {}
        }
        true
    }

    fn input_widget(&self) -> Paragraph<'static> {
        let focused = self.focus == PeriodFocus::Input;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(focused))
            .title(Span::styled(
                format!(
                    " Período em dias ({}-{}) ",
                    PERIOD_RANGE.start(),
                    PERIOD_RANGE.end()
                ),
                self.theme.header(),
            ));
        let mut spans = vec![Span::styled(
            self.form.input().to_string(),
            Style::default().fg(self.theme.colors.normal_text),
        )];
        if focused {
            spans.push(Span::styled(
                "▏",
                Style::default().fg(self.theme.colors.focused_border),
            ));
        }
        Paragraph::new(Line::from(spans)).block(block)
    }

    fn list_widget(&self) -> List<'static> {
        let focused = self.focus == PeriodFocus::List;
        let items: Vec<ListItem> = if self.form.periods().is_empty() {
            vec![ListItem::new(Span::styled(
                "Nenhum período adicionado",
                Style::default().fg(self.theme.colors.placeholder),
            ))]
        } else {
            self.form
                .periods()
                .iter()
                .map(|days| ListItem::new(format!("{} dias", days)))
                .collect()
        };

        List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.border(focused))
                    .title(Span::styled(
                        format!(" Períodos ({}) ", self.form.periods().len()),
                        self.theme.header(),
                    )),
            )
            .style(Style::default().fg(self.theme.colors.normal_text))
            .highlight_style(if focused {
                Style::default()
                    .fg(self.theme.colors.selected_fg)
                    .bg(self.theme.colors.selected_bg)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            })
            .highlight_symbol("› ")
    }
}

impl Screen for PeriodView<'_> {
    fn draw(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let width = PAGE_WIDTH.min(size.width);
        let area = Rect {
            x: size.x + (size.width - width) / 2,
            width,
            ..size
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // title
                Constraint::Length(3), // input
                Constraint::Length(1), // message
                Constraint::Min(3),    // list
                Constraint::Length(1), // help
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled("Períodos", self.theme.header()))
                .alignment(Alignment::Center),
            chunks[0],
        );
        frame.render_widget(self.input_widget(), chunks[1]);

        if let Some(message) = self.form.message() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    message.text.clone(),
                    self.theme.message(message.kind),
                )),
                chunks[2],
            );
        }

        let list = self.list_widget();
        frame.render_stateful_widget(list, chunks[3], &mut self.list_state);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Enter=Adicionar • Tab=Lista • d=Remover • Ctrl+S=Salvar • Esc=Sair",
                self.theme.help(),
            ))
            .alignment(Alignment::Center),
            chunks[4],
        );
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return false,
                KeyCode::Char('s') => {
                    self.save();
                    return true;
                }
                _ => return true,
            }
        }

        match self.focus {
            PeriodFocus::Input => self.handle_input_key(key),
            PeriodFocus::List => self.handle_list_key(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageKind;
    use crate::infrastructure::test_hooks::RecordingHook;
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_and_add(view: &mut PeriodView, text: &str) {
        for c in text.chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }
        view.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn typing_adds_and_rejects() {
        let hooks = HookRegistry::new();
        let mut view = PeriodView::new(Theme::default(), &hooks);

        type_and_add(&mut view, "45");
        type_and_add(&mut view, "45");
        assert_eq!(view.form().periods(), &[45]);
        assert_eq!(view.form().message().unwrap().kind, MessageKind::Error);

        // the rejected "45" is still in the input; typing clears the message
        view.handle_key(key(KeyCode::Backspace));
        assert!(view.form().message().is_none());
    }

    #[test]
    fn remove_from_list() {
        let hooks = HookRegistry::new();
        let mut view = PeriodView::new(Theme::default(), &hooks);
        type_and_add(&mut view, "30");
        type_and_add(&mut view, "90");

        view.handle_key(key(KeyCode::Tab));
        view.handle_key(key(KeyCode::Down));
        view.handle_key(key(KeyCode::Char('d')));
        assert_eq!(view.form().periods(), &[30]);

        view.handle_key(key(KeyCode::Char('d')));
        assert!(view.form().periods().is_empty());
        assert_eq!(view.focus, PeriodFocus::Input);
    }

    #[test]
    fn save_reports_and_clears() {
        let recorder = RecordingHook::default();
        let mut hooks = HookRegistry::new();
        hooks.register(recorder.clone());
        let mut view = PeriodView::new(Theme::default(), &hooks);

        assert!(view.handle_key(ctrl('s')));
        assert_eq!(view.form().message().unwrap().kind, MessageKind::Info);
        assert!(recorder.recorded().is_empty());

        type_and_add(&mut view, "120");
        view.handle_key(ctrl('s'));

        assert_eq!(view.last_saved(), Some(&[120][..]));
        assert!(view.form().periods().is_empty());
        assert_eq!(
            recorder.recorded(),
            vec![PageEvent::PeriodsSaved { periods: vec![120] }]
        );
        assert!(!view.handle_key(ctrl('c')));
    }

    #[test]
    fn draws_message_and_list() {
        let hooks = HookRegistry::new();
        let mut view = PeriodView::new(Theme::default(), &hooks);
        type_and_add(&mut view, "20");
        type_and_add(&mut view, "");
        view.form.set_input("");
        type_and_add(&mut view, "60");

        let mut terminal = Terminal::new(TestBackend::new(70, 14)).unwrap();
        terminal.draw(|frame| view.draw(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("60 dias"));
        assert!(text.contains("Período de 60 dias adicionado."));
    }
}
