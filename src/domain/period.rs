use std::ops::RangeInclusive;
use thiserror::Error;

/// Accepted period lengths, in days.
pub const PERIOD_RANGE: RangeInclusive<u32> = 30..=365;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("Informe um número de dias.")]
    Empty,

    #[error("\"{0}\" não é um número válido.")]
    NotANumber(String),

    #[error("O período deve estar entre {min} e {max} dias.", min = PERIOD_RANGE.start(), max = PERIOD_RANGE.end())]
    OutOfRange(u32),

    #[error("O período de {0} dias já foi adicionado.")]
    Duplicate(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

/// Numeric input that collects distinct period lengths.
#[derive(Debug, Clone, Default)]
pub struct PeriodForm {
    input: String,
    periods: Vec<u32>,
    message: Option<StatusMessage>,
}

impl PeriodForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn periods(&self) -> &[u32] {
        &self.periods
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// Replaces the input text. Any pending message is dropped.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.message = None;
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.message = None;
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
        self.message = None;
    }

    pub fn parse(&self) -> Result<u32, PeriodError> {
        let raw = self.input.trim();
        if raw.is_empty() {
            return Err(PeriodError::Empty);
        }
        let value: u32 = raw
            .parse()
            .map_err(|_| PeriodError::NotANumber(raw.to_string()))?;
        if !PERIOD_RANGE.contains(&value) {
            return Err(PeriodError::OutOfRange(value));
        }
        if self.periods.contains(&value) {
            return Err(PeriodError::Duplicate(value));
        }
        Ok(value)
    }

    /// Validates the input and appends it. Failures only set the message.
    pub fn add(&mut self) -> Result<u32, PeriodError> {
        match self.parse() {
            Ok(value) => {
                self.periods.push(value);
                self.input.clear();
                self.message = Some(StatusMessage::success(format!(
                    "Período de {value} dias adicionado."
                )));
                Ok(value)
            }
            Err(err) => {
                log::debug!("rejected period input {:?}: {}", self.input, err);
                self.message = Some(StatusMessage::error(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn remove(&mut self, value: u32) -> bool {
        let before = self.periods.len();
        self.periods.retain(|&p| p != value);
        let removed = self.periods.len() != before;
        if removed {
            self.message = Some(StatusMessage::info(format!(
                "Período de {value} dias removido."
            )));
        }
        removed
    }

    /// Hands back the collected periods and empties the list.
    ///
    /// With nothing to save, only an info message is set and `None` is
    /// returned.
    pub fn save(&mut self) -> Option<Vec<u32>> {
        if self.periods.is_empty() {
            self.message = Some(StatusMessage::info("Nenhum período para salvar."));
            return None;
        }

        let saved = std::mem::take(&mut self.periods);
        self.message = Some(StatusMessage::success(format!(
            "{} período(s) salvo(s) com sucesso.",
            saved.len()
        )));
        Some(saved)
    }
}
