use crate::domain::MessageKind;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Calendar days
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub cursor_bg: Color,
    pub today: Color,
    pub weekend: Color,
    pub outside: Color,
    pub disabled: Color,

    // UI elements
    pub border: Color,
    pub focused_border: Color,
    pub header: Color,
    pub placeholder: Color,

    // Text
    pub normal_text: Color,
    pub help_text: Color,
    pub error_text: Color,
    pub success_text: Color,
    pub info_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                selected_fg: Color::White,
                selected_bg: Color::Blue,
                cursor_bg: Color::Rgb(40, 40, 40),
                today: Color::LightBlue,
                weekend: Color::Rgb(150, 150, 150),
                outside: Color::DarkGray,
                disabled: Color::Rgb(70, 70, 70),

                border: Color::DarkGray,
                focused_border: Color::Cyan,
                header: Color::LightBlue,
                placeholder: Color::DarkGray,

                normal_text: Color::White,
                help_text: Color::Cyan,
                error_text: Color::LightRed,
                success_text: Color::LightGreen,
                info_text: Color::LightBlue,
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                selected_fg: Color::White,
                selected_bg: Color::Blue,
                cursor_bg: Color::Rgb(225, 225, 225),
                today: Color::Blue,
                weekend: Color::DarkGray,
                outside: Color::Gray,
                disabled: Color::Rgb(200, 200, 200),

                border: Color::Gray,
                focused_border: Color::Blue,
                header: Color::Blue,
                placeholder: Color::Gray,

                normal_text: Color::Black,
                help_text: Color::Blue,
                error_text: Color::Red,
                success_text: Color::Green,
                info_text: Color::Blue,
            },
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: "Minimal".to_string(),
            colors: ThemeColors {
                selected_fg: Color::Black,
                selected_bg: Color::White,
                cursor_bg: Color::Rgb(28, 28, 28),
                today: Color::White,
                weekend: Color::White,
                outside: Color::DarkGray,
                disabled: Color::DarkGray,

                border: Color::Gray,
                focused_border: Color::White,
                header: Color::White,
                placeholder: Color::DarkGray,

                normal_text: Color::White,
                help_text: Color::Gray,
                error_text: Color::White,
                success_text: Color::White,
                info_text: Color::White,
            },
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "minimal" => Self::minimal(),
            _ => Self::dark(), // default
        }
    }

    pub fn available_themes() -> Vec<String> {
        vec!["dark".to_string(), "light".to_string(), "minimal".to_string()]
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.colors.focused_border)
        } else {
            Style::default().fg(self.colors.border)
        }
    }

    pub fn message(&self, kind: MessageKind) -> Style {
        let color = match kind {
            MessageKind::Info => self.colors.info_text,
            MessageKind::Success => self.colors.success_text,
            MessageKind::Error => self.colors.error_text,
        };
        Style::default().fg(color)
    }

    pub fn help(&self) -> Style {
        Style::default().fg(self.colors.help_text)
    }

    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.colors.header)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back_to_dark() {
        assert_eq!(Theme::by_name("LIGHT").name, "Light");
        assert_eq!(Theme::by_name("minimal").name, "Minimal");
        assert_eq!(Theme::by_name("neon").name, "Dark");
        assert_eq!(Theme::available_themes().len(), 3);
    }
}
