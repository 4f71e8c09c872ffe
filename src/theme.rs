use std::str::FromStr;

use tuirealm::ratatui::style::Color;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum ThemePreset {
    #[default]
    Default,
    Light,
    HighContrast,
    Mono,
}

impl ThemePreset {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Light => "light",
            Self::HighContrast => "high-contrast",
            Self::Mono => "mono",
        }
    }
}

impl FromStr for ThemePreset {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "light" | "day" => Ok(Self::Light),
            "high-contrast" | "high_contrast" | "contrast" => Ok(Self::HighContrast),
            "mono" | "monochrome" => Ok(Self::Mono),
            _ => Err(()),
        }
    }
}

/// Palette consumed by the form components.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub border: Color,
    pub focus: Color,
    pub label: Color,
    pub value: Color,
    pub disabled: Color,
    pub error: Color,
    pub success: Color,
    pub hint: Color,
}

impl Theme {
    pub fn from_preset(preset: ThemePreset) -> Self {
        match preset {
            ThemePreset::Default => Self {
                accent: Color::Magenta,
                border: Color::DarkGray,
                focus: Color::Cyan,
                label: Color::Cyan,
                value: Color::White,
                disabled: Color::DarkGray,
                error: Color::Red,
                success: Color::LightGreen,
                hint: Color::DarkGray,
            },
            ThemePreset::Light => Self {
                accent: Color::Rgb(2, 132, 199),
                border: Color::Rgb(196, 208, 224),
                focus: Color::Rgb(37, 99, 235),
                label: Color::Rgb(37, 99, 235),
                value: Color::Rgb(32, 38, 51),
                disabled: Color::Rgb(95, 105, 122),
                error: Color::Rgb(185, 28, 28),
                success: Color::Rgb(22, 163, 74),
                hint: Color::Rgb(95, 105, 122),
            },
            ThemePreset::HighContrast => Self {
                accent: Color::LightBlue,
                border: Color::Gray,
                focus: Color::LightCyan,
                label: Color::LightCyan,
                value: Color::White,
                disabled: Color::Gray,
                error: Color::LightRed,
                success: Color::LightGreen,
                hint: Color::Gray,
            },
            ThemePreset::Mono => Self {
                accent: Color::Gray,
                border: Color::Gray,
                focus: Color::White,
                label: Color::White,
                value: Color::White,
                disabled: Color::Gray,
                error: Color::White,
                success: Color::White,
                hint: Color::Gray,
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_preset(ThemePreset::Default)
    }
}
