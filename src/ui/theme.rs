use std::fmt;
use std::str::FromStr;

use console::Style;
use serde::{Deserialize, Serialize};

use crate::fs_op::FsOpError;

/// Named color scheme for listings and the main menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Dark,
    Light,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Default, Theme::Dark, Theme::Light];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Short color description shown in the theme picker.
    pub fn blurb(self) -> &'static str {
        match self {
            Theme::Default => "Blue/Green/White",
            Theme::Dark => "Cyan/Yellow/White",
            Theme::Light => "Blue/Green/Black",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Default => Palette {
                directory: Style::new().blue().bright().bold(),
                executable: Style::new().green(),
                regular: Style::new().white(),
                title: Style::new().cyan().bold(),
                header: Style::new().magenta().bold(),
                section: Style::new().yellow().bold(),
                option: Style::new().cyan(),
                path: Style::new().green(),
                text: Style::new().white(),
            },
            Theme::Dark => Palette {
                directory: Style::new().cyan().bold(),
                executable: Style::new().yellow().bold(),
                regular: Style::new().white().bold(),
                title: Style::new().cyan().bold(),
                header: Style::new().magenta().bold(),
                section: Style::new().yellow().bold(),
                option: Style::new().cyan().bold(),
                path: Style::new().green().bold(),
                text: Style::new().white().bold(),
            },
            Theme::Light => Palette {
                directory: Style::new().blue(),
                executable: Style::new().green(),
                regular: Style::new().black(),
                title: Style::new().blue().bold(),
                header: Style::new().magenta().bold(),
                section: Style::new().yellow(),
                option: Style::new().cyan(),
                path: Style::new().green(),
                text: Style::new().magenta(),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = FsOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Theme::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FsOpError::UnknownTheme(wanted.to_string()))
    }
}

/// Concrete styles derived from a [`Theme`].
#[derive(Debug, Clone)]
pub struct Palette {
    pub directory: Style,
    pub executable: Style,
    pub regular: Style,
    pub title: Style,
    pub header: Style,
    pub section: Style,
    pub option: Style,
    pub path: Style,
    pub text: Style,
}

// Status styles do not change with the theme.
pub fn success_style() -> Style {
    Style::new().green()
}

pub fn error_style() -> Style {
    Style::new().red()
}

pub fn warning_style() -> Style {
    Style::new().yellow()
}
