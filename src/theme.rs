//! Category color coding for the article list.
//!
//! Each known section name maps to one [`CategoryColor`]; everything else
//! falls back to [`CategoryColor::Default`]. The variants resolve to ratatui
//! colors for the list badges.

use ratatui::style::{Color, Style};

/// Color identifier for an article's category badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryColor {
    Culture,
    ArtAndDesign,
    Film,
    Music,
    Education,
    TelevisionAndRadio,
    Cities,
    LifeAndStyle,
    Opinion,
    Global,
    Default,
}

/// Section name to color, matched exactly (case-sensitive).
const CATEGORY_COLORS: [(&str, CategoryColor); 10] = [
    ("Culture", CategoryColor::Culture),
    ("Art and design", CategoryColor::ArtAndDesign),
    ("Film", CategoryColor::Film),
    ("Music", CategoryColor::Music),
    ("Education", CategoryColor::Education),
    ("Television & radio", CategoryColor::TelevisionAndRadio),
    ("Cities", CategoryColor::Cities),
    ("Life and style", CategoryColor::LifeAndStyle),
    ("Opinion", CategoryColor::Opinion),
    ("Global", CategoryColor::Global),
];

/// Looks up the badge color for a section name. Never fails.
pub fn color_for(category: &str) -> CategoryColor {
    CATEGORY_COLORS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, color)| *color)
        .unwrap_or(CategoryColor::Default)
}

impl CategoryColor {
    /// Stable identifier, e.g. for logs or config.
    pub fn name(self) -> &'static str {
        match self {
            Self::Culture => "culture",
            Self::ArtAndDesign => "art_and_design",
            Self::Film => "film",
            Self::Music => "music",
            Self::Education => "education",
            Self::TelevisionAndRadio => "television_and_radio",
            Self::Cities => "cities",
            Self::LifeAndStyle => "life_and_style",
            Self::Opinion => "opinion",
            Self::Global => "global",
            Self::Default => "default",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Culture => Color::Rgb(0xc7, 0x00, 0x00),
            Self::ArtAndDesign => Color::Rgb(0xe0, 0x5e, 0x00),
            Self::Film => Color::Rgb(0xa1, 0x84, 0x5c),
            Self::Music => Color::Rgb(0x7d, 0x00, 0x68),
            Self::Education => Color::Rgb(0x00, 0x56, 0x89),
            Self::TelevisionAndRadio => Color::Rgb(0x00, 0x84, 0xc6),
            Self::Cities => Color::Rgb(0x22, 0x87, 0x4d),
            Self::LifeAndStyle => Color::Rgb(0xbb, 0x3b, 0x80),
            Self::Opinion => Color::Rgb(0xff, 0x7f, 0x0f),
            Self::Global => Color::Rgb(0x05, 0x29, 0x62),
            Self::Default => Color::DarkGray,
        }
    }

    /// Badge style: white text on the category color.
    pub fn badge_style(self) -> Style {
        Style::default().bg(self.color()).fg(Color::White)
    }
}
