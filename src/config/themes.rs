use ratatui::style::Color;

use super::ThemeName;

/// Colours the renderer pulls from the configured theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub heading: Color,
    pub highlight: Color,
    pub muted: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub warning: Color,
}

impl Palette {
    pub fn for_theme(theme: ThemeName) -> Self {
        match theme {
            ThemeName::Dark => Self {
                accent: Color::Cyan,
                heading: Color::Magenta,
                highlight: Color::Yellow,
                muted: Color::Gray,
                selection_bg: Color::Blue,
                selection_fg: Color::Black,
                warning: Color::Red,
            },
            ThemeName::Light => Self {
                accent: Color::Blue,
                heading: Color::Magenta,
                highlight: Color::Red,
                muted: Color::DarkGray,
                selection_bg: Color::LightBlue,
                selection_fg: Color::Black,
                warning: Color::Red,
            },
            ThemeName::HighContrast => Self {
                accent: Color::White,
                heading: Color::LightYellow,
                highlight: Color::LightYellow,
                muted: Color::White,
                selection_bg: Color::White,
                selection_fg: Color::Black,
                warning: Color::LightRed,
            },
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(ThemeName::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_have_distinct_selection_colours() {
        let dark = Palette::for_theme(ThemeName::Dark);
        let light = Palette::for_theme(ThemeName::Light);
        assert_ne!(dark.selection_bg, light.selection_bg);
        assert_eq!(Palette::default(), dark);
    }
}
