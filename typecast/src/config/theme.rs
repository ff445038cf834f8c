use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use terminal_colorsaurus::QueryOptions;

/// General theme
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    pub text: Color,
    pub title: Color,
    pub border: Color,
    pub cursor: CursorTheme,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let terminal_palette = terminal_colorsaurus::color_palette(QueryOptions::default()).ok();

        let text = if let Some(palette) = terminal_palette {
            let fg = palette.foreground.scale_to_8bit();
            Color::Rgb(fg.0, fg.1, fg.2)
        } else {
            Color::Rgb(255, 255, 255)
        };

        Self {
            text,
            title: Color::Yellow,
            border: Color::DarkGray,
            cursor: CursorTheme::default(),
            error: Color::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CursorTheme {
    pub color: Color,
    pub symbol: String,
}

impl Default for CursorTheme {
    fn default() -> Self {
        Self {
            color: Color::White,
            symbol: "▌".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_defaults() {
        let cursor = CursorTheme::default();
        assert_eq!(cursor.color, Color::White);
        assert_eq!(cursor.symbol, "▌");
    }

    #[test]
    fn test_theme_toml() {
        let theme = Theme {
            text: Color::Rgb(200, 180, 20),
            title: Color::Cyan,
            border: Color::DarkGray,
            cursor: CursorTheme {
                color: Color::Green,
                symbol: "_".to_string(),
            },
            error: Color::LightRed,
        };

        let serialized = toml::to_string(&theme).unwrap();
        let parsed: Theme = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, theme);

        let cursor: CursorTheme = toml::from_str(r#"symbol = "|""#).unwrap();
        assert_eq!(cursor.symbol, "|");
        assert_eq!(cursor.color, Color::White);
    }
}
