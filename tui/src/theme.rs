use anyhow::{Context, Result, anyhow};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// User-facing color configuration, as written in a theme file.
///
/// Every field is optional in the file; missing ones keep the default (gruvbox dark) value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    pub background: String,
    pub panel_border: String,
    pub primary_text: String,
    pub secondary_text: String,
    pub score_text: String,
    pub active_border: String,
    pub cell_background: String,
    pub cell_border: String,
    pub cell_empty: String,
    pub mine_background: String,
    pub mine: String,
    pub flag: String,
    /// Colors for 1 through 8.
    pub numbers: [String; 8],
}

impl Default for Theme {
    fn default() -> Self {
        let s = |value: &str| value.to_string();
        Self {
            background: s("#282828"),
            panel_border: s("#928374"),
            primary_text: s("#ebdbb2"),
            secondary_text: s("#a89984"),
            score_text: s("#d3869b"),
            active_border: s("#8ec07c"),
            cell_background: s("#bdae93"),
            cell_border: s("#d5c4a1"),
            cell_empty: s("#1d2021"),
            mine_background: s("#cc241d"),
            mine: s("#282828"),
            flag: s("#fb4934"),
            numbers: [
                s("#fb4934"),
                s("#b8bb26"),
                s("#fabd2f"),
                s("#83a598"),
                s("#d3869b"),
                s("#8ec07c"),
                s("#fe8019"),
                s("#b16286"),
            ],
        }
    }
}

impl Theme {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read theme file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid theme file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn palette(&self) -> Result<Palette> {
        let mut numbers = [Color::Reset; 8];
        for (slot, value) in numbers.iter_mut().zip(&self.numbers) {
            *slot = parse_color("numbers", value)?;
        }

        Ok(Palette {
            background: parse_color("background", &self.background)?,
            panel_border: parse_color("panel_border", &self.panel_border)?,
            primary_text: parse_color("primary_text", &self.primary_text)?,
            secondary_text: parse_color("secondary_text", &self.secondary_text)?,
            score_text: parse_color("score_text", &self.score_text)?,
            active_border: parse_color("active_border", &self.active_border)?,
            cell_background: parse_color("cell_background", &self.cell_background)?,
            cell_border: parse_color("cell_border", &self.cell_border)?,
            cell_empty: parse_color("cell_empty", &self.cell_empty)?,
            mine_background: parse_color("mine_background", &self.mine_background)?,
            mine: parse_color("mine", &self.mine)?,
            flag: parse_color("flag", &self.flag)?,
            numbers,
        })
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color> {
    Color::from_str(value).map_err(|_| anyhow!("invalid color {:?} for `{}`", value, field))
}

/// Resolved colors, handed to the renderer when it is constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub panel_border: Color,
    pub primary_text: Color,
    pub secondary_text: Color,
    pub score_text: Color,
    pub active_border: Color,
    pub cell_background: Color,
    pub cell_border: Color,
    pub cell_empty: Color,
    pub mine_background: Color,
    pub mine: Color,
    pub flag: Color,
    pub numbers: [Color; 8],
}

impl Palette {
    /// Color for an adjacent-mine count in `1..=8`.
    pub fn number(&self, count: u8) -> Color {
        usize::from(count)
            .checked_sub(1)
            .and_then(|index| self.numbers.get(index))
            .copied()
            .unwrap_or(self.primary_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_resolves() {
        let palette = Theme::default().palette().unwrap();
        assert_eq!(palette.background, Color::Rgb(0x28, 0x28, 0x28));
        assert_eq!(palette.number(1), Color::Rgb(0xfb, 0x49, 0x34));
        assert_eq!(palette.number(8), Color::Rgb(0xb1, 0x62, 0x86));
        assert_eq!(palette.number(0), palette.primary_text);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let theme = Theme::from_toml("background = \"#000000\"\nflag = \"yellow\"\n").unwrap();
        let palette = theme.palette().unwrap();

        assert_eq!(palette.background, Color::Rgb(0, 0, 0));
        assert_eq!(palette.flag, Color::Yellow);
        assert_eq!(theme.panel_border, Theme::default().panel_border);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_colors() {
        assert!(Theme::from_toml("backgrund = \"#000000\"").is_err());

        let theme = Theme::from_toml("mine = \"not-a-color\"").unwrap();
        let err = theme.palette().unwrap_err();
        assert!(err.to_string().contains("`mine`"));
    }
}
