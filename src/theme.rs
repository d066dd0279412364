//! Theme provider: color palette plus the light/dark scheme flag.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ThemeConfig};

/// Light or dark appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Dark,
    Light,
}

/// Resolved UI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub primary: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_inverse: Color,
    pub error: Color,
    pub success: Color,
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

impl Palette {
    /// Built-in palette for `scheme`.
    pub const fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Dark => Self {
                background: rgb(0x12_10_18),
                surface: rgb(0x1e_1a_2b),
                primary: rgb(0x7c_5c_ff),
                text_primary: rgb(0xf2_f0_f7),
                text_secondary: rgb(0xa3_9f_b3),
                text_inverse: rgb(0xff_ff_ff),
                error: rgb(0xff_5c_7a),
                success: rgb(0x4c_d6_8a),
            },
            ColorScheme::Light => Self {
                background: rgb(0xfa_f9_ff),
                surface: rgb(0xee_eb_fa),
                primary: rgb(0x5b_3d_f5),
                text_primary: rgb(0x1b_17_26),
                text_secondary: rgb(0x5e_5a_6e),
                text_inverse: rgb(0xff_ff_ff),
                error: rgb(0xd6_2d_4f),
                success: rgb(0x1f_9d_5a),
            },
        }
    }
}

/// Palette and scheme, read-only for the screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub scheme: ColorScheme,
    pub palette: Palette,
}

impl Theme {
    pub fn new(scheme: ColorScheme) -> Self {
        Self {
            scheme,
            palette: Palette::for_scheme(scheme),
        }
    }

    /// Resolve a theme from configuration, applying palette overrides.
    pub fn from_config(config: &ThemeConfig) -> Result<Self, ConfigError> {
        let mut theme = Self::new(config.scheme);
        let overrides = &config.palette;
        let palette = &mut theme.palette;

        let slots: [(&'static str, &Option<String>, &mut Color); 8] = [
            ("theme.palette.background", &overrides.background, &mut palette.background),
            ("theme.palette.surface", &overrides.surface, &mut palette.surface),
            ("theme.palette.primary", &overrides.primary, &mut palette.primary),
            ("theme.palette.text_primary", &overrides.text_primary, &mut palette.text_primary),
            ("theme.palette.text_secondary", &overrides.text_secondary, &mut palette.text_secondary),
            ("theme.palette.text_inverse", &overrides.text_inverse, &mut palette.text_inverse),
            ("theme.palette.error", &overrides.error, &mut palette.error),
            ("theme.palette.success", &overrides.success, &mut palette.success),
        ];

        for (key, value, slot) in slots {
            if let Some(value) = value {
                *slot = parse_color(value).map_err(|reason| ConfigError::InvalidColor {
                    key,
                    value: value.clone(),
                    reason,
                })?;
            }
        }

        Ok(theme)
    }

    pub fn is_dark(&self) -> bool {
        self.scheme == ColorScheme::Dark
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ColorScheme::default())
    }
}

/// Parse any CSS color (hex, rgb(), hsl(), named) into a terminal color.
pub fn parse_color(s: &str) -> Result<Color, String> {
    let color = s
        .parse::<csscolorparser::Color>()
        .map_err(|e| e.to_string())?;
    let [r, g, b, _] = color.to_rgba8();
    Ok(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaletteOverrides;

    #[test]
    fn hex_and_named_colors_parse() {
        assert_eq!(parse_color("#7c5cff"), Ok(Color::Rgb(0x7c, 0x5c, 0xff)));
        assert_eq!(parse_color("white"), Ok(Color::Rgb(255, 255, 255)));
        assert!(parse_color("not-a-color").is_err());
    }

    #[test]
    fn overrides_replace_only_named_slots() {
        let config = ThemeConfig {
            scheme: ColorScheme::Light,
            palette: PaletteOverrides {
                primary: Some("rgb(1, 2, 3)".to_string()),
                ..Default::default()
            },
        };
        let theme = Theme::from_config(&config).unwrap();
        let defaults = Palette::for_scheme(ColorScheme::Light);
        assert!(!theme.is_dark());
        assert_eq!(theme.palette.primary, Color::Rgb(1, 2, 3));
        assert_eq!(theme.palette.surface, defaults.surface);
    }

    #[test]
    fn invalid_override_names_the_key() {
        let config = ThemeConfig {
            palette: PaletteOverrides {
                error: Some("bogus".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = Theme::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("theme.palette.error"));
    }
}
