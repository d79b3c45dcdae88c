// Particle colors and the light/dark theme that picks them

use std::error::Error;
use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    // CSS color string, suitable for a canvas fill style
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const LIGHT_PARTICLE: Color = Color {
        r: 150,
        g: 50,
        b: 75,
        a: 0.3,
    };
    pub const DARK_PARTICLE: Color = Color {
        r: 200,
        g: 200,
        b: 200,
        a: 0.5,
    };

    pub fn particle_color(self) -> Color {
        match self {
            Theme::Light => Theme::LIGHT_PARTICLE,
            Theme::Dark => Theme::DARK_PARTICLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThemeError {
    value: String,
}

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme '{}', expected 'light' or 'dark'", self.value)
    }
}

impl Error for ParseThemeError {}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ParseThemeError {
                value: s.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_colors_render_as_css() {
        assert_eq!(
            Theme::Dark.particle_color().to_css(),
            "rgba(200, 200, 200, 0.5)"
        );
        assert_eq!(
            Theme::Light.particle_color().to_css(),
            "rgba(150, 50, 75, 0.3)"
        );
    }

    #[test]
    fn parses_theme_names() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(" Light ".parse::<Theme>(), Ok(Theme::Light));
        let err = "sepia".parse::<Theme>().unwrap_err();
        assert!(err.to_string().contains("sepia"));
    }
}
