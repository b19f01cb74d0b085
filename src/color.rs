use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A user-configurable color: an ANSI-256 palette index or a hex RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Ansi256(u8),
    Hex { r: u8, g: u8, b: u8 },
}

/// Terminal color capability, detected from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDepth {
    #[default]
    TrueColor,
    Color256,
    Color16,
}

#[derive(Debug, Error)]
#[error("invalid color value for field \"{field}\": \"{value}\"")]
pub struct ColorParseError {
    pub field: String,
    pub value: String,
}

impl Color {
    /// Parse a color string with a field name for error reporting.
    ///
    /// Accepts `"0"`–`"255"` (ANSI-256 index) and `"#RRGGBB"`/`"#RGB"`.
    ///
    /// # Errors
    ///
    /// Returns `ColorParseError` if the string is not a valid color.
    pub fn parse(s: &str, field: &str) -> Result<Self, ColorParseError> {
        let make_err = || ColorParseError {
            field: field.to_owned(),
            value: s.to_owned(),
        };

        let Some(hex) = s.strip_prefix('#') else {
            let n: u16 = s.parse().map_err(|_| make_err())?;
            return u8::try_from(n).map(Color::Ansi256).map_err(|_| make_err());
        };

        let wide: String = match hex.len() {
            6 => hex.to_owned(),
            // "#abc" → "#aabbcc"
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(make_err()),
        };
        let r = u8::from_str_radix(&wide[0..2], 16).map_err(|_| make_err())?;
        let g = u8::from_str_radix(&wide[2..4], 16).map_err(|_| make_err())?;
        let b = u8::from_str_radix(&wide[4..6], 16).map_err(|_| make_err())?;
        Ok(Color::Hex { r, g, b })
    }

    /// Convert to a `crossterm::style::Color` at the given terminal depth.
    ///
    /// ANSI indices 0–15 always map to crossterm's named variants so the
    /// terminal renders them through its user-configured 16-color palette
    /// (SGR 30–37 / 90–97) rather than the 256-color palette.
    pub fn to_crossterm_color(self, depth: ColorDepth) -> crossterm::style::Color {
        match (depth, self) {
            (ColorDepth::TrueColor, Color::Hex { r, g, b }) => {
                crossterm::style::Color::Rgb { r, g, b }
            }
            (ColorDepth::Color256, Color::Hex { r, g, b }) => {
                crossterm::style::Color::AnsiValue(nearest_ansi256(r, g, b))
            }
            (ColorDepth::TrueColor | ColorDepth::Color256, Color::Ansi256(n)) => named_or_value(n),
            (ColorDepth::Color16, c) => {
                let (r, g, b) = c.rgb();
                named_or_value(nearest_ansi16(r, g, b))
            }
        }
    }

    fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Hex { r, g, b } => (r, g, b),
            Color::Ansi256(n) => ansi256_rgb(n),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Ansi256(n) => write!(f, "{n}"),
            Color::Hex { r, g, b } => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s, "<unknown>")
    }
}

impl ColorDepth {
    /// Detect terminal color depth from environment variables.
    pub fn detect() -> Self {
        if let Ok(ct) = std::env::var("COLORTERM")
            && (ct == "truecolor" || ct == "24bit")
        {
            return ColorDepth::TrueColor;
        }
        if let Ok(term) = std::env::var("TERM")
            && term.contains("256color")
        {
            return ColorDepth::Color256;
        }
        ColorDepth::Color16
    }
}

/// Indices 0–15 become crossterm's named variants; the rest pass through.
fn named_or_value(n: u8) -> crossterm::style::Color {
    use crossterm::style::Color;
    const NAMED: [Color; 16] = [
        Color::Black,
        Color::DarkRed,
        Color::DarkGreen,
        Color::DarkYellow,
        Color::DarkBlue,
        Color::DarkMagenta,
        Color::DarkCyan,
        Color::Grey,
        Color::DarkGrey,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];
    NAMED
        .get(usize::from(n))
        .copied()
        .unwrap_or(Color::AnsiValue(n))
}

/// Approximate RGB for an ANSI-256 index.
fn ansi256_rgb(n: u8) -> (u8, u8, u8) {
    match n {
        // Standard 16: dark variants at 128, bright at 255, silver special-cased.
        7 => (192, 192, 192),
        0..=15 => {
            let v = if n < 8 { 128 } else { 255 };
            let bits = n % 8;
            (
                if bits & 1 != 0 { v } else { 0 },
                if bits & 2 != 0 { v } else { 0 },
                if bits & 4 != 0 { v } else { 0 },
            )
        }
        // 6x6x6 color cube.
        16..=231 => {
            let idx = n - 16;
            let level = |i: u8| if i == 0 { 0 } else { 55 + 40 * i };
            (level(idx / 36), level((idx / 6) % 6), level(idx % 6))
        }
        // Grayscale ramp.
        232..=255 => {
            let v = 8 + 10 * (n - 232);
            (v, v, v)
        }
    }
}

/// Nearest ANSI-256 index (cube or grayscale ramp) for an RGB color.
fn nearest_ansi256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        return match r {
            0..=7 => 16,
            249..=255 => 231,
            v => 232 + ((u16::from(v) - 8) / 10).min(23) as u8,
        };
    }
    let step = |v: u8| -> u8 {
        match v {
            0..=47 => 0,
            48..=114 => 1,
            v => ((u16::from(v) - 35) / 40).min(5) as u8,
        }
    };
    16 + 36 * step(r) + 6 * step(g) + step(b)
}

/// Nearest standard-16 index for an RGB color, by channel thresholding.
fn nearest_ansi16(r: u8, g: u8, b: u8) -> u8 {
    let base = u8::from(r > 128) | (u8::from(g > 128) << 1) | (u8::from(b > 128) << 2);
    let bright = (u16::from(r) + u16::from(g) + u16::from(b)) / 3 > 128;
    if bright { base + 8 } else { base }
}
