use serde::Deserialize;

use crate::color::Color;

// ---------------------------------------------------------------------------
// Custom Color deserialization
// ---------------------------------------------------------------------------

/// Deserialize an `Option<Color>` from a TOML string value.
pub(crate) mod color_de {
    use serde::{self, Deserialize, Deserializer};

    use crate::color::Color;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            None => Ok(None),
            Some(s) => Color::parse(&s, "<theme>")
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub defaults: Defaults,
    pub theme: Theme,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// App deployed to when `--app` is not given on the command line.
    pub app: Option<String>,
    /// Branch recorded with a deploy when `--branch` is not given.
    pub branch: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            app: None,
            branch: "main".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub colors: ColorsTheme,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColorsTheme {
    #[serde(with = "color_de")]
    pub text_primary: Option<Color>,
    #[serde(with = "color_de")]
    pub text_secondary: Option<Color>,
    #[serde(with = "color_de")]
    pub text_faint: Option<Color>,
    #[serde(with = "color_de")]
    pub text_success: Option<Color>,
    #[serde(with = "color_de")]
    pub text_warning: Option<Color>,
    #[serde(with = "color_de")]
    pub text_error: Option<Color>,
    #[serde(with = "color_de")]
    pub border_primary: Option<Color>,
    #[serde(with = "color_de")]
    pub border_faint: Option<Color>,
    #[serde(with = "color_de")]
    pub accent: Option<Color>,
}
