//! Console color theme, stored next to the session in durable storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Light or dark presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    Light,
    /// Dark theme, used when nothing valid is stored.
    #[default]
    Dark,
}

impl Theme {
    /// Return the theme as its stored string literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Read a stored value, falling back to the default for anything unknown.
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Theme {
    type Err = crate::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(crate::AppError::validation(format!(
                "Invalid theme: '{s}'. Expected 'light' or 'dark'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stored_defaults_to_dark() {
        assert_eq!(Theme::from_stored(None), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("sepia")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
    }
}
