//! UI language and color theme.
//!
//! French is the primary language, Arabic the secondary one; every bilingual
//! record carries both texts and callers pick one with [`Locale::pick`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    Ar,
}

impl Locale {
    pub const fn code(&self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::Ar => "ar",
        }
    }

    /// Parses a language tag such as `ar`, `ar-DZ` or `fr-FR`.
    /// Anything not Arabic falls back to French.
    pub fn from_tag(tag: &str) -> Locale {
        let primary = tag
            .split([',', ';', '-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if primary == "ar" { Locale::Ar } else { Locale::Fr }
    }

    pub const fn is_rtl(&self) -> bool {
        matches!(self, Locale::Ar)
    }

    /// Value of the HTML `dir` attribute.
    pub const fn dir(&self) -> &'static str {
        if self.is_rtl() { "rtl" } else { "ltr" }
    }

    pub fn pick<'a>(&self, fr: &'a str, ar: &'a str) -> &'a str {
        match self {
            Locale::Fr => fr,
            Locale::Ar if ar.is_empty() => fr,
            Locale::Ar => ar,
        }
    }

    pub const fn toggled(&self) -> Locale {
        match self {
            Locale::Fr => Locale::Ar,
            Locale::Ar => Locale::Fr,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}
