//! Localization: supported languages, translation keys and the active
//! dictionary handed to every renderer.

mod dictionary;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use self::dictionary::{EN_US, UK_UA};

/// Supported interface/content language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// English (United States).
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    /// Ukrainian.
    #[serde(rename = "uk-UA")]
    UkUa,
}

impl Language {
    /// All supported languages in toggle order.
    pub const ALL: [Self; 2] = [Self::EnUs, Self::UkUa];

    /// BCP 47 tag sent to TMDB.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::UkUa => "uk-UA",
        }
    }

    /// Short label shown on the language toggle.
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::EnUs => "EN",
            Self::UkUa => "UA",
        }
    }

    /// The language the toggle switches to.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::EnUs => Self::UkUa,
            Self::UkUa => Self::EnUs,
        }
    }

    /// Formats a `YYYY-MM-DD` date the way this language writes dates.
    ///
    /// Unparsable input is returned unchanged.
    #[must_use]
    pub fn format_date(self, date: &str) -> String {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_or_else(
            |_| String::from(date),
            |d| match self {
                Self::EnUs => d.format("%B %-d, %Y").to_string(),
                Self::UkUa => d.format("%d.%m.%Y").to_string(),
            },
        )
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let found = Self::ALL
            .into_iter()
            .find(|l| l.tag() == s || l.short_label().eq_ignore_ascii_case(s));
        match (found, s) {
            (Some(language), _) => Ok(language),
            (None, "uk") => Ok(Self::UkUa),
            (None, other) => bail!("unsupported language: {other} (expected en-US or uk-UA)"),
        }
    }
}

/// Every display string the interface needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum TranslationKey {
    SearchBarLang,
    SearchBarPoweredBy,
    SearchBarPlaceholder,
    SearchBarButton,
    SearchBarTrend,
    LoaderText,
    ErrorMainText,
    ToastBadRequest,
    ToastNoRequest,
    Genres,
    ReleaseDate,
    OriginalLanguage,
    Budget,
    Revenue,
    Rating,
    Popularity,
    Votes,
    Production,
    NotDescribed,
    NoBudget,
    NoRevenue,
    PagiNext,
    PagiPrev,
    YupMinQuery,
}

impl TranslationKey {
    /// All keys.
    pub const ALL: [Self; 24] = [
        Self::SearchBarLang,
        Self::SearchBarPoweredBy,
        Self::SearchBarPlaceholder,
        Self::SearchBarButton,
        Self::SearchBarTrend,
        Self::LoaderText,
        Self::ErrorMainText,
        Self::ToastBadRequest,
        Self::ToastNoRequest,
        Self::Genres,
        Self::ReleaseDate,
        Self::OriginalLanguage,
        Self::Budget,
        Self::Revenue,
        Self::Rating,
        Self::Popularity,
        Self::Votes,
        Self::Production,
        Self::NotDescribed,
        Self::NoBudget,
        Self::NoRevenue,
        Self::PagiNext,
        Self::PagiPrev,
        Self::YupMinQuery,
    ];

    /// Key name as used in configuration overrides.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SearchBarLang => "searchBar_lang",
            Self::SearchBarPoweredBy => "searchBar_poweredBy",
            Self::SearchBarPlaceholder => "searchBar_placeholder",
            Self::SearchBarButton => "searchBar_Button",
            Self::SearchBarTrend => "searchBar_Trend",
            Self::LoaderText => "loader_text",
            Self::ErrorMainText => "error_main_text",
            Self::ToastBadRequest => "toast_bad_request",
            Self::ToastNoRequest => "toast_no_request",
            Self::Genres => "genres",
            Self::ReleaseDate => "releaseDate",
            Self::OriginalLanguage => "originalLanguage",
            Self::Budget => "budget",
            Self::Revenue => "revenue",
            Self::Rating => "rating",
            Self::Popularity => "popularity",
            Self::Votes => "votes",
            Self::Production => "production",
            Self::NotDescribed => "notDescribed",
            Self::NoBudget => "noBudget",
            Self::NoRevenue => "noRevenue",
            Self::PagiNext => "pagiNext",
            Self::PagiPrev => "pagiPrev",
            Self::YupMinQuery => "yup_min_query",
        }
    }

    /// Looks a key up by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// Resolved key -> string mapping for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<TranslationKey, String>,
}

impl Dictionary {
    /// Built-in dictionary for a language.
    #[must_use]
    pub fn builtin(language: Language) -> Self {
        let table = match language {
            Language::EnUs => EN_US,
            Language::UkUa => UK_UA,
        };
        Self {
            entries: table
                .iter()
                .map(|(k, v)| (*k, String::from(*v)))
                .collect(),
        }
    }

    /// Built-in dictionary with user overrides applied.
    ///
    /// Unknown override keys are skipped with a warning.
    #[must_use]
    pub fn with_overrides(language: Language, overrides: &BTreeMap<String, String>) -> Self {
        let mut dict = Self::builtin(language);
        for (name, value) in overrides {
            match TranslationKey::from_name(name) {
                Some(key) => {
                    dict.entries.insert(key, value.clone());
                }
                None => {
                    tracing::warn!(language = %language, key = %name, "unknown translation key");
                }
            }
        }
        dict
    }

    /// Returns the string for `key` (the key name if missing).
    #[must_use]
    pub fn get(&self, key: TranslationKey) -> &str {
        self.entries.get(&key).map_or(key.name(), String::as_str)
    }
}

/// Active language plus its dictionary.
///
/// Both halves are replaced together on a language switch, so a reader
/// never sees a language tag paired with another language's strings.
#[derive(Debug, Clone)]
pub struct Localization {
    language: Language,
    texts: Arc<Dictionary>,
    overrides: Arc<BTreeMap<String, BTreeMap<String, String>>>,
}

impl Localization {
    /// Creates a localization with per-language overrides (keyed by tag).
    #[must_use]
    pub fn new(language: Language, overrides: BTreeMap<String, BTreeMap<String, String>>) -> Self {
        let overrides = Arc::new(overrides);
        let texts = Arc::new(Self::resolve(language, &overrides));
        Self {
            language,
            texts,
            overrides,
        }
    }

    fn resolve(
        language: Language,
        overrides: &BTreeMap<String, BTreeMap<String, String>>,
    ) -> Dictionary {
        overrides.get(language.tag()).map_or_else(
            || Dictionary::builtin(language),
            |o| Dictionary::with_overrides(language, o),
        )
    }

    /// Active language.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Looks `key` up in the active dictionary.
    #[must_use]
    pub fn t(&self, key: TranslationKey) -> &str {
        self.texts.get(key)
    }

    /// Switches the active language. Returns `true` if it changed.
    pub fn set_language(&mut self, language: Language) -> bool {
        if language == self.language {
            return false;
        }
        let texts = Arc::new(Self::resolve(language, &self.overrides));
        self.language = language;
        self.texts = texts;
        true
    }
}

impl Default for Localization {
    fn default() -> Self {
        Self::new(Language::default(), BTreeMap::new())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_builtin_dictionaries_are_complete() {
        for language in Language::ALL {
            // Arrange
            let table = match language {
                Language::EnUs => EN_US,
                Language::UkUa => UK_UA,
            };

            // Act & Assert
            for key in TranslationKey::ALL {
                assert!(
                    table.iter().any(|(k, v)| *k == key && !v.is_empty()),
                    "{language} is missing {}",
                    key.name()
                );
            }
            assert_eq!(table.len(), TranslationKey::ALL.len());
        }
    }

    #[test]
    fn test_key_names_round_trip() {
        for key in TranslationKey::ALL {
            assert_eq!(TranslationKey::from_name(key.name()), Some(key));
        }
        assert_eq!(TranslationKey::from_name("nope"), None);
    }

    #[test]
    fn test_language_parse_and_toggle() {
        // Arrange & Act
        let uk: Language = "uk-UA".parse().unwrap();

        // Assert
        assert_eq!(uk, Language::UkUa);
        assert_eq!(uk.next(), Language::EnUs);
        assert_eq!(Language::EnUs.next(), Language::UkUa);
        assert!("de-DE".parse::<Language>().is_err());
    }

    #[test]
    fn test_set_language_swaps_dictionary() {
        // Arrange
        let mut loc = Localization::default();
        let english = loc.t(TranslationKey::SearchBarButton).to_owned();

        // Act
        let changed = loc.set_language(Language::UkUa);

        // Assert
        assert!(changed);
        assert_eq!(loc.language(), Language::UkUa);
        assert_ne!(loc.t(TranslationKey::SearchBarButton), english);
        assert!(!loc.set_language(Language::UkUa));
    }

    #[test]
    fn test_overrides_apply_per_language() {
        // Arrange
        let mut en = BTreeMap::new();
        en.insert(String::from("loader_text"), String::from("Hang on..."));
        en.insert(String::from("bogus"), String::from("ignored"));
        let mut overrides = BTreeMap::new();
        overrides.insert(String::from("en-US"), en);

        // Act
        let mut loc = Localization::new(Language::EnUs, overrides);

        // Assert
        assert_eq!(loc.t(TranslationKey::LoaderText), "Hang on...");
        loc.set_language(Language::UkUa);
        assert_ne!(loc.t(TranslationKey::LoaderText), "Hang on...");
    }

    #[test]
    fn test_format_date_per_language() {
        // Arrange
        let date = "2010-07-15";

        // Act & Assert
        assert_eq!(Language::EnUs.format_date(date), "July 15, 2010");
        assert_eq!(Language::UkUa.format_date(date), "15.07.2010");
        assert_eq!(Language::EnUs.format_date(""), "");
        assert_eq!(Language::UkUa.format_date("2010"), "2010");
    }
}
