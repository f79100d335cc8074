// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! User language detection

use std::env;

/// Environment variables consulted by [`LanguageHints::from_env`], most specific first
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Language hints of the host environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageHints {
    /// Language the host document declares
    pub document_language: Option<String>,
    /// Languages negotiated by the runtime, most preferred first
    pub negotiated: Vec<String>,
}

impl LanguageHints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the declared document language
    pub fn document_language(mut self, lang: impl Into<String>) -> Self {
        self.document_language = Some(lang.into());
        self
    }

    /// Append a negotiated language
    pub fn negotiated(mut self, lang: impl Into<String>) -> Self {
        self.negotiated.push(lang.into());
        self
    }

    /// Read the negotiated list from the POSIX locale environment.
    ///
    /// `LANGUAGE` (a colon-separated priority list) comes first, followed by
    /// the first of `LC_ALL`, `LC_MESSAGES` and `LANG` that is set.
    pub fn from_env() -> Self {
        let mut negotiated: Vec<String> = env::var("LANGUAGE")
            .map(|list| {
                list.split(':')
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if let Some(locale) = LOCALE_VARS
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|v| !v.is_empty())
        {
            negotiated.push(locale);
        }

        negotiated.retain(|l| l != "C" && l != "POSIX" && !l.starts_with("C."));

        Self {
            document_language: None,
            negotiated,
        }
    }

    /// Detected user languages as two-letter primary subtags.
    ///
    /// The document language leads, followed by the negotiated list.
    /// Duplicates are dropped, keeping the first occurrence.
    pub fn user_languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = Vec::new();

        for lang in self
            .document_language
            .iter()
            .chain(self.negotiated.iter())
            .filter_map(|l| primary_subtag(l))
        {
            if !languages.contains(&lang) {
                languages.push(lang);
            }
        }

        languages
    }
}

/// `de-CH`, `de_CH.UTF-8` and `DE` all become `de`
fn primary_subtag(tag: &str) -> Option<String> {
    let primary = tag
        .trim()
        .split(['-', '_', '.', '@'])
        .next()
        .unwrap_or_default();

    let subtag: String = primary
        .chars()
        .take(2)
        .collect::<String>()
        .to_ascii_lowercase();

    if subtag.is_empty() {
        None
    } else {
        Some(subtag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_language_leads() {
        let hints = LanguageHints::new()
            .document_language("fr")
            .negotiated("de-CH")
            .negotiated("de")
            .negotiated("en-US")
            .negotiated("fr-FR");

        assert_eq!(hints.user_languages(), vec!["fr", "de", "en"]);
    }

    #[test]
    fn test_document_language_is_shortened() {
        let hints = LanguageHints::new()
            .document_language("de-CH")
            .negotiated("de");
        assert_eq!(hints.user_languages(), vec!["de"]);

        let hints = LanguageHints::new().document_language("PT_br");
        assert_eq!(hints.user_languages(), vec!["pt"]);
    }

    #[test]
    fn test_posix_locales() {
        let hints = LanguageHints::new()
            .negotiated("de_CH.UTF-8")
            .negotiated("en@euro");
        assert_eq!(hints.user_languages(), vec!["de", "en"]);
    }

    #[test]
    fn test_empty_hints() {
        assert!(LanguageHints::default().user_languages().is_empty());
        assert!(LanguageHints::new()
            .document_language("  ")
            .user_languages()
            .is_empty());
    }
}
