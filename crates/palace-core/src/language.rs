//! Supported translation targets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A language a generated scene can be translated into.
///
/// English is the default and the language scenes are generated in, so
/// selecting it disables translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    /// English (`en`).
    #[default]
    En,
    /// Hindi (`hi`).
    Hi,
    /// Tamil (`ta`).
    Ta,
    /// Telugu (`te`).
    Te,
    /// Kannada (`kn`).
    Kn,
    /// Bengali (`bn`).
    Bn,
    /// Marathi (`mr`).
    Mr,
    /// Gujarati (`gu`).
    Gu,
    /// Malayalam (`ml`).
    Ml,
    /// Punjabi (`pa`).
    Pa,
}

impl LanguageCode {
    /// Every supported language, in menu order.
    pub const ALL: [Self; 10] = [
        Self::En,
        Self::Hi,
        Self::Ta,
        Self::Te,
        Self::Kn,
        Self::Bn,
        Self::Mr,
        Self::Gu,
        Self::Ml,
        Self::Pa,
    ];

    /// ISO 639-1 code sent to the translation provider.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Ta => "ta",
            Self::Te => "te",
            Self::Kn => "kn",
            Self::Bn => "bn",
            Self::Mr => "mr",
            Self::Gu => "gu",
            Self::Ml => "ml",
            Self::Pa => "pa",
        }
    }

    /// English name shown in the language picker.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "Hindi",
            Self::Ta => "Tamil",
            Self::Te => "Telugu",
            Self::Kn => "Kannada",
            Self::Bn => "Bengali",
            Self::Mr => "Marathi",
            Self::Gu => "Gujarati",
            Self::Ml => "Malayalam",
            Self::Pa => "Punjabi",
        }
    }

    /// Whether scenes in this language must go through the translator.
    #[must_use]
    pub fn needs_translation(self) -> bool {
        self != Self::En
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::Validation(format!("unsupported language code: {s}")))
    }
}
