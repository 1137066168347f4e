//! Fixed presets offered to users, and the configurable subset that is enabled.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::language::LanguageCode;

/// A memory palace location the user can pick instead of typing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPreset {
    /// The user's home.
    Home,
    /// The user's school.
    School,
    /// A video game world.
    GameWorld,
    /// A library.
    Library,
}

impl LocationPreset {
    /// Every preset, in menu order.
    pub const ALL: [Self; 4] = [Self::Home, Self::School, Self::GameWorld, Self::Library];

    /// Label embedded in the prompt and stored on the palace record.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "🏠 My Home",
            Self::School => "🏫 My School",
            Self::GameWorld => "🎮 Game World",
            Self::Library => "📚 Library",
        }
    }
}

/// Where a palace is placed: a preset, or a place the user describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PalaceLocation {
    /// One of the fixed presets.
    Preset(LocationPreset),
    /// Free text typed by the user.
    Custom(String),
}

impl PalaceLocation {
    /// The text that goes into the prompt and onto the record.
    #[must_use]
    pub fn describe(&self) -> &str {
        match self {
            Self::Preset(preset) => preset.label(),
            Self::Custom(text) => text.trim(),
        }
    }
}

/// Selectable avatar. Each maps to a `DiceBear` adventurer image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvatarPreset {
    Lion,
    Tiger,
    Dragon,
    Monkey,
    Phoenix,
    Wolf,
    Bear,
    Cat,
    Dog,
    Fox,
}

impl AvatarPreset {
    /// Every avatar, in menu order.
    pub const ALL: [Self; 10] = [
        Self::Lion,
        Self::Tiger,
        Self::Dragon,
        Self::Monkey,
        Self::Phoenix,
        Self::Wolf,
        Self::Bear,
        Self::Cat,
        Self::Dog,
        Self::Fox,
    ];

    /// Seed name used in the image URL.
    #[must_use]
    pub fn seed(self) -> &'static str {
        match self {
            Self::Lion => "Lion",
            Self::Tiger => "Tiger",
            Self::Dragon => "Dragon",
            Self::Monkey => "Monkey",
            Self::Phoenix => "Phoenix",
            Self::Wolf => "Wolf",
            Self::Bear => "Bear",
            Self::Cat => "Cat",
            Self::Dog => "Dog",
            Self::Fox => "Fox",
        }
    }

    /// Picker label with its emoji.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Lion => "🦁 Lion",
            Self::Tiger => "🐯 Tiger",
            Self::Dragon => "🐉 Dragon",
            Self::Monkey => "🐵 Monkey",
            Self::Phoenix => "🔥 Phoenix",
            Self::Wolf => "🐺 Wolf",
            Self::Bear => "🐻 Bear",
            Self::Cat => "🐱 Cat",
            Self::Dog => "🐶 Dog",
            Self::Fox => "🦊 Fox",
        }
    }

    /// Avatar reference stored on the profile.
    #[must_use]
    pub fn url(self) -> String {
        format!(
            "https://api.dicebear.com/7.x/adventurer/svg?seed={}",
            self.seed()
        )
    }
}

impl FromStr for AvatarPreset {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|avatar| avatar.seed().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::Validation(format!("unknown avatar: {s}")))
    }
}

/// The languages and avatars this deployment offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    languages: Vec<LanguageCode>,
    avatars: Vec<AvatarPreset>,
}

impl Catalog {
    /// Builds a catalog from the enabled subsets. An empty list enables
    /// every language or every avatar. English is always kept, since it is
    /// the language scenes are generated in.
    #[must_use]
    pub fn new(languages: Vec<LanguageCode>, avatars: Vec<AvatarPreset>) -> Self {
        let enabled_languages = if languages.is_empty() {
            LanguageCode::ALL.to_vec()
        } else {
            LanguageCode::ALL
                .into_iter()
                .filter(|lang| *lang == LanguageCode::En || languages.contains(lang))
                .collect()
        };

        let enabled_avatars = if avatars.is_empty() {
            AvatarPreset::ALL.to_vec()
        } else {
            AvatarPreset::ALL
                .into_iter()
                .filter(|avatar| avatars.contains(avatar))
                .collect()
        };

        Self {
            languages: enabled_languages,
            avatars: enabled_avatars,
        }
    }

    /// Enabled languages, English first.
    #[must_use]
    pub fn languages(&self) -> &[LanguageCode] {
        &self.languages
    }

    /// Enabled avatars.
    #[must_use]
    pub fn avatars(&self) -> &[AvatarPreset] {
        &self.avatars
    }

    /// Fails with a validation error unless `lang` is enabled.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a disabled language.
    pub fn require_language(&self, lang: LanguageCode) -> Result<LanguageCode, DomainError> {
        if self.languages.contains(&lang) {
            Ok(lang)
        } else {
            Err(DomainError::Validation(format!(
                "language {} is not available",
                lang.display_name()
            )))
        }
    }

    /// Fails with a validation error unless `avatar` is enabled.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a disabled avatar.
    pub fn require_avatar(&self, avatar: AvatarPreset) -> Result<AvatarPreset, DomainError> {
        if self.avatars.contains(&avatar) {
            Ok(avatar)
        } else {
            Err(DomainError::Validation(format!(
                "avatar {} is not available",
                avatar.seed()
            )))
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(LanguageCode::ALL.to_vec(), AvatarPreset::ALL.to_vec())
    }
}
