//! Localization models — the six-language poem pack and the review-file records
//! that travel between the collect and render steps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod fetcher;
pub mod prompts;

pub use fetcher::{LlmPoemSource, PoemSource};

// ────────────────────────────────────────────────────────────────────────────
// Languages
// ────────────────────────────────────────────────────────────────────────────

/// The six card languages. Serialized as wire codes ("zh_cn", "en", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    ZhCn,
    ZhTw,
    En,
    Fr,
    De,
    Ru,
}

impl Language {
    /// All card languages, in the order cards are rendered.
    pub const ALL: [Language; 6] = [
        Language::ZhCn,
        Language::ZhTw,
        Language::En,
        Language::Fr,
        Language::De,
        Language::Ru,
    ];

    /// The wire/file code for this language ("zh_cn", "en", ...).
    pub fn code(&self) -> &'static str {
        match self {
            Language::ZhCn => "zh_cn",
            Language::ZhTw => "zh_tw",
            Language::En => "en",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Ru => "ru",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Poem models
// ────────────────────────────────────────────────────────────────────────────

/// One localized rendition of a poem. Missing fields default to empty strings;
/// the render step substitutes placeholders where needed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalizedPoem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    /// Verse only, paragraphs separated by line breaks. No title line.
    #[serde(default)]
    pub content: String,
}

/// The full six-language payload returned by the fetch collaborator for one poem,
/// plus an optional social-media caption.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoemPack {
    #[serde(default)]
    pub zh_cn: LocalizedPoem,
    #[serde(default)]
    pub zh_tw: LocalizedPoem,
    #[serde(default)]
    pub en: LocalizedPoem,
    #[serde(default)]
    pub fr: LocalizedPoem,
    #[serde(default)]
    pub de: LocalizedPoem,
    #[serde(default)]
    pub ru: LocalizedPoem,
    #[serde(default)]
    pub social_copy: Option<String>,
}

impl PoemPack {
    pub fn version(&self, lang: Language) -> &LocalizedPoem {
        match lang {
            Language::ZhCn => &self.zh_cn,
            Language::ZhTw => &self.zh_tw,
            Language::En => &self.en,
            Language::Fr => &self.fr,
            Language::De => &self.de,
            Language::Ru => &self.ru,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Review file records
// ────────────────────────────────────────────────────────────────────────────

/// One entry of the poem list consumed by the collect step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoemInput {
    pub title: String,
    pub author: String,
}

/// One collected poem as persisted in the review file. The original input is kept
/// alongside the localized versions so the render step can name output folders
/// after the title the operator asked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub input: PoemInput,
    pub collected_at: DateTime<Utc>,
    pub versions: PoemPack,
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
