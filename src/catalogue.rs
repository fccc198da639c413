// src/catalogue.rs
//! Category catalogue: the static mapping of category → news sources, meme
//! sources, and relevance keywords. Read-only after initialization; a TOML
//! file can override the built-in table (env path → config/ → built-in).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CATALOGUE_CONFIG_PATH: &str = "config/catalogue.toml";
pub const ENV_CATALOGUE_CONFIG_PATH: &str = "CATALOGUE_CONFIG_PATH";

/// Content domains. Finite set; drives which sources and keywords apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Sports,
    Persona,
    Entertainment,
    Ads,
    Politics,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Sports,
        Category::Persona,
        Category::Entertainment,
        Category::Ads,
        Category::Politics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sports => "sports",
            Category::Persona => "persona",
            Category::Entertainment => "entertainment",
            Category::Ads => "ads",
            Category::Politics => "politics",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sports" => Some(Category::Sports),
            "persona" => Some(Category::Persona),
            "entertainment" => Some(Category::Entertainment),
            "ads" => Some(Category::Ads),
            "politics" => Some(Category::Politics),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryEntry {
    pub news_sources: Vec<String>,
    pub meme_sources: Vec<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogueFile {
    categories: HashMap<String, CategoryEntry>,
}

/// The catalogue itself. One entry per category; lookups return empty slices
/// for categories an override file chose to leave out.
#[derive(Debug, Clone)]
pub struct Catalogue {
    entries: HashMap<Category, CategoryEntry>,
}

static EMPTY: &[String] = &[];

impl Catalogue {
    /// The built-in table. Keyword membership is a product decision;
    /// tests pin these lists literally.
    pub fn builtin() -> Self {
        fn entry(news: &[&str], memes: &[&str], keywords: &[&str]) -> CategoryEntry {
            CategoryEntry {
                news_sources: news.iter().map(|s| s.to_string()).collect(),
                meme_sources: memes.iter().map(|s| s.to_string()).collect(),
                keywords: keywords.iter().map(|s| s.to_string()).collect(),
            }
        }

        let mut entries = HashMap::new();
        entries.insert(
            Category::Sports,
            entry(
                &["sports", "Cricket", "soccer"],
                &["CricketShitpost", "soccercirclejerk", "sportsmemes"],
                &[
                    "cricket",
                    "ipl",
                    "football",
                    "world cup",
                    "olympics",
                    "championship",
                    "series",
                    "trophy",
                ],
            ),
        );
        entries.insert(
            Category::Persona,
            entry(
                &["elonmusk", "spacex", "teslamotors"],
                &["SpaceXMasterrace", "elonmemes"],
                &["musk", "elon", "tesla", "spacex", "starship", "neuralink"],
            ),
        );
        entries.insert(
            Category::Entertainment,
            entry(
                &["entertainment", "movies", "television"],
                &["moviememes", "PrequelMemes"],
                &[
                    "movie",
                    "film",
                    "trailer",
                    "box office",
                    "netflix",
                    "album",
                    "concert",
                    "premiere",
                ],
            ),
        );
        entries.insert(
            Category::Ads,
            entry(
                &["advertising", "marketing"],
                &["CommercialMemes", "funnyads"],
                &[
                    "advertisement",
                    "campaign",
                    "brand",
                    "commercial",
                    "billboard",
                    "sponsor",
                ],
            ),
        );
        entries.insert(
            Category::Politics,
            entry(
                &["politics", "worldnews"],
                &["PoliticalHumor", "politicalmemes"],
                &[
                    "election",
                    "parliament",
                    "senate",
                    "government",
                    "minister",
                    "policy",
                    "vote",
                    "president",
                ],
            ),
        );
        Self { entries }
    }

    /// Load from a TOML string. Unknown category names are an error rather
    /// than silently ignored config.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let file: CatalogueFile = toml::from_str(toml_str).context("parsing catalogue toml")?;
        let mut entries = HashMap::new();
        for (name, entry) in file.categories {
            let category = Category::parse(&name)
                .ok_or_else(|| anyhow::anyhow!("unknown category `{name}` in catalogue"))?;
            entries.insert(category, entry);
        }
        Ok(Self { entries })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading catalogue from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Resolve in order: $CATALOGUE_CONFIG_PATH, config/catalogue.toml,
    /// then the built-in table.
    pub fn from_env() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CATALOGUE_CONFIG_PATH) {
            return Self::from_file(&PathBuf::from(p));
        }
        let default = PathBuf::from(DEFAULT_CATALOGUE_CONFIG_PATH);
        if default.exists() {
            return Self::from_file(&default);
        }
        Ok(Self::builtin())
    }

    pub fn news_sources(&self, category: Category) -> &[String] {
        self.entries
            .get(&category)
            .map(|e| e.news_sources.as_slice())
            .unwrap_or(EMPTY)
    }

    pub fn meme_sources(&self, category: Category) -> &[String] {
        self.entries
            .get(&category)
            .map(|e| e.meme_sources.as_slice())
            .unwrap_or(EMPTY)
    }

    pub fn keywords(&self, category: Category) -> &[String] {
        self.entries
            .get(&category)
            .map(|e| e.keywords.as_slice())
            .unwrap_or(EMPTY)
    }

    /// Total number of configured news sources across categories.
    pub fn news_source_count(&self) -> usize {
        self.entries.values().map(|e| e.news_sources.len()).sum()
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::builtin()
    }
}
