//! Static song and locale tables.
//!
//! The catalog is a data asset: a JSON document mapping country codes to a
//! language/locale pair, plus song pools per mood, both globally and per
//! country. It is parsed once at start-up and only read afterwards.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, bail};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
}

impl Mood {
    pub const ALL: [Mood; 3] = [Mood::Happy, Mood::Sad, Mood::Angry];
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMood(pub String);

impl fmt::Display for UnknownMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mood '{}'", self.0)
    }
}

impl std::error::Error for UnknownMood {}

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "sad" => Ok(Mood::Sad),
            "angry" => Ok(Mood::Angry),
            _ => Err(UnknownMood(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub lang: String,
    pub locale: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            locale: "en-US".to_string(),
        }
    }
}

impl Locale {
    /// Region half of the locale tag, e.g. `FR` for `fr-FR`.
    pub fn region(&self) -> &str {
        self.locale
            .split_once('-')
            .map(|(_, region)| region)
            .unwrap_or("US")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongEntry {
    pub title: String,
    pub artist: String,
    pub media_id: String,
    pub reason: String,
}

type MoodPools = HashMap<Mood, Vec<SongEntry>>;

#[derive(Debug, Deserialize)]
struct SongTable {
    global: MoodPools,
    #[serde(default)]
    regions: HashMap<String, MoodPools>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    locales: HashMap<String, Locale>,
    songs: SongTable,
}

/// Read-only mood/locale lookup tables
#[derive(Debug)]
pub struct SongCatalog {
    locales: HashMap<String, Locale>,
    global: MoodPools,
    regions: HashMap<String, MoodPools>,
}

impl SongCatalog {
    /// Catalog compiled into the binary
    pub fn embedded() -> anyhow::Result<Self> {
        Self::from_json(EMBEDDED_CATALOG).context("Embedded song catalog is invalid")
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read song catalog {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Song catalog {} is invalid", path.display()))
    }

    /// Uses `path` when given, the embedded catalog otherwise
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let file: CatalogFile = serde_json::from_str(raw)?;

        for mood in Mood::ALL {
            if file.songs.global.get(&mood).is_none_or(|pool| pool.is_empty()) {
                bail!("global pool for mood '{}' is missing or empty", mood);
            }
        }

        Ok(Self {
            locales: lowercase_keys(file.locales),
            global: file.songs.global,
            regions: lowercase_keys(file.songs.regions),
        })
    }

    /// Language and locale for a country, English/US when unmapped
    pub fn locale_for(&self, country_code: &str) -> Locale {
        self.locales
            .get(&country_code.to_ascii_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    /// Songs that may be picked for this mood and country: the regional pool
    /// when there is a non-empty one, the global pool otherwise
    pub fn pool_for(&self, mood: Mood, country_code: &str) -> &[SongEntry] {
        let regional = self
            .regions
            .get(&country_code.to_ascii_lowercase())
            .and_then(|pools| pools.get(&mood))
            .filter(|pool| !pool.is_empty());

        match regional {
            Some(pool) => pool.as_slice(),
            None => self.global.get(&mood).map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    /// Random song for the mood, or `None` without a mood
    pub fn pick_song(&self, mood: Option<Mood>, country_code: &str) -> Option<&SongEntry> {
        let mood = mood?;
        self.pool_for(mood, country_code).choose(&mut rand::rng())
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }
}

fn lowercase_keys<V>(map: HashMap<String, V>) -> HashMap<String, V> {
    map.into_iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v))
        .collect()
}
