//! # POI Catalog
//!
//! Read-only reference data for every place K-Bot can recommend.
//!
//! The built-in catalog holds the two northern Okinawa picks. A replacement
//! catalog can be supplied as TOML (`[[poi]]` tables) through the
//! `session.catalog_file` config key:
//!
//! ```toml
//! [[poi]]
//! id = 1
//! name = "大家 (Ufuya) 百年古宅"
//! category = "restaurant"
//! rating = 4.8
//! tags = ["本地必吃", "阿古猪"]
//! image_ref = "https://images.unsplash.com/photo-1559339352-11d035aa65de"
//! price_label = "¥3000/人"
//! description = "隐藏在森林里的百年古宅，必点阿古猪火锅。"
//! ```

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Highest rating a POI may carry.
pub const MAX_RATING: f32 = 5.0;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PoiId(pub u32);

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Restaurant,
    Attraction,
    Hotel,
    Activity,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Restaurant => "餐厅",
            Category::Attraction => "景点",
            Category::Hotel => "住宿",
            Category::Activity => "体验",
        }
    }
}

/// A recommendable place. Never mutated once the catalog is built.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Poi {
    pub id: PoiId,
    pub name: String,
    pub category: Category,
    pub rating: f32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image_ref: String,
    pub price_label: String,
    pub description: String,
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Empty,
    DuplicateId(PoiId),
    InvalidRating { id: PoiId, rating: f32 },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "catalog I/O error: {e}"),
            CatalogError::Parse(e) => write!(f, "catalog parse error: {e}"),
            CatalogError::Empty => write!(f, "catalog has no entries"),
            CatalogError::DuplicateId(id) => write!(f, "duplicate POI id {id}"),
            CatalogError::InvalidRating { id, rating } => {
                write!(f, "POI {id} has rating {rating}, expected 0.0 to {MAX_RATING}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(rename = "poi", default)]
    pois: Vec<Poi>,
}

#[derive(Debug, Clone)]
pub struct PoiCatalog {
    pois: Vec<Poi>,
}

impl PoiCatalog {
    /// Builds a catalog, rejecting duplicate ids and out-of-range ratings.
    pub fn from_pois(pois: Vec<Poi>) -> Result<Self, CatalogError> {
        if pois.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for poi in &pois {
            if !seen.insert(poi.id) {
                return Err(CatalogError::DuplicateId(poi.id));
            }
            if !(0.0..=MAX_RATING).contains(&poi.rating) {
                return Err(CatalogError::InvalidRating {
                    id: poi.id,
                    rating: poi.rating,
                });
            }
        }
        Ok(Self { pois })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents).map_err(CatalogError::Parse)?;
        Self::from_pois(file.pois)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(CatalogError::Io)?;
        Self::from_toml_str(&contents)
    }

    /// The northern Okinawa picks shipped with K-Bot.
    pub fn builtin() -> Self {
        let pois = vec![
            Poi {
                id: PoiId(1),
                name: "大家 (Ufuya) 百年古宅".to_string(),
                category: Category::Restaurant,
                rating: 4.8,
                tags: vec![
                    "本地必吃".to_string(),
                    "阿古猪".to_string(),
                    "景观位".to_string(),
                ],
                image_ref: "https://images.unsplash.com/photo-1559339352-11d035aa65de?auto=format&fit=crop&q=80&w=800".to_string(),
                price_label: "¥3000/人".to_string(),
                description: "隐藏在森林里的百年古宅，必点阿古猪火锅。".to_string(),
            },
            Poi {
                id: PoiId(2),
                name: "古宇利岛 (Kouri Island)".to_string(),
                category: Category::Attraction,
                rating: 4.9,
                tags: vec!["果冻海".to_string(), "自驾天堂".to_string()],
                image_ref: "https://images.unsplash.com/photo-1590523277543-a94d2e4eb00b?auto=format&fit=crop&q=80&w=800".to_string(),
                price_label: "免费".to_string(),
                description: "开车穿过跨海大桥的瞬间，你会爱上冲绳。".to_string(),
            },
        ];
        Self { pois }
    }

    pub fn get(&self, id: PoiId) -> Option<&Poi> {
        self.pois.iter().find(|poi| poi.id == id)
    }

    /// Entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Poi> {
        self.pois.iter()
    }

    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }
}
