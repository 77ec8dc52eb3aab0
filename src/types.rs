/// Core data structures for a run
///
/// This module defines the wire shapes returned by the API, the normalized
/// row every later stage works on, and the tables derived from it. The CSV
/// records at the bottom are the column contract between the transformer and
/// the reporter: renaming a column means changing a field here.
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of a listing page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    pub url: String,
}

/// A single listing page as returned by `GET /pokemon?limit=&offset=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingPage {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub results: Vec<ListingEntry>,
}

/// Raw detail record from `GET /pokemon/{id}`, reduced to the consumed fields
#[derive(Debug, Clone, Deserialize)]
pub struct DetailRecord {
    pub id: i64,
    pub name: String,
    pub base_experience: Option<i64>,
    pub types: Vec<TypeSlot>,
    pub stats: Vec<StatSlot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatSlot {
    pub stat: NamedRef,
    pub base_stat: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

/// A normalized detail record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: i64,
    pub name: String,
    pub base_experience: i64,
    /// API order, duplicates kept; never empty
    pub types: Vec<String>,
    pub hp: Option<i64>,
    pub attack: Option<i64>,
    pub defense: Option<i64>,
}

impl AsRef<Row> for Row {
    fn as_ref(&self) -> &Row {
        self
    }
}

/// Experience bucket derived from `Row::base_experience`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Weak,
    Medium,
    Strong,
}

impl Category {
    pub fn from_experience(base_experience: i64) -> Self {
        if base_experience < 50 {
            Category::Weak
        } else if base_experience < 100 {
            Category::Medium
        } else {
            Category::Strong
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Weak => "Weak",
            Category::Medium => "Medium",
            Category::Strong => "Strong",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row plus its experience category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorizedRow {
    pub row: Row,
    pub category: Category,
}

impl AsRef<Row> for CategorizedRow {
    fn as_ref(&self) -> &Row {
        &self.row
    }
}

/// Number of rows carrying a given type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    #[serde(rename = "Type")]
    pub type_name: String,
    #[serde(rename = "Count")]
    pub count: usize,
}

/// Header row of `type_statistics.csv`; must match the serde names on `TypeStats`
pub const TYPE_STATS_COLUMNS: [&str; 4] = ["Type", "HP", "Attack", "Defense"];

/// Per-type stat means; `None` means no row of that type carried the stat
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeStats {
    #[serde(rename = "Type")]
    pub type_name: String,
    #[serde(rename = "HP")]
    pub hp: Option<f64>,
    #[serde(rename = "Attack")]
    pub attack: Option<f64>,
    #[serde(rename = "Defense")]
    pub defense: Option<f64>,
}

/// Everything the transformation stage produces from one table
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub categorized: Vec<CategorizedRow>,
    pub type_counts: Vec<TypeCount>,
    pub type_stats: Vec<TypeStats>,
    pub top: Vec<CategorizedRow>,
}

/// Header row of `top_5_pokemon.csv`; must match the serde names on `TopRecord`
pub const TOP_COLUMNS: [&str; 8] = ["ID", "Name", "Base Experience", "Types", "HP", "Attack", "Defense", "Category"];

/// Column layout of `top_5_pokemon.csv`
#[derive(Debug, Serialize)]
pub struct TopRecord<'a> {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: &'a str,
    #[serde(rename = "Base Experience")]
    pub base_experience: i64,
    #[serde(rename = "Types")]
    pub types: String,
    #[serde(rename = "HP")]
    pub hp: Option<i64>,
    #[serde(rename = "Attack")]
    pub attack: Option<i64>,
    #[serde(rename = "Defense")]
    pub defense: Option<i64>,
    #[serde(rename = "Category")]
    pub category: Category,
}

impl<'a> From<&'a CategorizedRow> for TopRecord<'a> {
    fn from(entry: &'a CategorizedRow) -> Self {
        let row = &entry.row;
        TopRecord {
            id: row.id,
            name: &row.name,
            base_experience: row.base_experience,
            types: row.types.join("|"),
            hp: row.hp,
            attack: row.attack,
            defense: row.defense,
            category: entry.category,
        }
    }
}
