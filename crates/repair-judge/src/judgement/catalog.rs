use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::RepairCategory;

/// Qualitative dispersion of real-world prices for an item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variance {
    Low,
    Medium,
    High,
}

/// Reference price range for a repair item, in whole KRW.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBand {
    pub min_price: u64,
    pub max_price: u64,
    pub average_price: u64,
    pub avg_labor_cost: u64,
    pub avg_parts_cost: u64,
    pub variance: Variance,
}

impl PriceBand {
    /// Band applied when no catalog entry matches an item name.
    pub const DEFAULT: PriceBand = PriceBand {
        min_price: 30_000,
        max_price: 500_000,
        average_price: 150_000,
        avg_labor_cost: 50_000,
        avg_parts_cost: 100_000,
        variance: Variance::High,
    };
}

/// Named catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    pub category: RepairCategory,
    #[serde(flatten)]
    pub band: PriceBand,
}

/// Outcome of resolving an item name, keeping track of default fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedBand<'a> {
    Catalog(&'a CatalogEntry),
    Default,
}

impl<'a> ResolvedBand<'a> {
    pub fn band(&self) -> &PriceBand {
        match self {
            ResolvedBand::Catalog(entry) => &entry.band,
            ResolvedBand::Default => &PriceBand::DEFAULT,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ResolvedBand::Default)
    }
}

/// Ordered reference catalog. Declaration order breaks ties between fuzzy matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceCatalog {
    entries: Vec<CatalogEntry>,
}

impl PriceCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(CatalogError::DuplicateEntry(entry.name.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Built-in catalog of domestic 2024 average prices.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                entry(
                    "브레이크 패드",
                    RepairCategory::Brake,
                    [80_000, 200_000, 130_000, 40_000, 90_000],
                    Variance::Medium,
                ),
                entry(
                    "엔진오일 교환",
                    RepairCategory::EngineOil,
                    [30_000, 80_000, 50_000, 10_000, 40_000],
                    Variance::Low,
                ),
                entry(
                    "타이어 교체",
                    RepairCategory::Tire,
                    [60_000, 150_000, 90_000, 15_000, 75_000],
                    Variance::High,
                ),
                entry(
                    "배터리 교체",
                    RepairCategory::Battery,
                    [80_000, 180_000, 120_000, 20_000, 100_000],
                    Variance::Medium,
                ),
                entry(
                    "점화플러그 교체",
                    RepairCategory::EngineOil,
                    [50_000, 120_000, 80_000, 30_000, 50_000],
                    Variance::Medium,
                ),
                entry(
                    "에어필터 교체",
                    RepairCategory::EngineOil,
                    [15_000, 40_000, 25_000, 5_000, 20_000],
                    Variance::Low,
                ),
                entry(
                    "에어컨 점검",
                    RepairCategory::Cooling,
                    [50_000, 150_000, 90_000, 30_000, 60_000],
                    Variance::High,
                ),
                entry(
                    "변속기 오일 교환",
                    RepairCategory::Tire,
                    [60_000, 150_000, 100_000, 20_000, 80_000],
                    Variance::Medium,
                ),
                entry(
                    "서스펜션 점검",
                    RepairCategory::Suspension,
                    [100_000, 300_000, 180_000, 60_000, 120_000],
                    Variance::High,
                ),
                entry(
                    "와이퍼 교체",
                    RepairCategory::Etc,
                    [10_000, 30_000, 18_000, 3_000, 15_000],
                    Variance::Low,
                ),
            ],
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a catalog from CSV, preserving row order.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();

        for record in csv_reader.deserialize::<CatalogRow>() {
            entries.push(record?.into_entry());
        }

        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        Self::new(entries)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact match on the trimmed name first, then the first entry (in declaration order)
    /// whose name contains the input or is contained by it.
    pub fn lookup(&self, item_name: &str) -> Option<&CatalogEntry> {
        let normalized = item_name.trim();

        if let Some(exact) = self.entries.iter().find(|entry| entry.name == normalized) {
            return Some(exact);
        }

        self.entries.iter().find(|entry| {
            normalized.contains(entry.name.as_str()) || entry.name.contains(normalized)
        })
    }

    pub fn resolve(&self, item_name: &str) -> ResolvedBand<'_> {
        match self.lookup(item_name) {
            Some(entry) => ResolvedBand::Catalog(entry),
            None => ResolvedBand::Default,
        }
    }
}

impl Default for PriceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn entry(
    name: &str,
    category: RepairCategory,
    [min_price, max_price, average_price, avg_labor_cost, avg_parts_cost]: [u64; 5],
    variance: Variance,
) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        category,
        band: PriceBand {
            min_price,
            max_price,
            average_price,
            avg_labor_cost,
            avg_parts_cost,
            variance,
        },
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    name: String,
    category: RepairCategory,
    min_price: u64,
    max_price: u64,
    average_price: u64,
    avg_labor_cost: u64,
    avg_parts_cost: u64,
    variance: Variance,
}

impl CatalogRow {
    fn into_entry(self) -> CatalogEntry {
        CatalogEntry {
            name: self.name,
            category: self.category,
            band: PriceBand {
                min_price: self.min_price,
                max_price: self.max_price,
                average_price: self.average_price,
                avg_labor_cost: self.avg_labor_cost,
                avg_parts_cost: self.avg_parts_cost,
                variance: self.variance,
            },
        }
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
    DuplicateEntry(String),
    Empty,
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read price catalog: {}", err),
            CatalogError::Csv(err) => write!(f, "invalid price catalog CSV: {}", err),
            CatalogError::DuplicateEntry(name) => {
                write!(f, "price catalog declares '{}' more than once", name)
            }
            CatalogError::Empty => write!(f, "price catalog has no entries"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
            CatalogError::DuplicateEntry(_) | CatalogError::Empty => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}
