//! Immutable reference tables consulted by the geographic and channel badges.

mod countries;

pub use countries::{CountryInfo, CountryTable, CountryTableError};

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

const EMBEDDED_COUNTRIES: &str = include_str!("../../data/countries.csv");

/// Asian and Oceanian countries bordering the Pacific.
const PACIFIC_RIM_WEST: [&str; 17] = [
    "Australia",
    "Brunei",
    "Cambodia",
    "China",
    "Hong Kong",
    "Indonesia",
    "Japan",
    "Malaysia",
    "New Zealand",
    "North Korea",
    "Papua New Guinea",
    "Philippines",
    "Russia",
    "Singapore",
    "South Korea",
    "Taiwan",
    "Vietnam",
];

/// American countries bordering the Pacific.
const PACIFIC_RIM_EAST: [&str; 13] = [
    "Canada",
    "Chile",
    "Colombia",
    "Costa Rica",
    "Ecuador",
    "El Salvador",
    "Guatemala",
    "Honduras",
    "Mexico",
    "Nicaragua",
    "Panama",
    "Peru",
    "United States",
];

const RARE_SOURCES: [&str; 6] = ["linkedin", "peer_review", "pinterest", "q&a", "video", "weibo"];

#[derive(Debug)]
pub enum ReferenceError {
    Io(std::io::Error),
    Csv(csv::Error),
    Table(CountryTableError),
    UnknownRegionCountry(String),
}

impl std::fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceError::Io(err) => write!(f, "failed to read country table: {}", err),
            ReferenceError::Csv(err) => write!(f, "invalid country table CSV: {}", err),
            ReferenceError::Table(err) => write!(f, "inconsistent country table: {}", err),
            ReferenceError::UnknownRegionCountry(name) => write!(
                f,
                "Pacific Rim country '{}' is missing from the country table",
                name
            ),
        }
    }
}

impl std::error::Error for ReferenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReferenceError::Io(err) => Some(err),
            ReferenceError::Csv(err) => Some(err),
            ReferenceError::Table(err) => Some(err),
            ReferenceError::UnknownRegionCountry(_) => None,
        }
    }
}

impl From<std::io::Error> for ReferenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ReferenceError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<CountryTableError> for ReferenceError {
    fn from(err: CountryTableError) -> Self {
        Self::Table(err)
    }
}

/// Reference context handed to every badge rule.
///
/// Built once at startup and shared read-only; the Pacific Rim lists keep
/// their declaration order because badge evidence lists countries in that
/// order.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    countries: CountryTable,
    pacific_rim_west: Vec<String>,
    pacific_rim_east: Vec<String>,
    rare_sources: BTreeSet<String>,
}

impl ReferenceData {
    /// Reference data backed by the country table compiled into the crate.
    pub fn standard() -> Result<Self, ReferenceError> {
        Self::from_reader(EMBEDDED_COUNTRIES.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReferenceError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReferenceError> {
        let rows = countries::parse_rows(reader)?;
        let table = CountryTable::from_entries(rows)?;
        Self::with_country_table(table)
    }

    pub fn with_country_table(countries: CountryTable) -> Result<Self, ReferenceError> {
        for name in PACIFIC_RIM_WEST.iter().chain(PACIFIC_RIM_EAST.iter()) {
            if !countries.contains_name(name) {
                return Err(ReferenceError::UnknownRegionCountry(name.to_string()));
            }
        }

        Ok(Self {
            countries,
            pacific_rim_west: PACIFIC_RIM_WEST.iter().map(|name| name.to_string()).collect(),
            pacific_rim_east: PACIFIC_RIM_EAST.iter().map(|name| name.to_string()).collect(),
            rare_sources: RARE_SOURCES.iter().map(|name| name.to_string()).collect(),
        })
    }

    pub fn countries(&self) -> &CountryTable {
        &self.countries
    }

    pub fn pacific_rim_west(&self) -> &[String] {
        &self.pacific_rim_west
    }

    pub fn pacific_rim_east(&self) -> &[String] {
        &self.pacific_rim_east
    }

    pub fn is_rare_source(&self, source: &str) -> bool {
        self.rare_sources.contains(source)
    }
}
