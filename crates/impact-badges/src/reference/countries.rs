use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;

/// Canonical metadata for one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryInfo {
    pub name: String,
    pub iso_code: String,
    pub is_global_south: bool,
}

/// Country lookup keyed both by canonical name and by ISO 3166 alpha-2 code.
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    by_name: BTreeMap<String, CountryInfo>,
    name_by_iso: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryTableError {
    DuplicateIso(String),
    DuplicateName(String),
    EmptyField { line: usize },
}

impl std::fmt::Display for CountryTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountryTableError::DuplicateIso(code) => {
                write!(f, "ISO code '{}' appears more than once", code)
            }
            CountryTableError::DuplicateName(name) => {
                write!(f, "country '{}' appears more than once", name)
            }
            CountryTableError::EmptyField { line } => {
                write!(f, "country row {} has an empty name or ISO code", line)
            }
        }
    }
}

impl std::error::Error for CountryTableError {}

impl CountryTable {
    pub fn from_entries<I>(entries: I) -> Result<Self, CountryTableError>
    where
        I: IntoIterator<Item = CountryInfo>,
    {
        let mut table = Self::default();
        for (index, entry) in entries.into_iter().enumerate() {
            if entry.name.is_empty() || entry.iso_code.is_empty() {
                return Err(CountryTableError::EmptyField { line: index + 1 });
            }
            if table.name_by_iso.contains_key(&entry.iso_code) {
                return Err(CountryTableError::DuplicateIso(entry.iso_code));
            }
            if table.by_name.contains_key(&entry.name) {
                return Err(CountryTableError::DuplicateName(entry.name));
            }
            table
                .name_by_iso
                .insert(entry.iso_code.clone(), entry.name.clone());
            table.by_name.insert(entry.name.clone(), entry);
        }
        Ok(table)
    }

    /// Canonical name for an ISO code; lookups are case-insensitive on the code.
    pub fn name_from_iso(&self, iso_code: &str) -> Option<&str> {
        self.name_by_iso
            .get(&iso_code.trim().to_ascii_uppercase())
            .map(String::as_str)
    }

    pub fn info(&self, name: &str) -> Option<&CountryInfo> {
        self.by_name.get(name)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct CountryRow {
    name: String,
    iso_code: String,
    is_global_south: bool,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<CountryInfo>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<CountryRow>() {
        let row = record?;
        rows.push(CountryInfo {
            name: row.name,
            iso_code: row.iso_code.to_ascii_uppercase(),
            is_global_south: row.is_global_south,
        });
    }

    Ok(rows)
}
