use std::fmt;

use serde::Deserialize;

use super::error::SelectionError;

// ---------------------------------------------------------------------------
// FacetValue – a single categorical value a facet can take
// ---------------------------------------------------------------------------

/// A facet value. Years are integers, everything else is text.
/// Kept in `BTreeSet`s downstream, so the derived `Ord` gives numeric order
/// for years and lexicographic order for text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FacetValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetValue::Integer(i) => write!(f, "{i}"),
            FacetValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for FacetValue {
    fn from(value: i64) -> Self {
        FacetValue::Integer(value)
    }
}

impl From<&str> for FacetValue {
    fn from(value: &str) -> Self {
        FacetValue::Text(value.to_string())
    }
}

impl From<String> for FacetValue {
    fn from(value: String) -> Self {
        FacetValue::Text(value)
    }
}

// ---------------------------------------------------------------------------
// Facet – the four filterable dimensions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facet {
    Year,
    Seniority,
    ContractType,
    CompanySize,
}

impl Facet {
    /// All facets in display order.
    pub const ALL: [Facet; 4] = [
        Facet::Year,
        Facet::Seniority,
        Facet::ContractType,
        Facet::CompanySize,
    ];

    /// Stable identifier, also accepted by [`Facet::parse`].
    pub fn name(self) -> &'static str {
        match self {
            Facet::Year => "year",
            Facet::Seniority => "seniority",
            Facet::ContractType => "contract_type",
            Facet::CompanySize => "company_size",
        }
    }

    /// Human-readable label for widgets.
    pub fn label(self) -> &'static str {
        match self {
            Facet::Year => "Year",
            Facet::Seniority => "Seniority",
            Facet::ContractType => "Contract",
            Facet::CompanySize => "Company size",
        }
    }

    /// Resolve a facet from its identifier (case-insensitive, snake or camel case).
    pub fn parse(name: &str) -> Result<Facet, SelectionError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "year" => Ok(Facet::Year),
            "seniority" => Ok(Facet::Seniority),
            "contract_type" | "contracttype" => Ok(Facet::ContractType),
            "company_size" | "companysize" => Ok(Facet::CompanySize),
            _ => Err(SelectionError::UnknownFacet(name.to_string())),
        }
    }

    /// The record's value along this facet.
    pub fn value_of(self, record: &Record) -> FacetValue {
        match self {
            Facet::Year => FacetValue::Integer(record.year),
            Facet::Seniority => FacetValue::Text(record.seniority.clone()),
            Facet::ContractType => FacetValue::Text(record.contract_type.clone()),
            Facet::CompanySize => FacetValue::Text(record.company_size.clone()),
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// One compensation observation. Deserialized from canonical column names
/// only; the loaders map source headers onto them through [`Column::locate`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    pub year: i64,
    pub seniority: String,
    pub contract_type: String,
    pub company_size: String,
    pub role: String,
    pub residence_iso3: String,
    pub compensation_usd: f64,
}

/// Source columns required to build a [`Record`], with every accepted name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Year,
    Seniority,
    ContractType,
    CompanySize,
    Role,
    ResidenceIso3,
    CompensationUsd,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Year,
        Column::Seniority,
        Column::ContractType,
        Column::CompanySize,
        Column::Role,
        Column::ResidenceIso3,
        Column::CompensationUsd,
    ];

    /// Accepted header names; the first one is canonical.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            Column::Year => &["year", "work_year", "ano"],
            Column::Seniority => &["seniority", "experience_level", "senioridade"],
            Column::ContractType => &["contract_type", "employment_type", "contrato"],
            Column::CompanySize => &["company_size", "tamanho_empresa"],
            Column::Role => &["role", "job_title", "cargo"],
            Column::ResidenceIso3 => &["residence_iso3", "residencia_iso3"],
            Column::CompensationUsd => &["compensation_usd", "salary_in_usd", "usd"],
        }
    }

    pub fn canonical(self) -> &'static str {
        self.names()[0]
    }

    /// Position of this column among `headers`, trying each alias in order.
    /// When several aliases are present the earliest name in [`Column::names`]
    /// wins and the others are ignored.
    pub fn locate<S: AsRef<str>>(self, headers: &[S]) -> Option<usize> {
        self.names()
            .iter()
            .find_map(|name| headers.iter().position(|h| h.as_ref().trim() == *name))
    }
}

// ---------------------------------------------------------------------------
// CompensationDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The raw table, immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct CompensationDataset {
    pub records: Vec<Record>,
}

impl CompensationDataset {
    pub fn new(records: Vec<Record>) -> Self {
        CompensationDataset { records }
    }
}
