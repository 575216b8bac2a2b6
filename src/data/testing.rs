//! Record fixtures shared by the unit tests.

use super::model::{CompensationDataset, Record};

pub fn record(year: i64, seniority: &str, role: &str, country: &str, usd: f64) -> Record {
    Record {
        year,
        seniority: seniority.to_string(),
        contract_type: "FT".to_string(),
        company_size: "M".to_string(),
        role: role.to_string(),
        residence_iso3: country.to_string(),
        compensation_usd: usd,
    }
}

/// Five records across two years, two roles and two countries.
pub fn scenario() -> CompensationDataset {
    CompensationDataset::new(vec![
        record(2023, "SE", "Data Scientist", "USA", 100_000.0),
        record(2023, "SE", "Data Scientist", "USA", 120_000.0),
        record(2023, "MI", "Data Engineer", "BRA", 80_000.0),
        record(2022, "SE", "Data Scientist", "USA", 90_000.0),
        record(2022, "MI", "Data Engineer", "BRA", 70_000.0),
    ])
}
