use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Pick an element with the given relative weights.
    fn weighted<'a, T>(&mut self, items: &'a [(T, f64)]) -> &'a T {
        let total: f64 = items.iter().map(|(_, w)| w).sum();
        let mut r = self.next_f64() * total;
        for (item, w) in items {
            if r < *w {
                return item;
            }
            r -= w;
        }
        &items[items.len() - 1].0
    }
}

struct Row {
    year: i64,
    seniority: &'static str,
    contract: &'static str,
    size: &'static str,
    role: &'static str,
    country: &'static str,
    usd: f64,
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let years = [(2021i64, 1.0), (2022, 2.0), (2023, 4.0), (2024, 5.0)];
    // seniority → salary multiplier
    let seniority = [
        (("junior", 0.55), 2.0),
        (("pleno", 0.8), 3.0),
        (("senior", 1.1), 5.0),
        (("executivo", 1.6), 0.5),
    ];
    let contracts = [("integral", 20.0), ("parcial", 0.5), ("contrato", 0.5), ("freelancer", 0.3)];
    let sizes = [("pequena", 1.0), ("media", 6.0), ("grande", 2.0)];
    // role → base salary
    let roles = [
        (("Data Scientist", 140_000.0), 5.0),
        (("Data Engineer", 135_000.0), 5.0),
        (("Data Analyst", 95_000.0), 4.0),
        (("Machine Learning Engineer", 170_000.0), 3.0),
        (("Research Scientist", 175_000.0), 1.0),
        (("Analytics Engineer", 145_000.0), 1.0),
        (("Applied Scientist", 180_000.0), 0.7),
        (("Data Architect", 160_000.0), 0.6),
        (("BI Developer", 90_000.0), 0.5),
        (("Data Manager", 120_000.0), 0.5),
        (("AI Engineer", 165_000.0), 0.5),
        (("Head of Data", 210_000.0), 0.2),
    ];
    // country → cost-of-labour factor
    let countries = [
        (("USA", 1.0), 20.0),
        (("CAN", 0.8), 2.0),
        (("GBR", 0.7), 2.0),
        (("DEU", 0.65), 1.0),
        (("ESP", 0.45), 1.0),
        (("BRA", 0.3), 1.0),
        (("IND", 0.2), 1.0),
    ];

    let n_rows = 3000;
    let mut rows = Vec::with_capacity(n_rows);
    for _ in 0..n_rows {
        let year = *rng.weighted(&years);
        let (level, level_factor) = *rng.weighted(&seniority);
        let contract = *rng.weighted(&contracts);
        let size = *rng.weighted(&sizes);
        let (role, base) = *rng.weighted(&roles);
        let (country, country_factor) = *rng.weighted(&countries);

        let growth = 1.0 + 0.04 * (year - 2021) as f64;
        let mean = base * level_factor * country_factor * growth;
        let usd = rng.gauss(mean, mean * 0.15).max(5_000.0).round();

        rows.push(Row {
            year,
            seniority: level,
            contract,
            size,
            role,
            country,
            usd,
        });
    }

    write_csv("sample_salaries.csv", &rows)?;
    write_parquet("sample_salaries.parquet", &rows)?;

    println!("Wrote {} records to sample_salaries.csv and sample_salaries.parquet", rows.len());
    Ok(())
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "year",
        "seniority",
        "contract_type",
        "company_size",
        "role",
        "residence_iso3",
        "compensation_usd",
    ])?;
    for r in rows {
        writer.write_record([
            r.year.to_string(),
            r.seniority.to_string(),
            r.contract.to_string(),
            r.size.to_string(),
            r.role.to_string(),
            r.country.to_string(),
            r.usd.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let text = |f: fn(&Row) -> &'static str| StringArray::from(rows.iter().map(f).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("year", DataType::Int64, false),
        Field::new("seniority", DataType::Utf8, false),
        Field::new("contract_type", DataType::Utf8, false),
        Field::new("company_size", DataType::Utf8, false),
        Field::new("role", DataType::Utf8, false),
        Field::new("residence_iso3", DataType::Utf8, false),
        Field::new("compensation_usd", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(rows.iter().map(|r| r.year).collect::<Vec<_>>())),
            Arc::new(text(|r| r.seniority)),
            Arc::new(text(|r| r.contract)),
            Arc::new(text(|r| r.size)),
            Arc::new(text(|r| r.role)),
            Arc::new(text(|r| r.country)),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.usd).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}
