use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::SchemaError;
use super::model::{Column, CompensationDataset, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a compensation table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one record per line (the published dataset format)
/// * `.json`    – `[{ "year": 2023, "seniority": "SE", ... }, ...]`
/// * `.parquet` – flat columns, one record per row
///
/// Every format must provide the columns listed by [`Column`]; anything else
/// is ignored.  A missing column or a bad compensation amount is a
/// [`SchemaError`] and no dataset is returned.
pub fn load_file(path: &Path) -> Result<CompensationDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(SchemaError::UnsupportedExtension(other.to_string()).into()),
    };

    for (row, record) in records.iter().enumerate() {
        validate(row, record)?;
    }
    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(CompensationDataset::new(records))
}

fn validate(row: usize, record: &Record) -> Result<(), SchemaError> {
    let value = record.compensation_usd;
    if !value.is_finite() || value < 0.0 {
        return Err(SchemaError::InvalidCompensation { row, value });
    }
    Ok(())
}

fn missing(column: Column) -> SchemaError {
    SchemaError::MissingColumn {
        column: column.canonical(),
        accepted: column.names().join(", "),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, extra columns ignored.
fn load_csv(path: &Path) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut positions = Vec::with_capacity(Column::ALL.len());
    for column in Column::ALL {
        positions.push(column.locate(&headers).ok_or_else(|| missing(column))?);
    }
    let canonical = csv::StringRecord::from(Column::ALL.map(Column::canonical).to_vec());

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        // Project onto the located columns so duplicate spellings never reach serde.
        let projected: csv::StringRecord =
            positions.iter().map(|&i| raw.get(i).unwrap_or("")).collect();
        let record: Record = projected
            .deserialize(Some(&canonical))
            .with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "year": 2023,
///     "seniority": "SE",
///     "contract_type": "FT",
///     "company_size": "M",
///     "role": "Data Scientist",
///     "residence_iso3": "USA",
///     "compensation_usd": 120000
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<Record>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = match root {
        JsonValue::Array(rows) => rows,
        _ => bail!("Expected top-level JSON array"),
    };

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut canonical = serde_json::Map::with_capacity(Column::ALL.len());
        for column in Column::ALL {
            let value = column
                .names()
                .iter()
                .find_map(|name| obj.get(*name))
                .ok_or_else(|| missing(column))
                .with_context(|| format!("Row {i}"))?;
            canonical.insert(column.canonical().to_string(), value.clone());
        }

        let record: Record = serde_json::from_value(JsonValue::Object(canonical))
            .with_context(|| format!("Row {i}: invalid record"))?;
        records.push(record);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per record field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): integer years may be Int32 or Int64,
/// amounts may be any integer or float width.
fn load_parquet(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();

        let col = |column: Column| -> Result<Arc<dyn Array>, SchemaError> {
            let idx = column.locate(&names).ok_or_else(|| missing(column))?;
            Ok(batch.column(idx).clone())
        };
        let year = col(Column::Year)?;
        let seniority = col(Column::Seniority)?;
        let contract = col(Column::ContractType)?;
        let size = col(Column::CompanySize)?;
        let role = col(Column::Role)?;
        let residence = col(Column::ResidenceIso3)?;
        let usd = col(Column::CompensationUsd)?;

        let offset = records.len();
        for row in 0..batch.num_rows() {
            let at = offset + row;
            records.push(Record {
                year: extract_i64(&year, row, at, Column::Year)?,
                seniority: extract_string(&seniority, row, at, Column::Seniority)?,
                contract_type: extract_string(&contract, row, at, Column::ContractType)?,
                company_size: extract_string(&size, row, at, Column::CompanySize)?,
                role: extract_string(&role, row, at, Column::Role)?,
                residence_iso3: extract_string(&residence, row, at, Column::ResidenceIso3)?,
                compensation_usd: extract_f64(&usd, row, at, Column::CompensationUsd)?,
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn unsupported(col: &Arc<dyn Array>, at: usize, column: Column) -> SchemaError {
    SchemaError::UnsupportedType {
        row: at,
        column: column.canonical(),
        found: format!("{:?}", col.data_type()),
    }
}

fn check_null(col: &Arc<dyn Array>, row: usize, at: usize, column: Column) -> Result<(), SchemaError> {
    if col.is_null(row) {
        return Err(SchemaError::NullValue {
            row: at,
            column: column.canonical(),
        });
    }
    Ok(())
}

fn extract_i64(col: &Arc<dyn Array>, row: usize, at: usize, column: Column) -> Result<i64, SchemaError> {
    check_null(col, row, at, column)?;
    match col.data_type() {
        DataType::Int32 => Ok(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => Ok(col.as_primitive::<Int64Type>().value(row)),
        _ => Err(unsupported(col, at, column)),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize, at: usize, column: Column) -> Result<f64, SchemaError> {
    check_null(col, row, at, column)?;
    match col.data_type() {
        DataType::Float64 => Ok(col.as_primitive::<Float64Type>().value(row)),
        DataType::Float32 => Ok(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Int64 => Ok(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Int32 => Ok(col.as_primitive::<Int32Type>().value(row) as f64),
        _ => Err(unsupported(col, at, column)),
    }
}

fn extract_string(col: &Arc<dyn Array>, row: usize, at: usize, column: Column) -> Result<String, SchemaError> {
    check_null(col, row, at, column)?;
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        _ => Err(unsupported(col, at, column)),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn csv_with_published_headers() {
        let file = write_file(
            ".csv",
            "ano,senioridade,contrato,tamanho_empresa,cargo,residencia,residencia_iso3,usd\n\
             2023,senior,integral,media,Data Scientist,US,USA,120000\n\
             2022,pleno,integral,grande,Data Engineer,BR,BRA,80000.5\n",
        );
        let dataset = load_file(file.path()).unwrap();
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.records[0].year, 2023);
        assert_eq!(dataset.records[0].seniority, "senior");
        assert_eq!(dataset.records[1].residence_iso3, "BRA");
        assert_eq!(dataset.records[1].compensation_usd, 80000.5);
    }

    #[test]
    fn csv_with_two_spellings_of_a_column_uses_the_canonical_one() {
        let file = write_file(
            ".csv",
            "ano,year,seniority,contract_type,company_size,role,residence_iso3,usd,compensation_usd\n\
             1999,2023,SE,FT,M,Data Scientist,USA,1,120000\n",
        );
        let dataset = load_file(file.path()).unwrap();
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0].year, 2023);
        assert_eq!(dataset.records[0].compensation_usd, 120000.0);
    }

    #[test]
    fn csv_missing_column_is_a_schema_error() {
        let file = write_file(
            ".csv",
            "year,seniority,contract_type,role,residence_iso3,compensation_usd\n\
             2023,SE,FT,Data Scientist,USA,1\n",
        );
        let err = load_file(file.path()).unwrap_err();
        match err.downcast_ref::<SchemaError>() {
            Some(SchemaError::MissingColumn { column, .. }) => assert_eq!(*column, "company_size"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_compensation_is_rejected() {
        let file = write_file(
            ".csv",
            "year,seniority,contract_type,company_size,role,residence_iso3,compensation_usd\n\
             2023,SE,FT,M,Data Scientist,USA,-5\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SchemaError>(),
            Some(SchemaError::InvalidCompensation { row: 0, .. })
        ));
    }

    #[test]
    fn json_records() {
        let file = write_file(
            ".json",
            r#"[{"work_year": 2021, "experience_level": "MI", "employment_type": "FT",
                 "company_size": "L", "job_title": "ML Engineer",
                 "residence_iso3": "DEU", "salary_in_usd": 95000, "remote_ratio": 50}]"#,
        );
        let dataset = load_file(file.path()).unwrap();
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0].role, "ML Engineer");
        assert_eq!(dataset.records[0].compensation_usd, 95000.0);
    }

    #[test]
    fn json_with_two_spellings_of_a_column_uses_the_canonical_one() {
        let file = write_file(
            ".json",
            r#"[{"work_year": 1999, "year": 2022, "seniority": "EN", "contract_type": "FT",
                 "company_size": "S", "cargo": "Analyst", "role": "Data Analyst",
                 "residence_iso3": "BRA", "compensation_usd": 30000}]"#,
        );
        let dataset = load_file(file.path()).unwrap();
        assert_eq!(dataset.records[0].year, 2022);
        assert_eq!(dataset.records[0].role, "Data Analyst");
    }

    #[test]
    fn json_missing_column_is_a_schema_error() {
        let file = write_file(".json", r#"[{"year": 2021}]"#);
        let err = load_file(file.path()).unwrap_err();
        assert!(err.downcast_ref::<SchemaError>().is_some());
    }

    #[test]
    fn parquet_columns() {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
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
                Arc::new(Int64Array::from(vec![2023, 2022])),
                Arc::new(StringArray::from(vec!["SE", "EN"])),
                Arc::new(StringArray::from(vec!["FT", "PT"])),
                Arc::new(StringArray::from(vec!["M", "S"])),
                Arc::new(StringArray::from(vec!["Data Scientist", "Analyst"])),
                Arc::new(StringArray::from(vec!["USA", "IND"])),
                Arc::new(Float64Array::from(vec![150000.0, 20000.0])),
            ],
        )
        .unwrap();
        let out = std::fs::File::create(file.path()).unwrap();
        let mut writer = ArrowWriter::try_new(out, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let dataset = load_file(file.path()).unwrap();
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.records[1].contract_type, "PT");
        assert_eq!(dataset.records[0].compensation_usd, 150000.0);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_file(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SchemaError>(),
            Some(SchemaError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }
}
