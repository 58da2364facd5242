//! Price data loading
//!
//! Reads the wide CSV the analysis runs on: first column is the trading
//! date, every other column a ticker's daily close. Tickers with missing
//! or unparseable cells are dropped (the analysis requires fully aligned
//! series), mirroring a `dropna`-style cleanup before the pipeline runs.

use crate::error::{AnalysisError, Result};
use crate::types::PriceTable;
use chrono::NaiveDate;
use std::path::Path;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Load and align a price table from a wide CSV file.
///
/// Ragged rows fail with `InvalidInput`; columns with gaps are dropped
/// with a warning rather than failing the whole universe.
pub fn load_price_table(path: &Path) -> Result<PriceTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| AnalysisError::InvalidInput(format!("cannot open {:?}: {}", path, e)))?;

    let headers = reader
        .headers()
        .map_err(|e| AnalysisError::InvalidInput(format!("cannot read CSV header: {}", e)))?
        .clone();
    if headers.len() < 2 {
        return Err(AnalysisError::InvalidInput(
            "CSV needs a date column and at least one ticker column".to_string(),
        ));
    }

    let tickers: Vec<String> = headers.iter().skip(1).map(|h| h.to_string()).collect();
    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); tickers.len()];

    for (row_idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            AnalysisError::InvalidInput(format!("bad CSV row {}: {}", row_idx + 2, e))
        })?;
        if record.len() != headers.len() {
            return Err(AnalysisError::InvalidInput(format!(
                "row {} has {} fields, expected {}",
                row_idx + 2,
                record.len(),
                headers.len()
            )));
        }

        let raw_date = record.get(0).unwrap_or_default();
        dates.push(parse_date(raw_date).ok_or_else(|| {
            AnalysisError::InvalidInput(format!(
                "row {} has unparseable date '{}'",
                row_idx + 2,
                raw_date
            ))
        })?);

        for (col, cell) in columns.iter_mut().zip(record.iter().skip(1)) {
            col.push(cell.parse::<f64>().ok());
        }
    }

    let mut complete: Vec<(String, Vec<f64>)> = Vec::with_capacity(tickers.len());
    let mut dropped = 0usize;
    for (ticker, column) in tickers.into_iter().zip(columns) {
        match column.into_iter().collect::<Option<Vec<f64>>>() {
            Some(series) => complete.push((ticker, series)),
            None => {
                tracing::warn!("Dropping ticker '{}': missing observations", ticker);
                dropped += 1;
            }
        }
    }

    if complete.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "no ticker has a complete price series".to_string(),
        ));
    }

    tracing::info!(
        "Loaded {} tickers x {} observations ({} dropped)",
        complete.len(),
        dates.len(),
        dropped
    );

    PriceTable::new(dates, complete)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}
