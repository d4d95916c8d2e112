use crate::{
    error::{CostforgeError, Result},
    finance::FinancialProjection,
    rampup::RampMonth,
    totals::{ScenarioSummary, TotalsResult},
};
use csv::Writer;
use serde::Serialize;
use std::{fs, path::Path};
use tracing::debug;

/// Flat cost-row record, with the category and module as plain labels.
#[derive(Debug, Serialize)]
struct CostRowRecord<'a> {
    module: &'a str,
    name: &'a str,
    basis: &'a str,
    annual_qty: f64,
    qty_unit: &'a str,
    unit_cost: f64,
    cost_unit: &'a str,
    price_source: &'a str,
    annual_cost: f64,
    category: &'a str,
    taxable: bool,
    note: &'a str,
}

/// Writes serializable records to one CSV file.
pub struct CsvReport {
    path: String,
    writer: Writer<fs::File>,
    rows: usize,
}

impl CsvReport {
    pub fn create(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let writer =
            Writer::from_path(path).map_err(|e| CostforgeError::CsvError(display.clone(), e))?;
        Ok(Self {
            path: display,
            writer,
            rows: 0,
        })
    }

    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        self.writer
            .serialize(record)
            .map_err(|e| CostforgeError::CsvError(self.path.clone(), e))?;
        self.rows += 1;
        Ok(())
    }

    /// Flushes and returns the number of records written.
    pub fn finish(mut self) -> Result<usize> {
        self.writer
            .flush()
            .map_err(|e| CostforgeError::FileIO(self.path.clone(), e))?;
        debug!(path = %self.path, rows = self.rows, "csv written");
        Ok(self.rows)
    }
}

pub fn write_csv<'a, T, I>(path: &Path, records: I) -> Result<usize>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut report = CsvReport::create(path)?;
    for record in records {
        report.write(record)?;
    }
    report.finish()
}

/// Every itemized row of the three rollups, in engine order.
pub fn write_cost_rows(path: &Path, totals: &TotalsResult) -> Result<usize> {
    let mut report = CsvReport::create(path)?;
    let rows = totals
        .process
        .rows
        .iter()
        .chain(&totals.extra.rows)
        .chain(&totals.rubrics.rows);
    for row in rows {
        report.write(&CostRowRecord {
            module: row.module.as_str(),
            name: &row.name,
            basis: &row.basis,
            annual_qty: row.annual_qty,
            qty_unit: &row.qty_unit,
            unit_cost: row.unit_cost,
            cost_unit: &row.cost_unit,
            price_source: &row.price_source,
            annual_cost: row.signed_cost(),
            category: row.category.as_str(),
            taxable: row.taxable,
            note: &row.note,
        })?;
    }
    report.finish()
}

pub fn write_categories(path: &Path, totals: &TotalsResult) -> Result<usize> {
    write_csv(path, &totals.category_rows())
}

pub fn write_rampup(path: &Path, months: &[RampMonth]) -> Result<usize> {
    write_csv(path, months)
}

pub fn write_projection(path: &Path, projection: &FinancialProjection) -> Result<usize> {
    write_csv(path, &projection.years)
}

pub fn write_scenarios(path: &Path, summaries: &[ScenarioSummary]) -> Result<usize> {
    write_csv(path, summaries)
}
