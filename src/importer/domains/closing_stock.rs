// ==========================================
// Quarry Ops Import - Closing Stock Schema
// ==========================================
// Sheet 4, columns A-C from row 2. No serial column in this template;
// the serial exists only on the staged row. Baseline rules only.
// ==========================================

use crate::domain::{ImportDomain, Period};
use crate::importer::schema::{col, DomainSchema, RowCells, StagedRecord};
use crate::importer::staging::StagedRow;
use crate::importer::validation::ValidationIssue;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct ClosingStockRow {
    pub serial_no: u32,
    pub product_name: String,
    pub quarry_name: String,
    pub closing_stock_in_tons: f64,
}

impl StagedRecord for ClosingStockRow {
    fn set_serial_no(&mut self, serial: u32) {
        self.serial_no = serial;
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosingStockDto {
    pub month: String,
    pub year: String,
    pub product_name: String,
    pub quarry_name: String,
    pub closing_stock_in_tons: f64,
}

pub struct ClosingStockSchema;

impl DomainSchema for ClosingStockSchema {
    type Row = ClosingStockRow;
    type Dto = ClosingStockDto;

    fn domain(&self) -> ImportDomain {
        ImportDomain::ClosingStock
    }

    fn sheet_index(&self) -> usize {
        4
    }

    fn read_row(&self, cells: &RowCells<'_>) -> ClosingStockRow {
        ClosingStockRow {
            serial_no: 0,
            product_name: cells.string(col('A')),
            quarry_name: cells.string(col('B')),
            closing_stock_in_tons: cells.number(col('C')),
        }
    }

    fn identity<'a>(&self, row: &'a ClosingStockRow) -> &'a str {
        &row.product_name
    }

    fn primary_quantity(&self, row: &ClosingStockRow) -> f64 {
        row.closing_stock_in_tons
    }

    fn validate(&self, _staged: &[StagedRow<ClosingStockRow>]) -> Vec<ValidationIssue> {
        Vec::new()
    }

    fn to_dto(&self, row: &ClosingStockRow, period: &Period) -> ClosingStockDto {
        ClosingStockDto {
            month: period.month_str(),
            year: period.year_str(),
            product_name: row.product_name.clone(),
            quarry_name: row.quarry_name.clone(),
            closing_stock_in_tons: row.closing_stock_in_tons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::validation::run_validation;

    #[test]
    fn test_negative_stock_fails_baseline() {
        let staged = vec![StagedRow {
            id: 1,
            row: ClosingStockRow {
                serial_no: 1,
                product_name: "20mm Metal".to_string(),
                quarry_name: "East Quarry".to_string(),
                closing_stock_in_tons: -5.0,
            },
        }];

        let issues = run_validation(&ClosingStockSchema, &staged);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].row_ids, vec![1]);
        assert!(issues[0].message.contains("negative"));
    }
}
