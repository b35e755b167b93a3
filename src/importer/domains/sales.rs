// ==========================================
// Quarry Ops Import - Sales Schema
// ==========================================
// Sheet 0, columns A-H from row 2. The one domain with compound
// cross-row rules: the unbilled-cash ban and the composite-key
// duplicate checks.
// ==========================================

use crate::domain::{ImportDomain, Period};
use crate::importer::schema::{col, DomainSchema, RowCells, StagedRecord};
use crate::importer::staging::StagedRow;
use crate::importer::validation::ValidationIssue;
use serde::Serialize;
use std::collections::HashSet;

pub const BILLED: &str = "Billed";
pub const UNBILLED: &str = "Unbilled";
pub const CASH: &str = "CASH";
pub const GST: &str = "GST";

#[derive(Debug, Clone, PartialEq)]
pub struct SalesRow {
    pub serial_no: u32,
    pub product_name: String,
    pub quarry_name: String,
    pub sales_in_tons: f64,
    pub rate: f64,
    pub amount: f64,
    pub billing_status: String,
    pub payment_type: String,
}

impl StagedRecord for SalesRow {
    fn set_serial_no(&mut self, serial: u32) {
        self.serial_no = serial;
    }
}

/// Backend submission shape; no staging id, no serial.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesDto {
    pub month: String,
    pub year: String,
    pub product_name: String,
    pub quarry_name: String,
    pub sales_in_tons: f64,
    pub rate: f64,
    pub amount: f64,
    pub billing_status: String,
    pub payment_type: String,
}

pub struct SalesSchema;

impl DomainSchema for SalesSchema {
    type Row = SalesRow;
    type Dto = SalesDto;

    fn domain(&self) -> ImportDomain {
        ImportDomain::Sales
    }

    fn sheet_index(&self) -> usize {
        0
    }

    fn read_row(&self, cells: &RowCells<'_>) -> SalesRow {
        SalesRow {
            serial_no: 0,
            product_name: cells.string(col('B')),
            quarry_name: cells.string(col('C')),
            sales_in_tons: cells.number(col('D')),
            rate: cells.number(col('E')),
            amount: cells.number(col('F')),
            billing_status: cells.string(col('G')),
            payment_type: cells.string(col('H')),
        }
    }

    fn identity<'a>(&self, row: &'a SalesRow) -> &'a str {
        &row.product_name
    }

    fn primary_quantity(&self, row: &SalesRow) -> f64 {
        row.sales_in_tons
    }

    fn validate(&self, staged: &[StagedRow<SalesRow>]) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        // Unbilled sales may never be settled in cash.
        let cash_rows: Vec<u32> = staged
            .iter()
            .filter(|s| s.row.billing_status == UNBILLED && s.row.payment_type == CASH)
            .map(|s| s.id)
            .collect();
        if !cash_rows.is_empty() {
            issues.push(ValidationIssue::new(
                ImportDomain::Sales,
                "Unbilled sales cannot be settled in CASH",
                cash_rows,
            ));
        }

        // Within unbilled GST rows the (product, quarry) key must be
        // unique. Only the second and later occurrences are flagged.
        let mut seen_unbilled: HashSet<(&str, &str)> = HashSet::new();
        for entry in staged {
            if entry.row.billing_status != UNBILLED || entry.row.payment_type != GST {
                continue;
            }
            let key = (entry.row.product_name.as_str(), entry.row.quarry_name.as_str());
            if !seen_unbilled.insert(key) {
                issues.push(ValidationIssue::new(
                    ImportDomain::Sales,
                    format!(
                        "duplicate unbilled GST entry for {} / {}",
                        entry.row.product_name, entry.row.quarry_name
                    ),
                    vec![entry.id],
                ));
            }
        }

        // Within billed rows the (product, quarry, payment) key must
        // be unique.
        let mut seen_billed: HashSet<(&str, &str, &str)> = HashSet::new();
        for entry in staged {
            if entry.row.billing_status != BILLED {
                continue;
            }
            let key = (
                entry.row.product_name.as_str(),
                entry.row.quarry_name.as_str(),
                entry.row.payment_type.as_str(),
            );
            if !seen_billed.insert(key) {
                issues.push(ValidationIssue::new(
                    ImportDomain::Sales,
                    format!(
                        "duplicate billed entry for {} / {} ({})",
                        entry.row.product_name, entry.row.quarry_name, entry.row.payment_type
                    ),
                    vec![entry.id],
                ));
            }
        }

        issues
    }

    fn to_dto(&self, row: &SalesRow, period: &Period) -> SalesDto {
        SalesDto {
            month: period.month_str(),
            year: period.year_str(),
            product_name: row.product_name.clone(),
            quarry_name: row.quarry_name.clone(),
            sales_in_tons: row.sales_in_tons,
            rate: row.rate,
            amount: row.amount,
            billing_status: row.billing_status.clone(),
            payment_type: row.payment_type.clone(),
        }
    }
}
