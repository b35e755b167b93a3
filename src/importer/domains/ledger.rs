// ==========================================
// Quarry Ops Import - Ledger Schema
// ==========================================
// Sheet 1, columns A-D from row 2. Baseline rules only.
// ==========================================

use crate::domain::{ImportDomain, Period};
use crate::importer::schema::{col, DomainSchema, RowCells, StagedRecord};
use crate::importer::staging::StagedRow;
use crate::importer::validation::ValidationIssue;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub serial_no: u32,
    pub ledger_name: String,
    pub amount: f64,
    pub narration: String,
}

impl StagedRecord for LedgerRow {
    fn set_serial_no(&mut self, serial: u32) {
        self.serial_no = serial;
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerDto {
    pub month: String,
    pub year: String,
    pub ledger_name: String,
    pub amount: f64,
    pub narration: String,
}

pub struct LedgerSchema;

impl DomainSchema for LedgerSchema {
    type Row = LedgerRow;
    type Dto = LedgerDto;

    fn domain(&self) -> ImportDomain {
        ImportDomain::Ledger
    }

    fn sheet_index(&self) -> usize {
        1
    }

    fn read_row(&self, cells: &RowCells<'_>) -> LedgerRow {
        LedgerRow {
            serial_no: 0,
            ledger_name: cells.string(col('B')),
            amount: cells.number(col('C')),
            narration: cells.string(col('D')),
        }
    }

    fn identity<'a>(&self, row: &'a LedgerRow) -> &'a str {
        &row.ledger_name
    }

    fn primary_quantity(&self, row: &LedgerRow) -> f64 {
        row.amount
    }

    fn validate(&self, _staged: &[StagedRow<LedgerRow>]) -> Vec<ValidationIssue> {
        Vec::new()
    }

    fn to_dto(&self, row: &LedgerRow, period: &Period) -> LedgerDto {
        LedgerDto {
            month: period.month_str(),
            year: period.year_str(),
            ledger_name: row.ledger_name.clone(),
            amount: row.amount,
            narration: row.narration.clone(),
        }
    }
}
