// ==========================================
// Quarry Ops Import - Other Income Schema
// ==========================================
// Sheet 2, columns A-D from row 2. Baseline rules only.
// ==========================================

use crate::domain::{ImportDomain, Period};
use crate::importer::schema::{col, DomainSchema, RowCells, StagedRecord};
use crate::importer::staging::StagedRow;
use crate::importer::validation::ValidationIssue;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct OtherIncomeRow {
    pub serial_no: u32,
    pub income_head: String,
    pub amount: f64,
    pub remarks: String,
}

impl StagedRecord for OtherIncomeRow {
    fn set_serial_no(&mut self, serial: u32) {
        self.serial_no = serial;
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherIncomeDto {
    pub month: String,
    pub year: String,
    pub income_head: String,
    pub amount: f64,
    pub remarks: String,
}

pub struct OtherIncomeSchema;

impl DomainSchema for OtherIncomeSchema {
    type Row = OtherIncomeRow;
    type Dto = OtherIncomeDto;

    fn domain(&self) -> ImportDomain {
        ImportDomain::OtherIncome
    }

    fn sheet_index(&self) -> usize {
        2
    }

    fn read_row(&self, cells: &RowCells<'_>) -> OtherIncomeRow {
        OtherIncomeRow {
            serial_no: 0,
            income_head: cells.string(col('B')),
            amount: cells.number(col('C')),
            remarks: cells.string(col('D')),
        }
    }

    fn identity<'a>(&self, row: &'a OtherIncomeRow) -> &'a str {
        &row.income_head
    }

    fn primary_quantity(&self, row: &OtherIncomeRow) -> f64 {
        row.amount
    }

    fn validate(&self, _staged: &[StagedRow<OtherIncomeRow>]) -> Vec<ValidationIssue> {
        Vec::new()
    }

    fn to_dto(&self, row: &OtherIncomeRow, period: &Period) -> OtherIncomeDto {
        OtherIncomeDto {
            month: period.month_str(),
            year: period.year_str(),
            income_head: row.income_head.clone(),
            amount: row.amount,
            remarks: row.remarks.clone(),
        }
    }
}
