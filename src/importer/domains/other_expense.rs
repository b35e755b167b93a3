// ==========================================
// Quarry Ops Import - Other Expense Schema
// ==========================================
// Sheet 3, columns A-D from row 2. Baseline rules only.
// ==========================================

use crate::domain::{ImportDomain, Period};
use crate::importer::schema::{col, DomainSchema, RowCells, StagedRecord};
use crate::importer::staging::StagedRow;
use crate::importer::validation::ValidationIssue;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct OtherExpenseRow {
    pub serial_no: u32,
    pub expense_head: String,
    pub amount: f64,
    pub remarks: String,
}

impl StagedRecord for OtherExpenseRow {
    fn set_serial_no(&mut self, serial: u32) {
        self.serial_no = serial;
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherExpenseDto {
    pub month: String,
    pub year: String,
    pub expense_head: String,
    pub amount: f64,
    pub remarks: String,
}

pub struct OtherExpenseSchema;

impl DomainSchema for OtherExpenseSchema {
    type Row = OtherExpenseRow;
    type Dto = OtherExpenseDto;

    fn domain(&self) -> ImportDomain {
        ImportDomain::OtherExpense
    }

    fn sheet_index(&self) -> usize {
        3
    }

    fn read_row(&self, cells: &RowCells<'_>) -> OtherExpenseRow {
        OtherExpenseRow {
            serial_no: 0,
            expense_head: cells.string(col('B')),
            amount: cells.number(col('C')),
            remarks: cells.string(col('D')),
        }
    }

    fn identity<'a>(&self, row: &'a OtherExpenseRow) -> &'a str {
        &row.expense_head
    }

    fn primary_quantity(&self, row: &OtherExpenseRow) -> f64 {
        row.amount
    }

    fn validate(&self, _staged: &[StagedRow<OtherExpenseRow>]) -> Vec<ValidationIssue> {
        Vec::new()
    }

    fn to_dto(&self, row: &OtherExpenseRow, period: &Period) -> OtherExpenseDto {
        OtherExpenseDto {
            month: period.month_str(),
            year: period.year_str(),
            expense_head: row.expense_head.clone(),
            amount: row.amount,
            remarks: row.remarks.clone(),
        }
    }
}
