// ==========================================
// Quarry Ops Import - VSI Hours Schema
// ==========================================
// Sheet 5, columns A-C from row 2. The template carries footnote rows
// whose machine name starts with '*'; those are dropped at parse time.
// ==========================================

use crate::domain::{ImportDomain, Period};
use crate::importer::schema::{col, DomainSchema, RowCells, StagedRecord};
use crate::importer::staging::StagedRow;
use crate::importer::validation::ValidationIssue;
use serde::Serialize;

/// Reserved marker for footnote/comment rows in the VSI sheet.
pub const FOOTNOTE_MARKER: char = '*';

#[derive(Debug, Clone, PartialEq)]
pub struct VsiHoursRow {
    pub serial_no: u32,
    pub vsi_name: String,
    pub working_hours: f64,
    pub crushed_tons: f64,
}

impl StagedRecord for VsiHoursRow {
    fn set_serial_no(&mut self, serial: u32) {
        self.serial_no = serial;
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VsiHoursDto {
    pub month: String,
    pub year: String,
    pub vsi_name: String,
    pub working_hours: f64,
    pub crushed_tons: f64,
}

pub struct VsiHoursSchema;

impl DomainSchema for VsiHoursSchema {
    type Row = VsiHoursRow;
    type Dto = VsiHoursDto;

    fn domain(&self) -> ImportDomain {
        ImportDomain::VsiHours
    }

    fn sheet_index(&self) -> usize {
        5
    }

    fn footnote_marker(&self) -> Option<char> {
        Some(FOOTNOTE_MARKER)
    }

    fn read_row(&self, cells: &RowCells<'_>) -> VsiHoursRow {
        VsiHoursRow {
            serial_no: 0,
            vsi_name: cells.string(col('A')),
            working_hours: cells.number(col('B')),
            crushed_tons: cells.number(col('C')),
        }
    }

    fn identity<'a>(&self, row: &'a VsiHoursRow) -> &'a str {
        &row.vsi_name
    }

    fn primary_quantity(&self, row: &VsiHoursRow) -> f64 {
        row.working_hours
    }

    fn validate(&self, _staged: &[StagedRow<VsiHoursRow>]) -> Vec<ValidationIssue> {
        Vec::new()
    }

    fn to_dto(&self, row: &VsiHoursRow, period: &Period) -> VsiHoursDto {
        VsiHoursDto {
            month: period.month_str(),
            year: period.year_str(),
            vsi_name: row.vsi_name.clone(),
            working_hours: row.working_hours,
            crushed_tons: row.crushed_tons,
        }
    }
}
