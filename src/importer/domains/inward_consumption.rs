// ==========================================
// Quarry Ops Import - Inward/Consumption Slurry Schema
// ==========================================
// Sheet 6, columns A-E from row 2: one row per material, one numeric
// column per quarry site. The synthetic "Material Swap" rows record
// transfers between quarries and must net to zero before submission.
// ==========================================

use crate::domain::{ImportDomain, Period};
use crate::importer::schema::{col, DomainSchema, RowCells, StagedRecord};
use crate::importer::staging::StagedRow;
use crate::importer::validation::ValidationIssue;
use serde::Serialize;

/// Row category carrying inter-quarry transfer adjustments.
pub const MATERIAL_SWAP: &str = "Material Swap";

// Tolerance for float accumulation across quarry columns.
const ZERO_SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct InwardConsumptionRow {
    pub serial_no: u32,
    pub material_name: String,
    pub quarry1_tons: f64,
    pub quarry2_tons: f64,
    pub quarry3_tons: f64,
    pub quarry4_tons: f64,
}

impl InwardConsumptionRow {
    pub fn quarry_total(&self) -> f64 {
        self.quarry1_tons + self.quarry2_tons + self.quarry3_tons + self.quarry4_tons
    }

    pub fn is_material_swap(&self) -> bool {
        self.material_name == MATERIAL_SWAP
    }
}

impl StagedRecord for InwardConsumptionRow {
    fn set_serial_no(&mut self, serial: u32) {
        self.serial_no = serial;
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InwardConsumptionDto {
    pub month: String,
    pub year: String,
    pub material_name: String,
    pub quarry1_tons: f64,
    pub quarry2_tons: f64,
    pub quarry3_tons: f64,
    pub quarry4_tons: f64,
}

pub struct InwardConsumptionSchema;

impl DomainSchema for InwardConsumptionSchema {
    type Row = InwardConsumptionRow;
    type Dto = InwardConsumptionDto;

    fn domain(&self) -> ImportDomain {
        ImportDomain::InwardConsumptionSlurry
    }

    fn sheet_index(&self) -> usize {
        6
    }

    fn read_row(&self, cells: &RowCells<'_>) -> InwardConsumptionRow {
        InwardConsumptionRow {
            serial_no: 0,
            material_name: cells.string(col('A')),
            quarry1_tons: cells.number(col('B')),
            quarry2_tons: cells.number(col('C')),
            quarry3_tons: cells.number(col('D')),
            quarry4_tons: cells.number(col('E')),
        }
    }

    fn identity<'a>(&self, row: &'a InwardConsumptionRow) -> &'a str {
        &row.material_name
    }

    // Swap rows carry signed adjustments; they are exempt from the
    // baseline non-negativity rule and covered by the zero-sum check.
    fn primary_quantity(&self, row: &InwardConsumptionRow) -> f64 {
        if row.is_material_swap() {
            0.0
        } else {
            row.quarry1_tons
                .min(row.quarry2_tons)
                .min(row.quarry3_tons)
                .min(row.quarry4_tons)
        }
    }

    fn validate(&self, staged: &[StagedRow<InwardConsumptionRow>]) -> Vec<ValidationIssue> {
        let swap_rows: Vec<&StagedRow<InwardConsumptionRow>> = staged
            .iter()
            .filter(|s| s.row.is_material_swap())
            .collect();
        if swap_rows.is_empty() {
            return Vec::new();
        }

        let net: f64 = swap_rows.iter().map(|s| s.row.quarry_total()).sum();
        if net.abs() > ZERO_SUM_TOLERANCE {
            return vec![ValidationIssue::new(
                ImportDomain::InwardConsumptionSlurry,
                format!(
                    "Material Swap rows must net to zero across quarry columns (net {:+.3})",
                    net
                ),
                swap_rows.iter().map(|s| s.id).collect(),
            )];
        }

        Vec::new()
    }

    fn to_dto(&self, row: &InwardConsumptionRow, period: &Period) -> InwardConsumptionDto {
        InwardConsumptionDto {
            month: period.month_str(),
            year: period.year_str(),
            material_name: row.material_name.clone(),
            quarry1_tons: row.quarry1_tons,
            quarry2_tons: row.quarry2_tons,
            quarry3_tons: row.quarry3_tons,
            quarry4_tons: row.quarry4_tons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(rows: Vec<InwardConsumptionRow>) -> Vec<StagedRow<InwardConsumptionRow>> {
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| StagedRow {
                id: i as u32 + 1,
                row,
            })
            .collect()
    }

    fn row(material: &str, q1: f64, q2: f64, q3: f64, q4: f64) -> InwardConsumptionRow {
        InwardConsumptionRow {
            serial_no: 0,
            material_name: material.to_string(),
            quarry1_tons: q1,
            quarry2_tons: q2,
            quarry3_tons: q3,
            quarry4_tons: q4,
        }
    }

    #[test]
    fn test_unbalanced_swap_is_rejected() {
        let rows = staged(vec![
            row("Slurry", 120.0, 80.0, 0.0, 40.0),
            row(MATERIAL_SWAP, 50.0, -30.0, 0.0, 0.0),
        ]);

        let issues = InwardConsumptionSchema.validate(&rows);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].row_ids, vec![2]);
        assert!(issues[0].message.contains("net"));
    }

    #[test]
    fn test_balanced_swap_passes() {
        let rows = staged(vec![
            row("Slurry", 120.0, 80.0, 0.0, 40.0),
            row(MATERIAL_SWAP, 50.0, -30.0, -20.0, 0.0),
        ]);

        assert!(InwardConsumptionSchema.validate(&rows).is_empty());
    }

    #[test]
    fn test_swap_balances_across_multiple_rows() {
        let rows = staged(vec![
            row(MATERIAL_SWAP, 50.0, 0.0, 0.0, 0.0),
            row(MATERIAL_SWAP, -50.0, 0.0, 0.0, 0.0),
        ]);

        assert!(InwardConsumptionSchema.validate(&rows).is_empty());
    }

    #[test]
    fn test_swap_rows_are_exempt_from_baseline_negativity() {
        use crate::importer::validation::run_validation;

        let rows = staged(vec![row(MATERIAL_SWAP, -10.0, 10.0, 0.0, 0.0)]);
        let issues = run_validation(&InwardConsumptionSchema, &rows);

        assert!(issues.is_empty());
    }

    #[test]
    fn test_negative_regular_row_fails_baseline() {
        use crate::importer::validation::run_validation;

        let rows = staged(vec![row("Slurry", -10.0, 10.0, 0.0, 0.0)]);
        let issues = run_validation(&InwardConsumptionSchema, &rows);

        assert_eq!(issues.len(), 1);
    }
}
