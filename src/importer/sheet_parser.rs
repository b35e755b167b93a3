// ==========================================
// Quarry Ops Import - Sheet Parser
// ==========================================
// Decodes an uploaded spreadsheet payload into the domain's row
// records. Pure function of (schema, payload): never touches the
// staging store, never returns partial results.
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::schema::{DomainSchema, RowCells, StagedRecord};
use calamine::{open_workbook_auto_from_rs, Reader};
use std::io::Cursor;
use tracing::debug;

pub struct SheetParser;

impl SheetParser {
    /// Parse a binary workbook payload into admitted, renumbered rows.
    ///
    /// Admission: the identity field must be non-empty after coercion
    /// and must not start with the domain's footnote marker. Admitted
    /// rows get serials 1..N in sheet order.
    pub fn parse<S: DomainSchema>(schema: &S, payload: &[u8]) -> ImportResult<Vec<S::Row>> {
        let cursor = Cursor::new(payload);
        let mut workbook = open_workbook_auto_from_rs(cursor)
            .map_err(|e| ImportError::WorkbookRead(e.to_string()))?;

        let sheet_index = schema.sheet_index();
        let range = workbook
            .worksheet_range_at(sheet_index)
            .ok_or(ImportError::MissingSheet { index: sheet_index })?
            .map_err(|e| ImportError::WorkbookRead(e.to_string()))?;

        let (last_row, _) = range
            .end()
            .ok_or(ImportError::EmptySheet { index: sheet_index })?;

        // first_data_row is 1-based; range coordinates are 0-based.
        let first_row = schema.first_data_row().saturating_sub(1);

        let mut rows: Vec<S::Row> = Vec::new();
        for row_index in first_row..=last_row {
            let cells = RowCells::new(&range, row_index);
            let row = schema.read_row(&cells);

            let identity = schema.identity(&row);
            if identity.is_empty() {
                continue;
            }
            if let Some(marker) = schema.footnote_marker() {
                if identity.starts_with(marker) {
                    continue;
                }
            }

            rows.push(row);
        }

        // Serials restart at 1 for the admitted sequence.
        for (index, row) in rows.iter_mut().enumerate() {
            row.set_serial_no(index as u32 + 1);
        }

        debug!(
            domain = %schema.domain(),
            sheet_index,
            admitted = rows.len(),
            "sheet parsed"
        );

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::domains::{SalesSchema, VsiHoursSchema};
    use rust_xlsxwriter::Workbook;

    // Build a workbook whose first sheet is the sales template:
    // A serial, B product, C quarry, D tons, E rate, F amount,
    // G billing status, H payment type.
    fn sales_workbook(rows: &[(&str, &str, f64, &str, &str)]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let header = [
            "SNo", "Product", "Quarry", "Sales (t)", "Rate", "Amount", "Billing", "Payment",
        ];
        for (c, h) in header.iter().enumerate() {
            sheet.write(0, c as u16, *h).unwrap();
        }
        for (r, (product, quarry, tons, billing, payment)) in rows.iter().enumerate() {
            let r = (r + 1) as u32;
            sheet.write(r, 0, (r) as f64).unwrap();
            sheet.write(r, 1, *product).unwrap();
            sheet.write(r, 2, *quarry).unwrap();
            sheet.write(r, 3, *tons).unwrap();
            sheet.write(r, 4, 100.0).unwrap();
            sheet.write(r, 5, tons * 100.0).unwrap();
            sheet.write(r, 6, *billing).unwrap();
            sheet.write(r, 7, *payment).unwrap();
        }
        workbook.save_to_buffer().unwrap()
    }

    // Workbook with the VSI hours sheet at index 5 (five leading
    // sheets of unrelated data).
    fn vsi_workbook(rows: &[(&str, f64, f64)]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        for _ in 0..5 {
            let filler = workbook.add_worksheet();
            filler.write(0, 0, "placeholder").unwrap();
        }
        let sheet = workbook.add_worksheet();
        sheet.write(0, 0, "VSI").unwrap();
        sheet.write(0, 1, "Hours").unwrap();
        sheet.write(0, 2, "Crushed (t)").unwrap();
        for (r, (name, hours, crushed)) in rows.iter().enumerate() {
            let r = (r + 1) as u32;
            sheet.write(r, 0, *name).unwrap();
            sheet.write(r, 1, *hours).unwrap();
            sheet.write(r, 2, *crushed).unwrap();
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_blank_identity_rows_dropped_and_renumbered() {
        // Scenario: 3 valid rows plus one row lacking a product name.
        let payload = sales_workbook(&[
            ("20mm Metal", "East Quarry", 120.0, "Billed", "GST"),
            ("", "East Quarry", 10.0, "Billed", "GST"),
            ("40mm Metal", "East Quarry", 80.0, "Billed", "GST"),
            ("Dust", "West Quarry", 60.0, "Billed", "CASH"),
        ]);

        let rows = SheetParser::parse(&SalesSchema, &payload).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].serial_no, 1);
        assert_eq!(rows[1].serial_no, 2);
        assert_eq!(rows[2].serial_no, 3);
        assert_eq!(rows[1].product_name, "40mm Metal");
    }

    #[test]
    fn test_footnote_rows_skipped() {
        let payload = vsi_workbook(&[
            ("VSI-1", 180.0, 5400.0),
            ("* hours exclude maintenance downtime", 0.0, 0.0),
            ("VSI-2", 165.0, 4900.0),
        ]);

        let rows = SheetParser::parse(&VsiHoursSchema, &payload).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].vsi_name, "VSI-1");
        assert_eq!(rows[1].vsi_name, "VSI-2");
        assert_eq!(rows[1].serial_no, 2);
    }

    #[test]
    fn test_preview_is_idempotent() {
        let payload = sales_workbook(&[
            ("20mm Metal", "East Quarry", 120.0, "Billed", "GST"),
            ("Dust", "West Quarry", 60.0, "Unbilled", "GST"),
        ]);

        let first = SheetParser::parse(&SalesSchema, &payload).unwrap();
        let second = SheetParser::parse(&SalesSchema, &payload).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_sheet_is_a_parse_failure() {
        // Only one sheet; the VSI schema wants index 5.
        let payload = sales_workbook(&[("20mm Metal", "East Quarry", 120.0, "Billed", "GST")]);

        let result = SheetParser::parse(&VsiHoursSchema, &payload);

        assert!(matches!(result, Err(ImportError::MissingSheet { index: 5 })));
    }

    #[test]
    fn test_unreadable_payload_is_a_parse_failure() {
        let result = SheetParser::parse(&SalesSchema, b"not a workbook");
        assert!(matches!(result, Err(ImportError::WorkbookRead(_))));
    }

    #[test]
    fn test_numeric_text_coerces_and_blank_defaults_to_zero() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write(0, 0, "SNo").unwrap();
        sheet.write(1, 1, "Dust").unwrap();
        sheet.write(1, 2, "West Quarry").unwrap();
        sheet.write(1, 3, "15.5").unwrap(); // numeric text
        sheet.write(1, 6, "Billed").unwrap();
        sheet.write(1, 7, "GST").unwrap();
        // E (rate) and F (amount) left blank on purpose.
        let payload = workbook.save_to_buffer().unwrap();

        let rows = SheetParser::parse(&SalesSchema, &payload).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sales_in_tons, 15.5);
        assert_eq!(rows[0].rate, 0.0);
        assert_eq!(rows[0].amount, 0.0);
    }
}
