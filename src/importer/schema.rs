// ==========================================
// Quarry Ops Import - Domain Schema Trait
// ==========================================
// One implementation per data-entry screen. The schema declares the
// sheet position, the column-to-field mapping with coercions, the
// identity field, the cross-row business rules and the backend
// submission shape. Everything else in the pipeline is generic.
// ==========================================

use crate::domain::{ImportDomain, Period};
use crate::importer::staging::StagedRow;
use crate::importer::validation::ValidationIssue;
use calamine::{Data, Range};
use serde::Serialize;

/// Zero-based column index for a spreadsheet column letter (A-Z).
///
/// Templates never reach past column Z, so multi-letter addresses
/// are not supported.
pub const fn col(letter: char) -> u32 {
    letter as u32 - 'A' as u32
}

// ==========================================
// Cell coercion
// ==========================================
// No type guarantees exist in the grid; every read goes through one
// of these. Blank or unparsable numeric cells coerce to 0.

/// String coercion: trimmed text; integral floats render without a
/// trailing ".0" so serials and codes survive Excel's number typing.
pub(crate) fn cell_string(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// Numeric coercion: numbers pass through, numeric text is parsed,
/// everything else (blank cells included) defaults to 0.
pub(crate) fn cell_f64(data: &Data) -> f64 {
    match data {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Column-addressed access to one spreadsheet row.
pub struct RowCells<'a> {
    range: &'a Range<Data>,
    row: u32,
}

impl<'a> RowCells<'a> {
    pub(crate) fn new(range: &'a Range<Data>, row: u32) -> Self {
        Self { range, row }
    }

    pub fn string(&self, column: u32) -> String {
        self.range
            .get_value((self.row, column))
            .map(cell_string)
            .unwrap_or_default()
    }

    pub fn number(&self, column: u32) -> f64 {
        self.range
            .get_value((self.row, column))
            .map(cell_f64)
            .unwrap_or(0.0)
    }
}

// ==========================================
// StagedRecord Trait
// ==========================================
// Implemented by every domain row struct. The staging store rewrites
// the visible serial whenever the set is renumbered.
pub trait StagedRecord {
    fn set_serial_no(&mut self, serial: u32);
}

// ==========================================
// DomainSchema Trait
// ==========================================
// Per-domain declaration consumed by SheetParser, the validation
// engine and the import session.
pub trait DomainSchema: Send + Sync {
    /// Staged row shape for this domain.
    type Row: StagedRecord + Clone + Send + Sync + 'static;

    /// Backend submission shape; internal id and serial never appear.
    type Dto: Serialize;

    fn domain(&self) -> ImportDomain;

    /// Zero-based worksheet index in the monthly template workbook.
    fn sheet_index(&self) -> usize;

    /// First data row, 1-based. Row 1 is the header in every template.
    fn first_data_row(&self) -> u32 {
        2
    }

    /// Reserved marker: rows whose identity starts with this character
    /// are footnotes and are dropped at parse time.
    fn footnote_marker(&self) -> Option<char> {
        None
    }

    /// Map one spreadsheet row into the domain row, applying the
    /// per-field coercions.
    fn read_row(&self, cells: &RowCells<'_>) -> Self::Row;

    /// The identity field; rows with an empty identity are not admitted.
    fn identity<'a>(&self, row: &'a Self::Row) -> &'a str;

    /// The quantity/amount field checked by the baseline
    /// non-negativity rule.
    fn primary_quantity(&self, row: &Self::Row) -> f64;

    /// Cross-row business rules, run batch-wide over the staged set.
    fn validate(&self, staged: &[StagedRow<Self::Row>]) -> Vec<ValidationIssue>;

    /// Transform one row into the backend's submission shape for the
    /// target period.
    fn to_dto(&self, row: &Self::Row, period: &Period) -> Self::Dto;
}
