// ==========================================
// Quarry Ops Import - Importer Layer
// ==========================================
// Responsibility: turn an uploaded spreadsheet into a committed batch
// Flow: parse -> stage -> review -> period check -> validate -> submit
// ==========================================

// Module declarations
pub mod domains;
pub mod error;
pub mod schema;
pub mod session;
pub mod sheet_parser;
pub mod staging;
pub mod validation;

// Re-export core types
pub use error::{ImportError, ImportResult};
pub use schema::{DomainSchema, StagedRecord};
pub use session::{
    CommitReceipt, ImportSession, PeriodWarning, SessionError, SessionPhase, SessionResult,
};
pub use sheet_parser::SheetParser;
pub use staging::{StagedRow, StagingStore};
pub use validation::{run_validation, ValidationIssue, ValidationReport};
