// ==========================================
// Quarry Ops Import - Core Library
// ==========================================
// Bulk spreadsheet import pipeline for the quarry operations
// dashboard: parse -> stage -> review -> validate -> commit.
// The backend REST service stays the system of record; this crate
// never persists anything locally.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - shared types
pub mod domain;

// Importer layer - the staged import pipeline
pub mod importer;

// Backend layer - REST gateway to the system of record
pub mod backend;

// Configuration layer
pub mod config;

// Logging
pub mod logging;

// ==========================================
// Re-export core types
// ==========================================

// Domain types
pub use domain::{ImportDomain, Period, PeriodError};

// Import pipeline
pub use importer::{
    CommitReceipt, DomainSchema, ImportError, ImportResult, ImportSession, PeriodWarning,
    SessionError, SessionPhase, SheetParser, StagedRow, StagingStore, ValidationIssue,
    ValidationReport,
};

// Domain schemas
pub use importer::domains::{
    ClosingStockSchema, InwardConsumptionSchema, LedgerSchema, OtherExpenseSchema,
    OtherIncomeSchema, SalesSchema, VsiHoursSchema,
};

// Backend gateway
pub use backend::{BackendError, BackendGateway, BackendResult, HttpBackendGateway};

// Configuration
pub use config::BackendConfig;

// ==========================================
// Constants
// ==========================================

// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Application name
pub const APP_NAME: &str = "Quarry Ops Import";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
