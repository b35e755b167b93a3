// ==========================================
// Quarry Ops Import - Domain Layer
// ==========================================
// Value types shared by the pipeline, the gateway and the CLI.
// No parsing, no I/O, no business rules here.
// ==========================================

pub mod types;

pub use types::{ImportDomain, Period, PeriodError};
