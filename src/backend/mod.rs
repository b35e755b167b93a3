// ==========================================
// Quarry Ops Import - Backend Layer
// ==========================================
// Remote data access. The dashboard backend is the store of record;
// nothing in this crate persists locally.
// ==========================================

pub mod error;
pub mod gateway;

pub use error::{BackendError, BackendResult};
pub use gateway::{BackendGateway, HttpBackendGateway};
