// ==========================================
// Quarry Ops Import - Domain Schemas
// ==========================================
// One schema declaration per monthly data-entry screen. All pipeline
// behavior lives in the generic components; these files only map
// columns, name the identity field and state the business rules.
// ==========================================

pub mod closing_stock;
pub mod inward_consumption;
pub mod ledger;
pub mod other_expense;
pub mod other_income;
pub mod sales;
pub mod vsi_hours;

pub use closing_stock::{ClosingStockDto, ClosingStockRow, ClosingStockSchema};
pub use inward_consumption::{
    InwardConsumptionDto, InwardConsumptionRow, InwardConsumptionSchema, MATERIAL_SWAP,
};
pub use ledger::{LedgerDto, LedgerRow, LedgerSchema};
pub use other_expense::{OtherExpenseDto, OtherExpenseRow, OtherExpenseSchema};
pub use other_income::{OtherIncomeDto, OtherIncomeRow, OtherIncomeSchema};
pub use sales::{SalesDto, SalesRow, SalesSchema};
pub use vsi_hours::{VsiHoursDto, VsiHoursRow, VsiHoursSchema};
