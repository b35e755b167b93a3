// ==========================================
// Quarry Ops Import - CLI Entry Point
// ==========================================
// Drives one full import lifecycle from the command line:
//   quarry-ops-import <domain> <file.xlsx> [<month> <year>]
// Month and year default to the previous calendar month. The
// interactive dashboard owns the review step; the CLI previews,
// pre-warns and submits in one pass.
// ==========================================

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};

use quarry_ops_import::backend::HttpBackendGateway;
use quarry_ops_import::config::BackendConfig;
use quarry_ops_import::domain::{ImportDomain, Period};
use quarry_ops_import::importer::{DomainSchema, ImportSession};
use quarry_ops_import::importer::domains::{
    ClosingStockSchema, InwardConsumptionSchema, LedgerSchema, OtherExpenseSchema,
    OtherIncomeSchema, SalesSchema, VsiHoursSchema,
};
use quarry_ops_import::logging;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    info!("==================================================");
    info!("{}", quarry_ops_import::APP_NAME);
    info!("version: {}", quarry_ops_import::VERSION);
    info!("==================================================");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("import failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (domain_slug, file_path, period) = match args.as_slice() {
        [domain_slug, file_path] => {
            let period = Period::preceding(chrono::Local::now().date_naive());
            (domain_slug, file_path, period)
        }
        [domain_slug, file_path, month, year] => {
            (domain_slug, file_path, Period::new(month.parse()?, year.parse()?)?)
        }
        _ => anyhow::bail!("usage: quarry-ops-import <domain> <file.xlsx> [<month> <year>]"),
    };

    let domain = ImportDomain::from_slug(domain_slug)
        .ok_or_else(|| anyhow::anyhow!("unknown domain: {domain_slug}"))?;

    let config = BackendConfig::from_env()?;
    info!(backend = %config.base_url, "using backend");
    let gateway = Arc::new(HttpBackendGateway::new(&config)?);

    match domain {
        ImportDomain::Sales => run_import(SalesSchema, gateway, file_path, period).await,
        ImportDomain::Ledger => run_import(LedgerSchema, gateway, file_path, period).await,
        ImportDomain::OtherIncome => {
            run_import(OtherIncomeSchema, gateway, file_path, period).await
        }
        ImportDomain::OtherExpense => {
            run_import(OtherExpenseSchema, gateway, file_path, period).await
        }
        ImportDomain::ClosingStock => {
            run_import(ClosingStockSchema, gateway, file_path, period).await
        }
        ImportDomain::VsiHours => run_import(VsiHoursSchema, gateway, file_path, period).await,
        ImportDomain::InwardConsumptionSlurry => {
            run_import(InwardConsumptionSchema, gateway, file_path, period).await
        }
    }
}

async fn run_import<S: DomainSchema>(
    schema: S,
    gateway: Arc<HttpBackendGateway>,
    file_path: &str,
    period: Period,
) -> anyhow::Result<()> {
    let file_name = Path::new(file_path)
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("invalid file path: {file_path}"))?
        .to_string();
    let payload = std::fs::read(file_path)?;

    let mut session = ImportSession::new(schema, gateway);
    session.select_file(&file_name, payload)?;

    let staged = session.preview()?;
    info!(staged, "rows staged for submission");

    let warning = session.choose_period(period).await?;
    if warning.already_exists {
        warn!(%period, "backend already holds data for this period; submit will be rejected");
    }

    let receipt = session.submit().await?;
    info!(
        domain = %receipt.domain,
        period = %receipt.period,
        rows = receipt.submitted_rows,
        "batch committed"
    );
    if let Some(records) = receipt.refreshed {
        info!(committed = records.len(), "backend now holds");
    }
    Ok(())
}
