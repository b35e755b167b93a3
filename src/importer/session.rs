// ==========================================
// Quarry Ops Import - Import Session
// ==========================================
// Owns one import lifecycle end to end:
//   Idle -> FileSelected -> Previewed -> PeriodChosen -> Submitting
//        -> committed (back to Idle) | rejected (back to PeriodChosen)
// The session owns its staging store exclusively; one session per
// data-entry screen. Submit preconditions run strictly in order:
// staged set, period, period lock, validation.
// ==========================================

use crate::backend::{BackendError, BackendGateway};
use crate::domain::{ImportDomain, Period};
use crate::importer::error::ImportError;
use crate::importer::schema::DomainSchema;
use crate::importer::sheet_parser::SheetParser;
use crate::importer::staging::{StagedRow, StagingStore};
use crate::importer::validation::{run_validation, ValidationReport};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Spreadsheet extensions the upload step accepts.
const RECOGNIZED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

// ==========================================
// Lifecycle phase
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    FileSelected,
    Previewed,
    PeriodChosen,
    Submitting,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::FileSelected => "file-selected",
            SessionPhase::Previewed => "previewed",
            SessionPhase::PeriodChosen => "period-chosen",
            SessionPhase::Submitting => "submitting",
        };
        write!(f, "{}", name)
    }
}

// ==========================================
// Session errors
// ==========================================
// Every error is scoped to the current session; none is fatal to the
// process. Staged rows survive every failure path.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("unsupported file type: {0} (expected .xlsx or .xls)")]
    UnsupportedFile(String),

    #[error(transparent)]
    Parse(#[from] ImportError),

    #[error("no rows are staged for submission")]
    NothingStaged,

    #[error("no reporting period has been chosen")]
    NoPeriodChosen,

    #[error("{domain} data already exists for period {period}")]
    PeriodConflict {
        domain: ImportDomain,
        period: Period,
    },

    #[error("{0}")]
    Validation(ValidationReport),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("cannot {action} while the session is {phase}")]
    InvalidPhase {
        action: &'static str,
        phase: SessionPhase,
    },

    #[error("the session was discarded while a request was in flight")]
    Superseded,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

// ==========================================
// Outcomes
// ==========================================

/// Advisory result of the period pre-check. Never blocks progression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodWarning {
    pub period: Period,
    pub already_exists: bool,
}

/// Result of a successful commit. `refreshed` carries the backend's
/// persisted records when the post-commit refresh succeeded; a failed
/// refresh is non-fatal and leaves it empty.
#[derive(Debug)]
pub struct CommitReceipt {
    pub domain: ImportDomain,
    pub period: Period,
    pub submitted_rows: usize,
    pub refreshed: Option<Vec<serde_json::Value>>,
}

struct SelectedFile {
    name: String,
    payload: Vec<u8>,
}

// ==========================================
// ImportSession
// ==========================================
pub struct ImportSession<S: DomainSchema> {
    schema: S,
    gateway: Arc<dyn BackendGateway>,
    session_id: String,
    phase: SessionPhase,
    file: Option<SelectedFile>,
    staging: StagingStore<S::Row>,
    period: Option<Period>,
    // Bumped by discard; awaited responses captured under an older
    // epoch are dropped instead of applied.
    epoch: u64,
}

impl<S: DomainSchema> ImportSession<S> {
    pub fn new(schema: S, gateway: Arc<dyn BackendGateway>) -> Self {
        Self {
            schema,
            gateway,
            session_id: Uuid::new_v4().to_string(),
            phase: SessionPhase::Idle,
            file: None,
            staging: StagingStore::new(),
            period: None,
            epoch: 0,
        }
    }

    pub fn domain(&self) -> ImportDomain {
        self.schema.domain()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn period(&self) -> Option<Period> {
        self.period
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn staged_rows(&self) -> &[StagedRow<S::Row>] {
        self.staging.rows()
    }

    /// Accept an uploaded file. Starts a fresh lifecycle: any staged
    /// rows and period from a previous upload are dropped.
    pub fn select_file(&mut self, name: &str, payload: Vec<u8>) -> SessionResult<()> {
        if self.phase == SessionPhase::Submitting {
            return Err(SessionError::InvalidPhase {
                action: "select a file",
                phase: self.phase,
            });
        }

        let extension = name
            .rsplit('.')
            .next()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !RECOGNIZED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(SessionError::UnsupportedFile(name.to_string()));
        }

        info!(
            session_id = %self.session_id,
            domain = %self.schema.domain(),
            file = %name,
            bytes = payload.len(),
            "file selected"
        );

        self.file = Some(SelectedFile {
            name: name.to_string(),
            payload,
        });
        self.staging.clear();
        self.period = None;
        self.phase = SessionPhase::FileSelected;
        Ok(())
    }

    /// Parse the selected file and stage the admitted rows for review.
    /// A parse failure returns the session to FileSelected; the user
    /// re-selects a file.
    pub fn preview(&mut self) -> SessionResult<usize> {
        if self.phase == SessionPhase::Submitting || self.file.is_none() {
            return Err(SessionError::InvalidPhase {
                action: "preview",
                phase: self.phase,
            });
        }

        let file = self.file.as_ref().ok_or(SessionError::InvalidPhase {
            action: "preview",
            phase: self.phase,
        })?;

        let rows = match SheetParser::parse(&self.schema, &file.payload) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(
                    session_id = %self.session_id,
                    domain = %self.schema.domain(),
                    file = %file.name,
                    error = %e,
                    "preview failed"
                );
                self.phase = SessionPhase::FileSelected;
                return Err(SessionError::Parse(e));
            }
        };

        let staged = rows.len();
        self.staging.replace(rows);
        self.period = None;
        self.phase = SessionPhase::Previewed;

        info!(
            session_id = %self.session_id,
            domain = %self.schema.domain(),
            staged,
            "preview staged"
        );
        Ok(staged)
    }

    /// Delete staged rows; survivors are renumbered to 1..N.
    pub fn remove_rows(&mut self, ids: &[u32]) -> SessionResult<()> {
        self.require_review_phase("delete rows")?;
        self.staging.remove(ids);
        Ok(())
    }

    /// Mark rows for partial submission. An empty selection means
    /// "submit all staged rows".
    pub fn select_rows(&mut self, ids: &[u32]) -> SessionResult<()> {
        self.require_review_phase("select rows")?;
        self.staging.select(ids);
        Ok(())
    }

    /// Choose the reporting period and run the advisory existence
    /// check. The returned warning never blocks progression, and a
    /// transport failure here is treated as "no conflict" (the
    /// authoritative, fail-closed check runs again at submit time).
    pub async fn choose_period(&mut self, period: Period) -> SessionResult<PeriodWarning> {
        if !matches!(
            self.phase,
            SessionPhase::Previewed | SessionPhase::PeriodChosen
        ) {
            return Err(SessionError::InvalidPhase {
                action: "choose a period",
                phase: self.phase,
            });
        }

        // Choosing a new period invalidates anything learned about a
        // previous one; the check below always runs fresh.
        self.period = Some(period);
        self.phase = SessionPhase::PeriodChosen;

        let entry_epoch = self.epoch;
        let domain = self.schema.domain();
        let already_exists = match self.gateway.period_exists(domain, &period).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(
                    session_id = %self.session_id,
                    %domain,
                    %period,
                    error = %e,
                    "advisory period check failed; proceeding without a warning"
                );
                false
            }
        };
        if self.epoch != entry_epoch {
            return Err(SessionError::Superseded);
        }

        if already_exists {
            info!(
                session_id = %self.session_id,
                %domain,
                %period,
                "period already has committed data (pre-warning)"
            );
        }

        Ok(PeriodWarning {
            period,
            already_exists,
        })
    }

    /// Submit the selected-or-all staged rows as one batch.
    ///
    /// Preconditions, in order: staged set non-empty, period chosen,
    /// no committed data for the period (fail-closed), no validation
    /// issues. Every failure path preserves the staged rows and
    /// returns the session to its pre-submit phase for retry.
    #[instrument(skip(self), fields(session_id = %self.session_id, domain = %self.schema.domain()))]
    pub async fn submit(&mut self) -> SessionResult<CommitReceipt> {
        let entry_phase = self.phase;
        if !matches!(
            entry_phase,
            SessionPhase::Previewed | SessionPhase::PeriodChosen
        ) {
            return Err(SessionError::InvalidPhase {
                action: "submit",
                phase: entry_phase,
            });
        }

        let started = Instant::now();
        let domain = self.schema.domain();

        // Precondition 1: something is staged.
        if self.staging.is_empty() {
            return Err(SessionError::NothingStaged);
        }

        // Precondition 2: a period is chosen.
        let period = self.period.ok_or(SessionError::NoPeriodChosen)?;

        self.phase = SessionPhase::Submitting;
        let entry_epoch = self.epoch;

        // Precondition 3: the period lock, checked before validation
        // so a locked period is reported even when the data would also
        // fail validation. A transport failure blocks the attempt.
        let exists = match self.gateway.period_exists(domain, &period).await {
            Ok(exists) => exists,
            Err(e) => {
                self.phase = entry_phase;
                return Err(SessionError::Backend(e));
            }
        };
        if self.epoch != entry_epoch {
            return Err(SessionError::Superseded);
        }
        if exists {
            self.phase = entry_phase;
            return Err(SessionError::PeriodConflict { domain, period });
        }

        // Precondition 4: business rules, always batch-wide.
        let issues = run_validation(&self.schema, self.staging.rows());
        if !issues.is_empty() {
            self.phase = entry_phase;
            return Err(SessionError::Validation(ValidationReport { issues }));
        }

        // Build the batch from the current staging content, stripped
        // to the backend's shape.
        let batch = self
            .staging
            .selected_or_all()
            .into_iter()
            .map(|row| serde_json::to_value(self.schema.to_dto(row, &period)))
            .collect::<Result<Vec<serde_json::Value>, _>>()
            .map_err(|e| anyhow::anyhow!("batch serialization failed: {e}"))?;
        let submitted_rows = batch.len();

        if let Err(e) = self.gateway.submit_batch(domain, batch).await {
            if self.epoch != entry_epoch {
                return Err(SessionError::Superseded);
            }
            self.phase = entry_phase;
            return Err(SessionError::Backend(e));
        }
        if self.epoch != entry_epoch {
            return Err(SessionError::Superseded);
        }

        // Committed: the session resets and the screen re-queries the
        // backend of record.
        self.staging.clear();
        self.period = None;
        self.file = None;
        self.phase = SessionPhase::Idle;

        let refreshed = match self.gateway.fetch_committed(domain).await {
            Ok(records) => Some(records),
            Err(e) => {
                // Non-fatal: the commit stands, the visible table may
                // be stale until a manual refresh.
                warn!(%domain, error = %e, "post-commit refresh failed");
                None
            }
        };

        info!(
            %period,
            submitted_rows,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch committed"
        );

        Ok(CommitReceipt {
            domain,
            period,
            submitted_rows,
            refreshed,
        })
    }

    /// Abandon the session: staged rows, file and period are dropped,
    /// and any response still in flight is ignored on arrival.
    pub fn discard(&mut self) {
        info!(
            session_id = %self.session_id,
            domain = %self.schema.domain(),
            staged = self.staging.len(),
            "session discarded"
        );
        self.epoch += 1;
        self.staging.clear();
        self.file = None;
        self.period = None;
        self.phase = SessionPhase::Idle;
    }

    fn require_review_phase(&self, action: &'static str) -> SessionResult<()> {
        if matches!(
            self.phase,
            SessionPhase::Previewed | SessionPhase::PeriodChosen
        ) {
            Ok(())
        } else {
            Err(SessionError::InvalidPhase {
                action,
                phase: self.phase,
            })
        }
    }
}
