// ==========================================
// Quarry Ops Import - Validation Engine
// ==========================================
// Runs batch-wide over the full staged set (never just a selection).
// Baseline structural rule plus the domain's cross-row rules; any
// issue blocks commit.
// ==========================================

use crate::domain::ImportDomain;
use crate::importer::schema::DomainSchema;
use crate::importer::staging::StagedRow;
use serde::Serialize;
use std::fmt;

/// One validation finding.
///
/// `row_ids` names the implicated staged rows; an empty set means the
/// issue applies to the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub domain: ImportDomain,
    pub message: String,
    pub row_ids: Vec<u32>,
}

impl ValidationIssue {
    pub fn new(domain: ImportDomain, message: impl Into<String>, row_ids: Vec<u32>) -> Self {
        Self {
            domain,
            message: message.into(),
            row_ids,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// All findings for one staged set, surfaced to the user verbatim as
/// concatenated messages.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.issues.iter().map(|i| i.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Run the baseline rule and the domain's cross-row rules over the
/// staged set, in row-encounter order.
pub fn run_validation<S: DomainSchema>(
    schema: &S,
    staged: &[StagedRow<S::Row>],
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    // Baseline: the quantity/amount field must be non-negative.
    // Identity presence is already guaranteed by parse-time admission.
    for entry in staged {
        let quantity = schema.primary_quantity(&entry.row);
        if quantity < 0.0 {
            issues.push(ValidationIssue::new(
                schema.domain(),
                format!(
                    "row {}: {} carries a negative quantity ({})",
                    entry.id,
                    schema.identity(&entry.row),
                    quantity
                ),
                vec![entry.id],
            ));
        }
    }

    issues.extend(schema.validate(staged));
    issues
}
