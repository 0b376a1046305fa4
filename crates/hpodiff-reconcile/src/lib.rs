//! Reconciliation of two ontology releases.
//!
//! ```text
//! first, second ──► ReleasePair::order ──► (older, younger)
//!                                               │
//!                      TermMatcher::verify_all ◄┘   (fails before any row)
//!                                               │
//!         ┌──────────┬──────────┬───────┬───────┴──┬────────────┬──────────────┐
//!     additions  obsoletions  labels  synonyms  definitions  superclasses
//!         └──────────┴──────────┴───────┴──────────┴────────────┴──────────────┘
//!                                               │
//!                                          DiffReport ──► sheets
//! ```
//!
//! Both snapshots are only ever borrowed immutably, so the classifier passes
//! can run on the rayon pool without coordination.

pub mod classify;
pub mod error;
pub mod matcher;
pub mod version;

pub use classify::{Category, ChangeKind, ChangeRow, Context};
pub use error::{ReconcileError, Result};
pub use matcher::{TermMatcher, TermPair, UnresolvedPolicy};
pub use version::{release_date, report_file_name, version_tag, ReleasePair};

use hpodiff_ontology::Ontology;
use hpodiff_report::Sheet;
use rayon::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct ReconcileOptions {
    pub unresolved: UnresolvedPolicy,
    /// Run the classifier passes concurrently.
    pub parallel: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            unresolved: UnresolvedPolicy::FailFast,
            parallel: true,
        }
    }
}

/// Rows of every category, in report order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReport {
    pub older_version: String,
    pub younger_version: String,
    pub categories: Vec<(Category, Vec<ChangeRow>)>,
}

impl DiffReport {
    pub fn rows(&self, category: Category) -> &[ChangeRow] {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, rows)| rows.as_slice())
            .unwrap_or(&[])
    }

    pub fn total_rows(&self) -> usize {
        self.categories.iter().map(|(_, rows)| rows.len()).sum()
    }

    pub fn to_sheets(&self) -> Vec<Sheet> {
        self.categories
            .iter()
            .map(|(category, rows)| {
                let mut sheet = Sheet::new(category.sheet_name(), category.header());
                for row in rows {
                    sheet.push_row(row.to_cells());
                }
                sheet
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    options: ReconcileOptions,
}

impl Reconciler {
    pub fn new(options: ReconcileOptions) -> Self {
        Self { options }
    }

    /// Diff an already ordered pair.
    pub fn reconcile(&self, older: &Ontology, younger: &Ontology) -> Result<DiffReport> {
        let ctx = Context::new(older, younger);
        ctx.matcher.verify_all(older, self.options.unresolved)?;

        let categories: Vec<(Category, Vec<ChangeRow>)> = if self.options.parallel {
            Category::ALL
                .par_iter()
                .map(|category| category.classify(&ctx).map(|rows| (*category, rows)))
                .collect::<Result<_>>()?
        } else {
            Category::ALL
                .iter()
                .map(|category| category.classify(&ctx).map(|rows| (*category, rows)))
                .collect::<Result<_>>()?
        };

        let report = DiffReport {
            older_version: older.data_version().to_string(),
            younger_version: younger.data_version().to_string(),
            categories,
        };
        tracing::info!(
            older = %report.older_version,
            younger = %report.younger_version,
            rows = report.total_rows(),
            "reconciled releases"
        );
        Ok(report)
    }

    /// Order two snapshots by release date, then diff them.
    pub fn reconcile_unordered<'a>(
        &self,
        first: &'a Ontology,
        second: &'a Ontology,
    ) -> Result<(ReleasePair<'a>, DiffReport)> {
        let pair = ReleasePair::order(first, second)?;
        let report = self.reconcile(pair.older, pair.younger)?;
        Ok((pair, report))
    }
}
