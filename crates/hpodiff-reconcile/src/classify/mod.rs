//! Change classifiers.
//!
//! Each classifier is an independent, read-only pass over the two releases
//! that yields the rows of one report category. Rows come out ordered by
//! term identifier.

mod addition;
mod definition;
mod label;
mod obsoletion;
mod parents;
mod synonym;

use crate::error::Result;
use crate::matcher::TermMatcher;
use hpodiff_ontology::Ontology;
use std::collections::BTreeSet;
use std::fmt::Display;

/// One report category (one sheet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Additions,
    Obsoletions,
    Labels,
    Synonyms,
    Definitions,
    Superclasses,
}

impl Category {
    /// Report order.
    pub const ALL: [Category; 6] = [
        Category::Additions,
        Category::Obsoletions,
        Category::Labels,
        Category::Synonyms,
        Category::Definitions,
        Category::Superclasses,
    ];

    pub fn sheet_name(self) -> &'static str {
        match self {
            Category::Additions => "term additions report",
            Category::Obsoletions => "obsoletions report",
            Category::Labels => "primary labels report",
            Category::Synonyms => "synonym report",
            Category::Definitions => "textdefinition report",
            Category::Superclasses => "subclass structure report",
        }
    }

    pub fn header(self) -> &'static [&'static str] {
        match self {
            Category::Additions => &["change type", "term id", "term label"],
            Category::Obsoletions => &[
                "change type",
                "old term id",
                "old term label",
                "term id updated",
                "term label updated",
            ],
            Category::Labels => &[
                "change type",
                "term id",
                "term label",
                "term id updated",
                "term label updated",
            ],
            Category::Synonyms => &[
                "change type",
                "term id",
                "term label",
                "previous synonyms",
                "recent synonyms",
                "synonyms in common",
                "synonyms only in previous version",
                "synonyms only in recent version",
            ],
            Category::Definitions => &[
                "change type",
                "term id",
                "term label",
                "previous definition",
                "recent definition",
            ],
            Category::Superclasses => &[
                "change type",
                "term id",
                "term label",
                "superclasses previous version",
                "superclasses recent version",
                "unchanged superclasses",
                "only in previous version",
                "only in recent version",
            ],
        }
    }

    /// Run this category's classifier.
    pub fn classify(self, ctx: &Context<'_>) -> Result<Vec<ChangeRow>> {
        let rows = match self {
            Category::Additions => addition::classify(ctx),
            Category::Obsoletions => obsoletion::classify(ctx)?,
            Category::Labels => label::classify(ctx)?,
            Category::Synonyms => synonym::classify(ctx)?,
            Category::Definitions => definition::classify(ctx)?,
            Category::Superclasses => parents::classify(ctx)?,
        };
        tracing::debug!(category = self.sheet_name(), rows = rows.len(), "classified");
        Ok(rows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    NewTerm,
    ValidObsoletion,
    InvalidObsoletion,
    LabelChange,
    SynonymSetChange,
    DefinitionChange,
    SuperclassesChange,
}

impl ChangeKind {
    pub fn label(self) -> &'static str {
        match self {
            ChangeKind::NewTerm => "new term",
            ChangeKind::ValidObsoletion => "valid term obsoletion",
            ChangeKind::InvalidObsoletion => "invalid term obsoletion",
            ChangeKind::LabelChange => "term label change",
            ChangeKind::SynonymSetChange => "synonym set change",
            ChangeKind::DefinitionChange => "text-definition change",
            ChangeKind::SuperclassesChange => "superclasses change",
        }
    }
}

/// One detected change. `cells` holds every column after the change type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRow {
    pub kind: ChangeKind,
    pub cells: Vec<String>,
}

impl ChangeRow {
    pub fn new(kind: ChangeKind, cells: Vec<String>) -> Self {
        Self { kind, cells }
    }

    /// Full sheet row, change type first.
    pub fn to_cells(&self) -> Vec<String> {
        std::iter::once(self.kind.label().to_string())
            .chain(self.cells.iter().cloned())
            .collect()
    }
}

/// Shared inputs of every classifier.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub older: &'a Ontology,
    pub younger: &'a Ontology,
    pub matcher: TermMatcher<'a>,
}

impl<'a> Context<'a> {
    pub fn new(older: &'a Ontology, younger: &'a Ontology) -> Self {
        Self {
            older,
            younger,
            matcher: TermMatcher::new(younger),
        }
    }
}

// ============================================================================
// Set comparison helpers
// ============================================================================

/// Intersection and both one-sided differences of two sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDiff<T: Ord> {
    pub common: BTreeSet<T>,
    pub only_old: BTreeSet<T>,
    pub only_new: BTreeSet<T>,
}

impl<T: Ord + Clone> SetDiff<T> {
    pub fn compute(old: &BTreeSet<T>, new: &BTreeSet<T>) -> Self {
        Self {
            common: old.intersection(new).cloned().collect(),
            only_old: old.difference(new).cloned().collect(),
            only_new: new.difference(old).cloned().collect(),
        }
    }

    pub fn is_changed(&self) -> bool {
        !self.only_old.is_empty() || !self.only_new.is_empty()
    }
}

/// `[a, b, c]` in iteration order.
pub fn render_list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let joined = items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}
