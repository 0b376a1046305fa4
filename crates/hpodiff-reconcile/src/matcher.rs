//! Maps terms of the older release onto the younger release.

use crate::error::{ReconcileError, Result};
use hpodiff_ontology::{Ontology, Term, TermId};

/// How a counterpart was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Same identifier, primary or alternate.
    Identifier,
    /// Through the younger release's obsoletion map.
    Obsoletion,
}

/// An old term together with its counterpart in the younger release.
#[derive(Debug, Clone, Copy)]
pub struct TermPair<'a> {
    pub old: &'a Term,
    pub new: &'a Term,
}

/// Whether unresolved terms abort at the first one or are gathered first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnresolvedPolicy {
    #[default]
    FailFast,
    CollectAll,
}

#[derive(Debug, Clone, Copy)]
pub struct TermMatcher<'a> {
    younger: &'a Ontology,
}

impl<'a> TermMatcher<'a> {
    pub fn new(younger: &'a Ontology) -> Self {
        Self { younger }
    }

    pub fn resolve_with(&self, old: &Term) -> Option<(&'a Term, Resolution)> {
        if let Some(term) = self.younger.term_including_alternatives(&old.id) {
            return Some((term, Resolution::Identifier));
        }
        self.younger
            .term_from_obsoletes(&old.id)
            .map(|term| (term, Resolution::Obsoletion))
    }

    /// Counterpart of `old` in the younger release.
    pub fn resolve(&self, old: &Term) -> Result<&'a Term> {
        match self.resolve_with(old) {
            Some((term, how)) => {
                tracing::trace!(old = %old.id, new = %term.id, ?how, "resolved term");
                Ok(term)
            }
            None => Err(ReconcileError::UnresolvedTerm { id: old.id.clone() }),
        }
    }

    /// Resolve `old`, skipping it (`None`) when the counterpart is obsolete.
    /// A rename or edit landing on an obsolete term is not actionable.
    pub fn resolve_current<'o>(&self, old: &'o Term) -> Result<Option<TermPair<'o>>>
    where
        'a: 'o,
    {
        let new = self.resolve(old)?;
        if new.obsolete {
            return Ok(None);
        }
        Ok(Some(TermPair { old, new }))
    }

    /// Check that every term of `older` has a counterpart before any report
    /// row is produced.
    pub fn verify_all(&self, older: &Ontology, policy: UnresolvedPolicy) -> Result<()> {
        let mut missing: Vec<TermId> = Vec::new();
        for term in older.all_terms() {
            if self.resolve_with(term).is_some() {
                continue;
            }
            match policy {
                UnresolvedPolicy::FailFast => {
                    return Err(ReconcileError::UnresolvedTerm {
                        id: term.id.clone(),
                    })
                }
                UnresolvedPolicy::CollectAll => missing.push(term.id.clone()),
            }
        }

        match missing.len() {
            0 => Ok(()),
            1 => Err(ReconcileError::UnresolvedTerm {
                id: missing.remove(0),
            }),
            _ => Err(ReconcileError::UnresolvedTerms { ids: missing }),
        }
    }
}
