//! Ontology snapshot model.
//!
//! A loaded [`Ontology`] is immutable. Parent/child navigation goes through an
//! adjacency map keyed by [`TermId`], so terms never hold references into the
//! snapshot that owns them and a snapshot can be shared freely between
//! read-only passes.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

// ============================================================================
// Identifiers and terms
// ============================================================================

/// Stable term identifier in CURIE form (e.g. `HP:0000118`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(String);

impl TermId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TermId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One concept of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub id: TermId,
    pub label: String,
    pub obsolete: bool,
    pub definition: Option<String>,
    pub synonyms: BTreeSet<String>,
    /// Historical identifiers that now resolve to this term.
    pub alt_ids: BTreeSet<TermId>,
    /// Replacement for an obsolete term.
    pub replaced_by: Option<TermId>,
}

impl Term {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: TermId::new(id),
            label: label.into(),
            obsolete: false,
            definition: None,
            synonyms: BTreeSet::new(),
            alt_ids: BTreeSet::new(),
            replaced_by: None,
        }
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    pub fn with_synonym(mut self, synonym: impl Into<String>) -> Self {
        self.synonyms.insert(synonym.into());
        self
    }

    pub fn with_alt_id(mut self, alt_id: impl Into<String>) -> Self {
        self.alt_ids.insert(TermId::new(alt_id));
        self
    }

    pub fn obsolete(mut self) -> Self {
        self.obsolete = true;
        self
    }

    pub fn replaced_by(mut self, replacement: impl Into<String>) -> Self {
        self.replaced_by = Some(TermId::new(replacement));
        self
    }

    /// Definition text, with an absent definition read as the empty string.
    pub fn definition_text(&self) -> &str {
        self.definition.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}

// ============================================================================
// Snapshot
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Ontology {
    data_version: String,
    terms: BTreeMap<TermId, Term>,
    alternates: HashMap<TermId, TermId>,
    obsoletions: HashMap<TermId, TermId>,
    parents: HashMap<TermId, BTreeSet<TermId>>,
}

impl Ontology {
    pub fn builder(data_version: impl Into<String>) -> OntologyBuilder {
        OntologyBuilder::new(data_version)
    }

    /// Raw data-version tag, e.g. `hp/releases/2024-01-16`.
    pub fn data_version(&self) -> &str {
        &self.data_version
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Lookup by primary identifier only.
    pub fn term(&self, id: &TermId) -> Option<&Term> {
        self.terms.get(id)
    }

    /// Lookup by primary identifier, falling back to alternate identifiers.
    pub fn term_including_alternatives(&self, id: &TermId) -> Option<&Term> {
        self.terms
            .get(id)
            .or_else(|| self.alternates.get(id).and_then(|primary| self.terms.get(primary)))
    }

    /// Follow the obsoletion map one step: the term that replaced `id`.
    pub fn term_from_obsoletes(&self, id: &TermId) -> Option<&Term> {
        self.obsoletions
            .get(id)
            .and_then(|target| self.term_including_alternatives(target))
    }

    /// Direct parents of `id`. Parent ids that do not name a term in this
    /// snapshot are skipped.
    pub fn parents_of<'a>(&'a self, id: &TermId) -> impl Iterator<Item = &'a Term> + 'a {
        self.parents
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(move |parent| self.terms.get(parent))
    }

    /// Non-obsolete terms, ordered by identifier.
    pub fn current_terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.values().filter(|t| !t.obsolete)
    }

    /// Every term including obsolete ones, ordered by identifier.
    pub fn all_terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Accumulates terms and edges, then freezes them into an [`Ontology`].
#[derive(Debug, Default)]
pub struct OntologyBuilder {
    data_version: String,
    terms: BTreeMap<TermId, Term>,
    obsoletions: HashMap<TermId, TermId>,
    parents: HashMap<TermId, BTreeSet<TermId>>,
}

impl OntologyBuilder {
    pub fn new(data_version: impl Into<String>) -> Self {
        Self {
            data_version: data_version.into(),
            ..Default::default()
        }
    }

    pub fn set_data_version(&mut self, data_version: impl Into<String>) {
        self.data_version = data_version.into();
    }

    /// Insert or replace a term (last definition of an id wins).
    pub fn insert_term(&mut self, term: Term) {
        self.terms.insert(term.id.clone(), term);
    }

    pub fn insert_parent(&mut self, child: TermId, parent: TermId) {
        self.parents.entry(child).or_default().insert(parent);
    }

    /// Register an obsoletion target for an id that may not have a term of
    /// its own in this snapshot.
    pub fn insert_obsoletion(&mut self, old: TermId, replacement: TermId) {
        self.obsoletions.insert(old, replacement);
    }

    pub fn term(mut self, term: Term) -> Self {
        self.insert_term(term);
        self
    }

    pub fn parent(mut self, child: &str, parent: &str) -> Self {
        self.insert_parent(TermId::new(child), TermId::new(parent));
        self
    }

    pub fn obsoletion(mut self, old: &str, replacement: &str) -> Self {
        self.insert_obsoletion(TermId::new(old), TermId::new(replacement));
        self
    }

    pub fn build(self) -> Ontology {
        let mut alternates = HashMap::new();
        let mut obsoletions = self.obsoletions;

        for term in self.terms.values() {
            for alt in &term.alt_ids {
                if self.terms.contains_key(alt) {
                    tracing::debug!(alt = %alt, primary = %term.id, "alternate id shadows a primary id; ignored");
                    continue;
                }
                alternates.insert(alt.clone(), term.id.clone());
            }
            if term.obsolete {
                if let Some(replacement) = &term.replaced_by {
                    obsoletions.insert(term.id.clone(), replacement.clone());
                }
            }
        }

        let dangling = self
            .parents
            .values()
            .flatten()
            .filter(|parent| !self.terms.contains_key(*parent))
            .count();
        if dangling > 0 {
            tracing::warn!(dangling, "is_a edges point at unknown terms; they are skipped");
        }

        Ontology {
            data_version: self.data_version,
            terms: self.terms,
            alternates,
            obsoletions,
            parents: self.parents,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ontology {
        Ontology::builder("hp/releases/2024-01-16")
            .term(Term::new("HP:0000001", "All"))
            .term(Term::new("HP:0000118", "Phenotypic abnormality").with_alt_id("HP:0000005"))
            .term(
                Term::new("HP:0000999", "Old thing")
                    .obsolete()
                    .replaced_by("HP:0000118"),
            )
            .parent("HP:0000118", "HP:0000001")
            .parent("HP:0000118", "HP:7777777")
            .obsoletion("HP:0000404", "HP:0000005")
            .build()
    }

    #[test]
    fn alternate_ids_resolve_to_primary() {
        let onto = sample();
        let id = TermId::from("HP:0000005");
        assert!(onto.term(&id).is_none());
        assert_eq!(
            onto.term_including_alternatives(&id).map(|t| t.id.as_str()),
            Some("HP:0000118")
        );
    }

    #[test]
    fn obsoletion_map_covers_replaced_by_and_explicit_entries() {
        let onto = sample();
        let via_term = onto.term_from_obsoletes(&TermId::from("HP:0000999"));
        assert_eq!(via_term.map(|t| t.id.as_str()), Some("HP:0000118"));

        // Explicit entry whose target is itself an alternate id.
        let via_entry = onto.term_from_obsoletes(&TermId::from("HP:0000404"));
        assert_eq!(via_entry.map(|t| t.id.as_str()), Some("HP:0000118"));
    }

    #[test]
    fn current_terms_skip_obsolete() {
        let onto = sample();
        assert_eq!(onto.all_terms().count(), 3);
        let current: Vec<&str> = onto.current_terms().map(|t| t.id.as_str()).collect();
        assert_eq!(current, vec!["HP:0000001", "HP:0000118"]);
    }

    #[test]
    fn parents_skip_dangling_ids() {
        let onto = sample();
        let parents: Vec<&str> = onto
            .parents_of(&TermId::from("HP:0000118"))
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(parents, vec!["HP:0000001"]);
        assert_eq!(onto.parents_of(&TermId::from("HP:0000001")).count(), 0);
    }

    #[test]
    fn missing_definition_reads_as_empty() {
        let term = Term::new("HP:1", "x");
        assert_eq!(term.definition_text(), "");
        assert_eq!(term.with_definition("").definition_text(), "");
    }
}
