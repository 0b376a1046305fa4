//! Terms that only the younger release knows about.

use super::{ChangeKind, ChangeRow, Context};

/// Runs over the younger release only; there is no counterpart to match.
pub(super) fn classify(ctx: &Context<'_>) -> Vec<ChangeRow> {
    ctx.younger
        .current_terms()
        .filter(|term| ctx.older.term_including_alternatives(&term.id).is_none())
        .map(|term| {
            ChangeRow::new(
                ChangeKind::NewTerm,
                vec![term.id.to_string(), term.label.clone()],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hpodiff_ontology::{Ontology, Term};

    #[test]
    fn reports_terms_missing_from_older_release() {
        let older = Ontology::builder("a/2024-01-01")
            .term(Term::new("HP:1", "one").with_alt_id("HP:2"))
            .build();
        let younger = Ontology::builder("a/2024-02-01")
            .term(Term::new("HP:1", "one"))
            .term(Term::new("HP:2", "two, formerly an alias"))
            .term(Term::new("HP:3", "three"))
            .term(Term::new("HP:4", "four").obsolete())
            .build();

        let rows = classify(&Context::new(&older, &younger));
        assert_eq!(
            rows,
            vec![ChangeRow::new(
                ChangeKind::NewTerm,
                vec!["HP:3".to_string(), "three".to_string()]
            )]
        );
    }
}
