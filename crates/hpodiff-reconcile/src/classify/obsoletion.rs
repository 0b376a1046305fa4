//! Terms whose obsolete flag flipped between releases.

use super::{ChangeKind, ChangeRow, Context};
use crate::error::Result;

pub(super) fn classify(ctx: &Context<'_>) -> Result<Vec<ChangeRow>> {
    let mut rows = Vec::new();
    for old in ctx.older.all_terms() {
        let new = ctx.matcher.resolve(old)?;
        let kind = match (old.obsolete, new.obsolete) {
            (false, true) => ChangeKind::ValidObsoletion,
            // Un-obsoleting a term is suspicious but still reported.
            (true, false) => ChangeKind::InvalidObsoletion,
            _ => continue,
        };
        rows.push(ChangeRow::new(
            kind,
            vec![
                old.id.to_string(),
                old.label.clone(),
                new.id.to_string(),
                new.label.clone(),
            ],
        ));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReconcileError;
    use hpodiff_ontology::{Ontology, Term};

    #[test]
    fn classifies_both_flip_directions() {
        let older = Ontology::builder("a/2024-01-01")
            .term(Term::new("HP:1", "stays"))
            .term(Term::new("HP:2", "retired"))
            .term(Term::new("HP:9999999", "was obsolete").obsolete().replaced_by("HP:1111111"))
            .build();
        let younger = Ontology::builder("a/2024-02-01")
            .term(Term::new("HP:1", "stays"))
            .term(Term::new("HP:2", "obsolete retired").obsolete())
            .term(Term::new("HP:1111111", "revived"))
            .obsoletion("HP:9999999", "HP:1111111")
            .build();

        let rows = classify(&Context::new(&older, &younger)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kind, ChangeKind::ValidObsoletion);
        assert_eq!(rows[0].cells, vec!["HP:2", "retired", "HP:2", "obsolete retired"]);
        assert_eq!(rows[1].kind, ChangeKind::InvalidObsoletion);
        assert_eq!(rows[1].cells, vec!["HP:9999999", "was obsolete", "HP:1111111", "revived"]);
    }

    #[test]
    fn unresolved_old_term_aborts() {
        let older = Ontology::builder("a/2024-01-01")
            .term(Term::new("HP:5", "vanished"))
            .build();
        let younger = Ontology::builder("a/2024-02-01").build();
        let err = classify(&Context::new(&older, &younger)).unwrap_err();
        assert!(matches!(err, ReconcileError::UnresolvedTerm { .. }));
    }
}
