//! Primary label changes.

use super::{ChangeKind, ChangeRow, Context};
use crate::error::Result;

pub(super) fn classify(ctx: &Context<'_>) -> Result<Vec<ChangeRow>> {
    let mut rows = Vec::new();
    for old in ctx.older.current_terms() {
        let Some(pair) = ctx.matcher.resolve_current(old)? else {
            continue;
        };
        if pair.old.label == pair.new.label {
            continue;
        }
        rows.push(ChangeRow::new(
            ChangeKind::LabelChange,
            vec![
                pair.old.id.to_string(),
                pair.old.label.clone(),
                pair.new.id.to_string(),
                pair.new.label.clone(),
            ],
        ));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hpodiff_ontology::{Ontology, Term};

    #[test]
    fn compares_labels_case_sensitively() {
        let older = Ontology::builder("a/2024-01-01")
            .term(Term::new("HP:1", "Short stature"))
            .term(Term::new("HP:2", "same"))
            .term(Term::new("HP:3", "old name"))
            .build();
        let younger = Ontology::builder("a/2024-02-01")
            .term(Term::new("HP:1", "Short Stature"))
            .term(Term::new("HP:2", "same"))
            .term(Term::new("HP:3", "obsolete old name").obsolete())
            .build();

        let rows = classify(&Context::new(&older, &younger)).unwrap();
        assert_eq!(rows.len(), 1, "renames into obsolete terms are skipped");
        assert_eq!(
            rows[0].to_cells(),
            vec!["term label change", "HP:1", "Short stature", "HP:1", "Short Stature"]
        );
    }

    #[test]
    fn follows_alternate_ids() {
        let older = Ontology::builder("a/2024-01-01")
            .term(Term::new("HP:7", "merged away"))
            .build();
        let younger = Ontology::builder("a/2024-02-01")
            .term(Term::new("HP:8", "merged target").with_alt_id("HP:7"))
            .build();

        let rows = classify(&Context::new(&older, &younger)).unwrap();
        assert_eq!(rows[0].cells, vec!["HP:7", "merged away", "HP:8", "merged target"]);
    }
}
