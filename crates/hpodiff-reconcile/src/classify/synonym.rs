//! Synonym set changes.

use super::{render_list, ChangeKind, ChangeRow, Context, SetDiff};
use crate::error::Result;

pub(super) fn classify(ctx: &Context<'_>) -> Result<Vec<ChangeRow>> {
    let mut rows = Vec::new();
    for old in ctx.older.current_terms() {
        let Some(pair) = ctx.matcher.resolve_current(old)? else {
            continue;
        };
        let diff = SetDiff::compute(&pair.old.synonyms, &pair.new.synonyms);
        if !diff.is_changed() {
            continue;
        }
        rows.push(ChangeRow::new(
            ChangeKind::SynonymSetChange,
            vec![
                pair.old.id.to_string(),
                pair.old.label.clone(),
                render_list(&pair.old.synonyms),
                render_list(&pair.new.synonyms),
                render_list(&diff.common),
                render_list(&diff.only_old),
                render_list(&diff.only_new),
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
    fn reports_added_synonym() {
        let older = Ontology::builder("hp/releases/2024-01-01")
            .term(Term::new("HP:0000118", "Phenotypic abnormality").with_synonym("Organ abnormality"))
            .build();
        let younger = Ontology::builder("hp/releases/2024-02-01")
            .term(
                Term::new("HP:0000118", "Phenotypic abnormality")
                    .with_synonym("Organ abnormality")
                    .with_synonym("Abnormality of organs"),
            )
            .build();

        let rows = classify(&Context::new(&older, &younger)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].cells,
            vec![
                "HP:0000118",
                "Phenotypic abnormality",
                "[Organ abnormality]",
                "[Abnormality of organs, Organ abnormality]",
                "[Organ abnormality]",
                "[]",
                "[Abnormality of organs]",
            ]
        );
    }

    #[test]
    fn unchanged_sets_emit_nothing() {
        let term = Term::new("HP:1", "x").with_synonym("a").with_synonym("b");
        let older = Ontology::builder("a/2024-01-01").term(term.clone()).build();
        let younger = Ontology::builder("a/2024-02-01").term(term).build();
        assert!(classify(&Context::new(&older, &younger)).unwrap().is_empty());
    }
}
