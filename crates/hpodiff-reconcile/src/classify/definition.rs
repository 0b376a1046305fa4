//! Text definition changes.

use super::{ChangeKind, ChangeRow, Context};
use crate::error::Result;

pub(super) fn classify(ctx: &Context<'_>) -> Result<Vec<ChangeRow>> {
    let mut rows = Vec::new();
    for old in ctx.older.current_terms() {
        let Some(pair) = ctx.matcher.resolve_current(old)? else {
            continue;
        };
        let (before, after) = (pair.old.definition_text(), pair.new.definition_text());
        if before == after {
            continue;
        }
        rows.push(ChangeRow::new(
            ChangeKind::DefinitionChange,
            vec![
                pair.old.id.to_string(),
                pair.old.label.clone(),
                before.to_string(),
                after.to_string(),
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
    fn absent_and_empty_definitions_are_equal() {
        let older = Ontology::builder("a/2024-01-01")
            .term(Term::new("HP:1", "none"))
            .term(Term::new("HP:2", "reworded").with_definition("Old text."))
            .term(Term::new("HP:3", "added"))
            .build();
        let younger = Ontology::builder("a/2024-02-01")
            .term(Term::new("HP:1", "none").with_definition(""))
            .term(Term::new("HP:2", "reworded").with_definition("New text."))
            .term(Term::new("HP:3", "added").with_definition("Fresh."))
            .build();

        let rows = classify(&Context::new(&older, &younger)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells, vec!["HP:2", "reworded", "Old text.", "New text."]);
        assert_eq!(rows[1].cells, vec!["HP:3", "added", "", "Fresh."]);
    }
}
