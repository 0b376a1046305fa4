//! Direct superclass changes.
//!
//! Parents are compared by identifier as each snapshot exposes them; they are
//! not re-resolved through the matcher.

use super::{render_list, ChangeKind, ChangeRow, Context, SetDiff};
use crate::error::Result;
use hpodiff_ontology::{Ontology, Term, TermId};
use std::collections::{BTreeMap, BTreeSet};

fn parent_terms<'a>(ontology: &'a Ontology, id: &TermId) -> BTreeMap<TermId, &'a Term> {
    ontology
        .parents_of(id)
        .map(|term| (term.id.clone(), term))
        .collect()
}

fn render_terms<'a>(
    ids: &BTreeSet<TermId>,
    primary: &BTreeMap<TermId, &'a Term>,
    fallback: &BTreeMap<TermId, &'a Term>,
) -> String {
    render_list(
        ids.iter()
            .filter_map(|id| primary.get(id).or_else(|| fallback.get(id))),
    )
}

pub(super) fn classify(ctx: &Context<'_>) -> Result<Vec<ChangeRow>> {
    let mut rows = Vec::new();
    for old in ctx.older.current_terms() {
        let Some(pair) = ctx.matcher.resolve_current(old)? else {
            continue;
        };
        let old_parents = parent_terms(ctx.older, &pair.old.id);
        let new_parents = parent_terms(ctx.younger, &pair.new.id);

        let old_ids: BTreeSet<TermId> = old_parents.keys().cloned().collect();
        let new_ids: BTreeSet<TermId> = new_parents.keys().cloned().collect();
        let diff = SetDiff::compute(&old_ids, &new_ids);
        if !diff.is_changed() {
            continue;
        }

        rows.push(ChangeRow::new(
            ChangeKind::SuperclassesChange,
            vec![
                pair.old.id.to_string(),
                pair.old.label.clone(),
                render_list(old_parents.values()),
                render_list(new_parents.values()),
                render_terms(&diff.common, &new_parents, &old_parents),
                render_terms(&diff.only_old, &old_parents, &new_parents),
                render_terms(&diff.only_new, &new_parents, &old_parents),
            ],
        ));
    }
    Ok(rows)
}
