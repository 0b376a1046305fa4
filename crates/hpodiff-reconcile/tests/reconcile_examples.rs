use hpodiff_ontology::{Ontology, Term};
use hpodiff_reconcile::{Category, ChangeKind, ReconcileError, Reconciler};

fn reconcile(older: &Ontology, younger: &Ontology) -> hpodiff_reconcile::DiffReport {
    Reconciler::default()
        .reconcile(older, younger)
        .expect("reconcile")
}

#[test]
fn added_synonym_on_phenotypic_abnormality() {
    let older = Ontology::builder("hp/releases/2024-01-16")
        .term(Term::new("HP:0000118", "Phenotypic abnormality").with_synonym("Organ abnormality"))
        .build();
    let younger = Ontology::builder("hp/releases/2024-04-26")
        .term(
            Term::new("HP:0000118", "Phenotypic abnormality")
                .with_synonym("Organ abnormality")
                .with_synonym("Abnormality of organs"),
        )
        .build();

    let report = reconcile(&older, &younger);
    let rows = report.rows(Category::Synonyms);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].cells[4], "[Organ abnormality]");
    assert_eq!(rows[0].cells[5], "[]");
    assert_eq!(rows[0].cells[6], "[Abnormality of organs]");
    assert_eq!(report.total_rows(), 1);
}

#[test]
fn revived_term_through_obsoletion_map() {
    let older = Ontology::builder("hp/releases/2024-01-16")
        .term(Term::new("HP:9999999", "Old name").obsolete().replaced_by("HP:1111111"))
        .build();
    let younger = Ontology::builder("hp/releases/2024-04-26")
        .term(Term::new("HP:1111111", "New name"))
        .obsoletion("HP:9999999", "HP:1111111")
        .build();

    let report = reconcile(&older, &younger);
    let rows = report.rows(Category::Obsoletions);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, ChangeKind::InvalidObsoletion);
    assert_eq!(rows[0].cells, vec!["HP:9999999", "Old name", "HP:1111111", "New name"]);

    // The younger-only replacement is new from the older release's point of view.
    assert_eq!(report.rows(Category::Additions).len(), 1);
}

#[test]
fn younger_only_term_is_a_single_addition() {
    let base = Term::new("HP:0000001", "All");
    let older = Ontology::builder("hp/releases/2024-01-16")
        .term(base.clone())
        .build();
    let younger = Ontology::builder("hp/releases/2024-04-26")
        .term(base)
        .term(Term::new("HP:0000002", "Abnormality of body height"))
        .parent("HP:0000002", "HP:0000001")
        .build();

    let report = reconcile(&older, &younger);
    let additions = report.rows(Category::Additions);
    assert_eq!(additions.len(), 1);
    assert_eq!(
        additions[0].to_cells(),
        vec!["new term", "HP:0000002", "Abnormality of body height"]
    );
    assert_eq!(report.total_rows(), 1);
}

#[test]
fn absent_to_empty_definition_is_not_a_change() {
    let older = Ontology::builder("hp/releases/2024-01-16")
        .term(Term::new("HP:0000001", "All"))
        .build();
    let younger = Ontology::builder("hp/releases/2024-04-26")
        .term(Term::new("HP:0000001", "All").with_definition(""))
        .build();

    assert_eq!(reconcile(&older, &younger).total_rows(), 0);
}

#[test]
fn missing_counterpart_is_fatal() {
    let older = Ontology::builder("hp/releases/2024-01-16")
        .term(Term::new("HP:0000001", "All"))
        .term(Term::new("HP:0000404", "Dropped without trace"))
        .build();
    let younger = Ontology::builder("hp/releases/2024-04-26")
        .term(Term::new("HP:0000001", "All"))
        .build();

    let err = Reconciler::default()
        .reconcile(&older, &younger)
        .unwrap_err();
    assert!(matches!(err, ReconcileError::UnresolvedTerm { ref id } if id.as_str() == "HP:0000404"));
}
