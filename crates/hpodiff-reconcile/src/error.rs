use hpodiff_ontology::TermId;

#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("data version `{version}` does not end in a YYYY-MM-DD date: {source}")]
    MalformedVersion {
        version: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The two inputs are not a consecutive release pair.
    #[error("cannot find term with ID {id} in new ontology")]
    UnresolvedTerm { id: TermId },

    #[error("cannot find {} terms in new ontology: {}", .ids.len(), format_ids(.ids))]
    UnresolvedTerms { ids: Vec<TermId> },
}

fn format_ids(ids: &[TermId]) -> String {
    ids.iter()
        .map(TermId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
