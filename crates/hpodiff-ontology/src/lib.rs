//! Ontology snapshots for hpodiff.
//!
//! This crate is the loading boundary: it turns an ontology release file into
//! an immutable [`Ontology`] snapshot that the reconciler can navigate by
//! identifier.
//!
//! Supported inputs:
//! - OBO 1.4 flat files (`.obo`)
//! - OBO-style OWL as RDF/XML (`.owl`, `.rdf`, `.xml`), Turtle (`.ttl`) or
//!   N-Triples (`.nt`)

pub mod model;
pub mod obo;
pub mod rdf;

pub use model::{Ontology, OntologyBuilder, Term, TermId};

use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum OntologyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("failed to parse {format}: {message}")]
    Format {
        format: &'static str,
        message: String,
    },
    #[error("unsupported ontology format: .{0}")]
    UnsupportedFormat(String),
}

/// Load an ontology file, picking the parser from the file extension.
pub fn load_ontology(path: &Path) -> Result<Ontology, OntologyError> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    let ontology = if ext == "obo" {
        let text = std::fs::read_to_string(path)?;
        obo::parse_obo(&text)?
    } else if let Some(format) = rdf::RdfFormat::from_extension(&ext) {
        let bytes = std::fs::read(path)?;
        rdf::parse_rdf(&bytes, format)?
    } else {
        return Err(OntologyError::UnsupportedFormat(ext));
    };

    tracing::info!(
        path = %path.display(),
        data_version = ontology.data_version(),
        terms = ontology.len(),
        "loaded ontology"
    );
    Ok(ontology)
}
