//! OBO-style OWL loader (RDF/XML, Turtle, N-Triples) built on Sophia.
//!
//! Triples are first flattened into a small statement model, then folded into
//! an [`Ontology`] using the OBO-in-OWL annotation vocabulary:
//!
//! - `rdfs:label` → label, `IAO:0000115` → definition
//! - `oboInOwl:has{Exact,Related,Broad,Narrow}Synonym` → synonyms
//! - `oboInOwl:hasAlternativeId` → alternate ids
//! - `owl:deprecated "true"` → obsolete, `IAO:0100001` → replacement
//! - `rdfs:subClassOf <iri>` → parent (anonymous restrictions are skipped)

use crate::model::{Ontology, OntologyBuilder, Term, TermId};
use crate::OntologyError;
use sophia::api::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

pub const RDF_TYPE_IRI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const OBO_PURL_BASE: &str = "http://purl.obolibrary.org/obo/";

const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
const OWL_DEPRECATED: &str = "http://www.w3.org/2002/07/owl#deprecated";
const OWL_VERSION_IRI: &str = "http://www.w3.org/2002/07/owl#versionIRI";
const OWL_VERSION_INFO: &str = "http://www.w3.org/2002/07/owl#versionInfo";
const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
const IAO_DEFINITION: &str = "http://purl.obolibrary.org/obo/IAO_0000115";
const IAO_REPLACED_BY: &str = "http://purl.obolibrary.org/obo/IAO_0100001";
const OBO_IN_OWL: &str = "http://www.geneontology.org/formats/oboInOwl#";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    NTriples,
    Turtle,
    RdfXml,
}

impl RdfFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "nt" | "ntriples" => Some(Self::NTriples),
            "ttl" | "turtle" => Some(Self::Turtle),
            "owl" | "rdf" | "xml" => Some(Self::RdfXml),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::NTriples => "N-Triples",
            Self::Turtle => "Turtle",
            Self::RdfXml => "RDF/XML",
        }
    }
}

// ============================================================================
// Statement model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum RdfNode {
    Iri(String),
    BlankNode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RdfObject {
    Node(RdfNode),
    Literal(String),
}

#[derive(Debug, Clone)]
struct RdfStatement {
    subject: RdfNode,
    predicate_iri: String,
    object: RdfObject,
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct RdfSinkError {
    message: String,
}

/// Parse Sophia's N-Triples-style display form of a term.
fn parse_term_display(term: &str) -> Result<RdfObject, RdfSinkError> {
    let s = term.trim();

    if let Some(iri) = s.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return Ok(RdfObject::Node(RdfNode::Iri(iri.to_string())));
    }
    if let Some(bnode) = s.strip_prefix("_:") {
        return Ok(RdfObject::Node(RdfNode::BlankNode(bnode.to_string())));
    }
    if let Some(body) = s.strip_prefix('"') {
        // Literal text up to the closing quote; language tags and datatypes
        // after it do not matter for annotation values.
        let mut text = String::with_capacity(body.len());
        let mut chars = body.chars();
        while let Some(c) = chars.next() {
            match c {
                '"' => return Ok(RdfObject::Literal(text)),
                '\\' => match chars.next() {
                    Some('n') => text.push('\n'),
                    Some('r') => text.push('\r'),
                    Some('t') => text.push('\t'),
                    Some(other) => text.push(other),
                    None => break,
                },
                c => text.push(c),
            }
        }
        return Err(RdfSinkError {
            message: format!("literal without closing quote: {s}"),
        });
    }

    Err(RdfSinkError {
        message: format!("unsupported RDF term form: {s}"),
    })
}

fn parse_node_display(term: &str) -> Result<RdfNode, RdfSinkError> {
    match parse_term_display(term)? {
        RdfObject::Node(node) => Ok(node),
        RdfObject::Literal(_) => Err(RdfSinkError {
            message: format!("expected IRI or blank node, got literal: {term}"),
        }),
    }
}

macro_rules! collect_triples {
    ($parser:expr, $format:expr) => {{
        let mut out: Vec<RdfStatement> = Vec::new();
        let mut parser = $parser;
        parser
            .try_for_each_triple(|t| -> Result<(), RdfSinkError> {
                let subject = parse_node_display(&t.s().to_string())?;
                let RdfNode::Iri(predicate_iri) = parse_node_display(&t.p().to_string())? else {
                    return Ok(());
                };
                let object = parse_term_display(&t.o().to_string())?;
                out.push(RdfStatement {
                    subject,
                    predicate_iri,
                    object,
                });
                Ok(())
            })
            .map_err(|e| OntologyError::Format {
                format: $format.label(),
                message: e.to_string(),
            })?;
        out
    }};
}

fn parse_statements(bytes: &[u8], format: RdfFormat) -> Result<Vec<RdfStatement>, OntologyError> {
    let reader = std::io::BufReader::new(std::io::Cursor::new(bytes));
    let statements = match format {
        RdfFormat::NTriples => {
            collect_triples!(sophia::turtle::parser::nt::parse_bufread(reader), format)
        }
        RdfFormat::Turtle => {
            collect_triples!(sophia::turtle::parser::turtle::parse_bufread(reader), format)
        }
        RdfFormat::RdfXml => collect_triples!(sophia::xml::parser::parse_bufread(reader), format),
    };
    Ok(statements)
}

// ============================================================================
// Folding statements into a snapshot
// ============================================================================

/// `http://purl.obolibrary.org/obo/HP_0000118` → `HP:0000118`.
pub fn term_id_from_iri(iri: &str) -> TermId {
    let local = iri.rsplit(['#', '/']).next().unwrap_or(iri);
    match local.split_once('_') {
        Some((prefix, rest)) if !prefix.is_empty() && !rest.is_empty() => {
            TermId::new(format!("{prefix}:{rest}"))
        }
        _ => TermId::new(local),
    }
}

/// `http://purl.obolibrary.org/obo/hp/releases/2024-01-16/hp.owl` →
/// `hp/releases/2024-01-16`.
pub fn data_version_from_version_iri(iri: &str) -> String {
    let path = iri.strip_prefix(OBO_PURL_BASE).unwrap_or(iri);
    match path.rsplit_once('/') {
        Some((dir, file)) if file.contains('.') => dir.to_string(),
        _ => path.to_string(),
    }
}

#[derive(Debug, Default)]
struct ClassFacts {
    label: Option<String>,
    definition: Option<String>,
    synonyms: BTreeSet<String>,
    alt_ids: BTreeSet<TermId>,
    deprecated: bool,
    replaced_by: Option<TermId>,
    parents: BTreeSet<TermId>,
}

fn is_synonym_predicate(iri: &str) -> bool {
    matches!(
        iri.strip_prefix(OBO_IN_OWL),
        Some("hasExactSynonym" | "hasRelatedSynonym" | "hasBroadSynonym" | "hasNarrowSynonym")
    )
}

pub fn parse_rdf(bytes: &[u8], format: RdfFormat) -> Result<Ontology, OntologyError> {
    let statements = parse_statements(bytes, format)?;

    let mut classes: BTreeSet<String> = BTreeSet::new();
    let mut ontology_nodes: BTreeSet<RdfNode> = BTreeSet::new();
    let mut facts: BTreeMap<String, ClassFacts> = BTreeMap::new();

    for stmt in &statements {
        if stmt.predicate_iri == RDF_TYPE_IRI {
            match (&stmt.subject, &stmt.object) {
                (RdfNode::Iri(s), RdfObject::Node(RdfNode::Iri(o))) if o == OWL_CLASS => {
                    classes.insert(s.clone());
                }
                (subject, RdfObject::Node(RdfNode::Iri(o))) if o == OWL_ONTOLOGY => {
                    ontology_nodes.insert(subject.clone());
                }
                _ => {}
            }
        }
    }

    let mut version_iri = None;
    let mut version_info = None;

    for stmt in statements {
        if ontology_nodes.contains(&stmt.subject) {
            match (stmt.predicate_iri.as_str(), &stmt.object) {
                (OWL_VERSION_IRI, RdfObject::Node(RdfNode::Iri(iri))) => {
                    version_iri = Some(data_version_from_version_iri(iri));
                }
                (OWL_VERSION_INFO, RdfObject::Literal(text)) => version_info = Some(text.clone()),
                _ => {}
            }
            continue;
        }

        let RdfNode::Iri(subject) = stmt.subject else {
            continue;
        };
        if !classes.contains(&subject) {
            continue;
        }
        let entry = facts.entry(subject).or_default();
        let predicate = stmt.predicate_iri.as_str();

        match stmt.object {
            RdfObject::Literal(text) => match predicate {
                RDFS_LABEL => entry.label = Some(text),
                IAO_DEFINITION => entry.definition = Some(text),
                OWL_DEPRECATED => entry.deprecated = text == "true",
                IAO_REPLACED_BY => entry.replaced_by = Some(TermId::new(text)),
                p if p == format!("{OBO_IN_OWL}hasAlternativeId") => {
                    entry.alt_ids.insert(TermId::new(text));
                }
                p if is_synonym_predicate(p) => {
                    entry.synonyms.insert(text);
                }
                _ => {}
            },
            RdfObject::Node(RdfNode::Iri(iri)) => match predicate {
                RDFS_SUBCLASS_OF => {
                    entry.parents.insert(term_id_from_iri(&iri));
                }
                IAO_REPLACED_BY => entry.replaced_by = Some(term_id_from_iri(&iri)),
                _ => {}
            },
            RdfObject::Node(RdfNode::BlankNode(_)) => {}
        }
    }

    let data_version = version_iri.or(version_info).unwrap_or_else(|| {
        tracing::warn!(format = format.label(), "ontology header has no version IRI or versionInfo");
        String::new()
    });

    let mut builder = OntologyBuilder::new(data_version);
    for iri in classes {
        let id = term_id_from_iri(&iri);
        let class = facts.remove(&iri).unwrap_or_default();
        for parent in class.parents {
            builder.insert_parent(id.clone(), parent);
        }
        builder.insert_term(Term {
            id,
            label: class.label.unwrap_or_default(),
            obsolete: class.deprecated,
            definition: class.definition,
            synonyms: class.synonyms,
            alt_ids: class.alt_ids,
            replaced_by: class.replaced_by,
        });
    }

    Ok(builder.build())
}
