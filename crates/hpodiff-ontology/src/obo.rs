//! OBO 1.4 flat-file loader.
//!
//! Only the tags the diff needs are interpreted; everything else is skipped.
//! Stanzas other than `[Term]` (e.g. `[Typedef]`) are ignored wholesale.

use crate::model::{Ontology, OntologyBuilder, Term, TermId};
use crate::OntologyError;
use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag, take_while1},
    character::complete::{char as pchar, one_of, space0},
    combinator::{map, opt, recognize, rest, value},
    sequence::{delimited, preceded, separated_pair, terminated},
    IResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stanza {
    Header,
    Term,
    Other,
}

/// Partially read `[Term]` stanza.
#[derive(Debug)]
struct PendingTerm {
    line: usize,
    id: Option<TermId>,
    term: Term,
    parents: Vec<TermId>,
}

impl PendingTerm {
    fn new(line: usize) -> Self {
        Self {
            line,
            id: None,
            term: Term::new("", ""),
            parents: Vec::new(),
        }
    }

    fn finish(self, builder: &mut OntologyBuilder) -> Result<(), OntologyError> {
        let Some(id) = self.id else {
            return Err(OntologyError::Parse {
                line: self.line,
                message: "[Term] stanza without an id".to_string(),
            });
        };
        let mut term = self.term;
        term.id = id.clone();
        for parent in self.parents {
            builder.insert_parent(id.clone(), parent);
        }
        builder.insert_term(term);
        Ok(())
    }
}

pub fn parse_obo(text: &str) -> Result<Ontology, OntologyError> {
    let mut builder = OntologyBuilder::new("");
    let mut data_version: Option<String> = None;
    let mut stanza = Stanza::Header;
    let mut pending: Option<PendingTerm> = None;

    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('!') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            if let Some(done) = pending.take() {
                done.finish(&mut builder)?;
            }
            stanza = if name.trim() == "Term" {
                pending = Some(PendingTerm::new(line_no));
                Stanza::Term
            } else {
                Stanza::Other
            };
            continue;
        }

        let (tag_name, tag_value) = match tag_value_line(line) {
            Ok((_, pair)) => pair,
            Err(_) => {
                return Err(OntologyError::Parse {
                    line: line_no,
                    message: format!("expected `tag: value`, got `{line}`"),
                })
            }
        };

        match stanza {
            Stanza::Header => {
                if tag_name == "data-version" {
                    data_version = Some(tag_value.to_string());
                }
            }
            Stanza::Other => {}
            Stanza::Term => {
                let Some(current) = pending.as_mut() else {
                    continue;
                };
                apply_term_tag(current, tag_name, tag_value).map_err(|message| {
                    OntologyError::Parse {
                        line: line_no,
                        message,
                    }
                })?;
            }
        }
    }

    if let Some(done) = pending.take() {
        done.finish(&mut builder)?;
    }

    match data_version {
        Some(version) => builder.set_data_version(version),
        None => tracing::warn!("OBO header has no data-version tag"),
    }

    Ok(builder.build())
}

fn apply_term_tag(pending: &mut PendingTerm, tag_name: &str, tag_value: &str) -> Result<(), String> {
    let term = &mut pending.term;
    match tag_name {
        "id" => pending.id = Some(TermId::new(first_token(tag_value)?)),
        "name" => term.label = tag_value.to_string(),
        "def" => term.definition = Some(quoted_value(tag_value)?),
        "synonym" => {
            term.synonyms.insert(quoted_value(tag_value)?);
        }
        "alt_id" => {
            term.alt_ids.insert(TermId::new(first_token(tag_value)?));
        }
        "is_a" => pending.parents.push(TermId::new(first_token(tag_value)?)),
        "is_obsolete" => term.obsolete = first_token(tag_value)? == "true",
        "replaced_by" => term.replaced_by = Some(TermId::new(first_token(tag_value)?)),
        _ => {}
    }
    Ok(())
}

// ============================================================================
// Line-level parsers
// ============================================================================

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// `tag: value` with the value taken verbatim (trimmed).
fn tag_value_line(input: &str) -> IResult<&str, (&str, &str)> {
    map(
        separated_pair(take_while1(is_tag_char), terminated(pchar(':'), space0), rest),
        |(t, v): (&str, &str)| (t, v.trim()),
    )(input)
}

/// Quoted OBO string. `\n`, `\t` and `\W` (space) are translated; the other
/// OBO escapes yield the escaped character.
fn quoted(input: &str) -> IResult<&str, String> {
    delimited(
        pchar('"'),
        map(
            opt(escaped_transform(
                is_not("\\\""),
                '\\',
                alt((
                    value("\n", tag("n")),
                    value("\t", tag("t")),
                    value(" ", tag("W")),
                    // `\\ \" \: \, \( \) \[ \] \{ \}` and escaped spaces stand for themselves.
                    recognize(one_of("\\\":,()[]{} ")),
                )),
            )),
            Option::unwrap_or_default,
        ),
        pchar('"'),
    )(input)
}

fn quoted_value(tag_value: &str) -> Result<String, String> {
    preceded(space0, quoted)(tag_value)
        .map(|(_, text)| text)
        .map_err(|_| format!("expected a quoted string, got `{tag_value}`"))
}

/// First whitespace-delimited token; drops `{qualifiers}` and `! comments`.
fn first_token(tag_value: &str) -> Result<&str, String> {
    tag_value
        .split(|c: char| c.is_whitespace() || c == '{' || c == '!')
        .find(|s| !s.is_empty())
        .ok_or_else(|| "missing value".to_string())
}
