//! Serialization for mined `DenseSubGraph`s: one per line, centers first
//! in ascending id order, followed by `" <--- "` and the sources when
//! they differ from the centers (a lone set denotes a clique).

use std::collections::BTreeSet;

use crate::error::OdsgError;
use crate::graph::Vertex;
use crate::mining::DenseSubGraph;

const SEPARATOR: &str = " <--- ";

fn format_set(set: &BTreeSet<Vertex>) -> String {
    set.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders `dsg` as `centers` alone if it's a clique, else `centers
/// <--- sources`.
pub fn write(dsg: &DenseSubGraph) -> String {
    if dsg.is_clique() {
        format_set(&dsg.centers)
    } else {
        format!("{}{}{}", format_set(&dsg.centers), SEPARATOR, format_set(&dsg.sources))
    }
}

fn parse_set(text: &str, line: usize) -> Result<BTreeSet<Vertex>, OdsgError> {
    text.split_whitespace()
        .map(|tok| {
            tok.parse::<Vertex>().map_err(|_| OdsgError::MalformedInput {
                line,
                detail: format!("'{tok}' is not a valid vertex id"),
            })
        })
        .collect()
}

/// Parses a line written by `write`, reconstructing the `DenseSubGraph`.
/// `line` is only used to annotate errors, 1-indexed.
pub fn parse(text: &str, line: usize) -> Result<DenseSubGraph, OdsgError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(OdsgError::MalformedInput {
            line,
            detail: "empty dsg line".to_string(),
        });
    }

    let dsg = match trimmed.split_once(SEPARATOR) {
        Some((centers_text, sources_text)) => {
            let centers = parse_set(centers_text, line)?;
            let sources = parse_set(sources_text, line)?;
            DenseSubGraph::new(sources, centers)
        }
        None => {
            let centers = parse_set(trimmed, line)?;
            DenseSubGraph::new(centers.clone(), centers)
        }
    };

    if dsg.centers.is_empty() {
        return Err(OdsgError::MalformedInput {
            line,
            detail: "dsg has no centers".to_string(),
        });
    }

    Ok(dsg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(vs: &[Vertex]) -> BTreeSet<Vertex> {
        vs.iter().copied().collect()
    }

    #[test]
    fn clique_round_trips_as_lone_set() {
        let dsg = DenseSubGraph::new(set(&[1, 2, 3]), set(&[1, 2, 3]));
        let line = write(&dsg);
        assert_eq!(line, "1 2 3");
        let parsed = parse(&line, 1).unwrap();
        assert_eq!(parsed, dsg);
    }

    #[test]
    fn non_clique_round_trips_with_separator() {
        let dsg = DenseSubGraph::new(set(&[1, 2]), set(&[3, 4]));
        let line = write(&dsg);
        assert_eq!(line, "3 4 <--- 1 2");
        let parsed = parse(&line, 1).unwrap();
        assert_eq!(parsed, dsg);
    }

    #[test]
    fn empty_line_is_rejected() {
        assert!(parse("", 1).is_err());
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(parse("1 x <--- 1 2", 1).is_err());
    }
}
