//! The dataset-file reader: whitespace-separated interaction lines.

use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read};

use crate::error::OdsgError;
use crate::graph::{EdgeMap, Graph, Vertex, WeightedGraph};

use super::mapping::NameMapping;

struct ParsedLine {
    a: Vertex,
    b: Vertex,
    weight: f64,
}

fn parse_line(line: &str, idx: usize, mapping: &mut NameMapping) -> Result<Option<ParsedLine>, OdsgError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let a = parts.next().ok_or_else(|| OdsgError::MalformedInput {
        line: idx + 1,
        detail: "missing first protein".to_string(),
    })?;
    let b = parts.next().ok_or_else(|| OdsgError::MalformedInput {
        line: idx + 1,
        detail: "missing second protein".to_string(),
    })?;
    let weight = match parts.next() {
        Some(tok) => tok.parse::<f64>().map_err(|_| OdsgError::MalformedInput {
            line: idx + 1,
            detail: format!("'{tok}' is not a valid weight"),
        })?,
        None => 1.0,
    };

    Ok(Some(ParsedLine {
        a: mapping.id_for(a),
        b: mapping.id_for(b),
        weight,
    }))
}

fn finalize(adjacency: BTreeMap<Vertex, Vec<Vertex>>, edges: EdgeMap) -> WeightedGraph {
    WeightedGraph::new(Graph::from_map(adjacency, false), edges)
}

/// Reads the whole dataset file as a single `WeightedGraph`. `#` starts a
/// comment line.
pub fn read(source: impl Read, mapping: &mut NameMapping) -> Result<WeightedGraph, OdsgError> {
    let mut edges = EdgeMap::new();
    let mut adjacency: BTreeMap<Vertex, Vec<Vertex>> = BTreeMap::new();

    for (idx, line) in BufReader::new(source).lines().enumerate() {
        let line = line?;
        let Some(parsed) = parse_line(&line, idx, mapping)? else {
            continue;
        };
        edges.add_edge(parsed.a, parsed.b, parsed.weight);
        adjacency.entry(parsed.a).or_default().push(parsed.b);
        adjacency.entry(parsed.b).or_default().push(parsed.a);
    }

    Ok(finalize(adjacency, edges))
}

/// Reads the dataset file as a sequence of `WeightedGraph`s, where `#`
/// both comments out a line and terminates the current cluster (a new
/// one starts on the next interaction line).
pub fn read_clustered(source: impl Read, mapping: &mut NameMapping) -> Result<Vec<WeightedGraph>, OdsgError> {
    let mut clusters = Vec::new();
    let mut edges = EdgeMap::new();
    let mut adjacency: BTreeMap<Vertex, Vec<Vertex>> = BTreeMap::new();
    let mut has_content = false;

    for (idx, raw_line) in BufReader::new(source).lines().enumerate() {
        let raw_line = raw_line?;
        let trimmed = raw_line.trim();

        if trimmed.starts_with('#') {
            if has_content {
                clusters.push(finalize(std::mem::take(&mut adjacency), std::mem::take(&mut edges)));
                has_content = false;
            }
            continue;
        }

        let Some(parsed) = parse_line(&raw_line, idx, mapping)? else {
            continue;
        };
        edges.add_edge(parsed.a, parsed.b, parsed.weight);
        adjacency.entry(parsed.a).or_default().push(parsed.b);
        adjacency.entry(parsed.b).or_default().push(parsed.a);
        has_content = true;
    }

    if has_content {
        clusters.push(finalize(adjacency, edges));
    }

    Ok(clusters)
}
