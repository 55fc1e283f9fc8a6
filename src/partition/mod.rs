//! Turning a mineable graph into a sequence of clusters.

use std::collections::BTreeMap;

use crate::{
    graph::{Graph, GraphCluster, Vertex},
    hashing::{Shingles, SignatureIndex},
};

/// Which partitioning strategy to use. A small, closed set, modeled as a
/// tagged enum rather than a trait-object hierarchy (see Design Notes).
#[derive(Debug, Clone)]
pub enum Strategy {
    /// One cluster containing every adjacency-list entry.
    None,
    /// Group entries by the first element of their sorted adjacency list.
    InitialOutlink,
    /// Group entries by shared MinHash signature component.
    Signature { k: usize, seed: Option<u64> },
}

/// Produces a sequence of clusters from a mineable graph, honoring a
/// minimum `arcs_count` per emitted cluster by greedily merging
/// consecutive micro-clusters until the threshold is met or the stream is
/// exhausted.
pub struct Partitioner<'g> {
    graph: &'g Graph,
    min_arcs: u64,
    groups: std::vec::IntoIter<Vec<Vertex>>,
}

impl<'g> Partitioner<'g> {
    pub fn new(graph: &'g Graph, strategy: Strategy, min_arcs: u64) -> Self {
        assert!(graph.is_mineable(), "partitioning requires a mineable graph");

        let groups = match strategy {
            Strategy::None => vec![graph.iter().map(|(v, _)| *v).collect()],
            Strategy::InitialOutlink => Self::group_by_initial_outlink(graph),
            Strategy::Signature { k, seed } => Self::group_by_signature(graph, k, seed),
        };

        Self {
            graph,
            min_arcs,
            groups: groups.into_iter(),
        }
    }

    fn group_by_initial_outlink(graph: &Graph) -> Vec<Vec<Vertex>> {
        let mut by_first: BTreeMap<Vertex, Vec<Vertex>> = BTreeMap::new();
        for (&v, list) in graph.iter() {
            // Every list has length >= 2 on a mineable graph, so this never panics.
            let first = list[0];
            by_first.entry(first).or_default().push(v);
        }
        by_first.into_values().collect()
    }

    fn group_by_signature(graph: &Graph, k: usize, seed: Option<u64>) -> Vec<Vec<Vertex>> {
        let keys: Vec<Vertex> = graph.iter().map(|(v, _)| *v).collect();
        let lists: Vec<&[Vertex]> = graph.iter().map(|(_, l)| l.as_slice()).collect();

        let shingles = match seed {
            Some(seed) => Shingles::with_seed(k, seed),
            None => Shingles::new(k),
        };
        let index = SignatureIndex::new(shingles);

        index
            .group(&lists)
            .into_iter()
            .map(|indices| indices.into_iter().map(|i| keys[i]).collect())
            .collect()
    }
}

impl<'g> Iterator for Partitioner<'g> {
    type Item = GraphCluster<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut keys = self.groups.next()?;

        while Self::arcs_of(self.graph, &keys) < self.min_arcs {
            match self.groups.next() {
                Some(more) => keys.extend(more),
                None => break,
            }
        }

        Some(GraphCluster::new(self.graph, keys))
    }
}

impl<'g> Partitioner<'g> {
    fn arcs_of(graph: &Graph, keys: &[Vertex]) -> u64 {
        keys.iter()
            .filter_map(|k| graph.get(*k))
            .map(|l| l.len() as u64)
            .sum()
    }
}
