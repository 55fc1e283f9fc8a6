//! A non-owning view over a subset of a `Graph`'s adjacency-list entries.

use super::{AdjacencyList, Graph, Vertex};

/// A cluster borrows its parent `Graph` and a list of the vertex keys it
/// covers. The parent graph must outlive every cluster built from it.
#[derive(Debug, Clone)]
pub struct GraphCluster<'g> {
    graph: &'g Graph,
    keys: Vec<Vertex>,
}

impl<'g> GraphCluster<'g> {
    pub fn new(graph: &'g Graph, keys: Vec<Vertex>) -> Self {
        Self { graph, keys }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Vertex, &'g AdjacencyList)> + '_ {
        self.keys
            .iter()
            .filter_map(move |k| self.graph.get(*k).map(|l| (*k, l)))
    }

    pub fn lists_count(&self) -> usize {
        self.keys.len()
    }

    pub fn arcs_count(&self) -> u64 {
        self.iter().map(|(_, l)| l.len() as u64).sum()
    }

    pub fn keys(&self) -> &[Vertex] {
        &self.keys
    }
}
