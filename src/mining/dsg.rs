//! `DenseSubGraph`: the `(sources, centers)` pair mined from a prefix-DAG.

use std::collections::BTreeSet;

use crate::graph::Vertex;

/// Derived classification of a `DenseSubGraph`, computed from its sets
/// rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Clique,
    AsClique,
    Biclique,
    Generic,
}

/// A candidate dense subgraph: a set of `sources` (the DAG path's vertex
/// inlinks) and a set of `centers` (the node labels folded into it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseSubGraph {
    pub sources: BTreeSet<Vertex>,
    pub centers: BTreeSet<Vertex>,
    pub density: Option<f64>,
}

impl DenseSubGraph {
    pub fn new(sources: BTreeSet<Vertex>, centers: BTreeSet<Vertex>) -> Self {
        Self {
            sources,
            centers,
            density: None,
        }
    }

    /// The starting DSG for a single DAG node: all of its inlinks as
    /// sources, its own label as the lone center.
    pub fn singleton_center(sources: BTreeSet<Vertex>, center: Vertex) -> Self {
        let mut centers = BTreeSet::new();
        centers.insert(center);
        Self::new(sources, centers)
    }

    pub fn arcs_count(&self) -> u64 {
        self.sources.len() as u64 * self.centers.len() as u64
    }

    pub fn is_clique(&self) -> bool {
        self.sources == self.centers
    }

    pub fn is_as_clique(&self) -> bool {
        self.centers.is_subset(&self.sources) && self.centers != self.sources
    }

    pub fn is_biclique(&self) -> bool {
        self.sources.is_disjoint(&self.centers)
    }

    pub fn classification(&self) -> Classification {
        if self.is_clique() {
            Classification::Clique
        } else if self.is_as_clique() {
            Classification::AsClique
        } else if self.is_biclique() {
            Classification::Biclique
        } else {
            Classification::Generic
        }
    }

    pub fn union(&self) -> BTreeSet<Vertex> {
        self.sources.union(&self.centers).copied().collect()
    }

    /// Intersects `sources` with `other.sources`, unions `centers` with
    /// `other.centers`. Monotone: sources only shrink, centers only grow.
    pub fn merge(&mut self, other: &DenseSubGraph) -> &mut Self {
        self.sources = self.sources.intersection(&other.sources).copied().collect();
        self.centers.extend(other.centers.iter().copied());
        self.density = None;
        self
    }

    /// Does `self` supersede `other` in full mode: does it cover at least
    /// as much of both `sources` and `centers`?
    pub fn includes(&self, other: &DenseSubGraph) -> bool {
        other.sources.is_subset(&self.sources) && other.centers.is_subset(&self.centers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(vs: &[Vertex]) -> BTreeSet<Vertex> {
        vs.iter().copied().collect()
    }

    #[test]
    fn classification_matches_set_relations() {
        let clique = DenseSubGraph::new(set(&[1, 2, 3]), set(&[1, 2, 3]));
        assert_eq!(clique.classification(), Classification::Clique);

        let as_clique = DenseSubGraph::new(set(&[1, 2, 3]), set(&[1, 2]));
        assert_eq!(as_clique.classification(), Classification::AsClique);

        let biclique = DenseSubGraph::new(set(&[1, 2]), set(&[3, 4]));
        assert_eq!(biclique.classification(), Classification::Biclique);

        let generic = DenseSubGraph::new(set(&[1, 2, 3]), set(&[3, 4]));
        assert_eq!(generic.classification(), Classification::Generic);
    }

    #[test]
    fn merge_intersects_sources_and_unions_centers() {
        let mut a = DenseSubGraph::new(set(&[1, 2, 3]), set(&[4, 5]));
        let b = DenseSubGraph::new(set(&[2, 3, 6]), set(&[5, 7]));
        a.merge(&b);
        assert_eq!(a.sources, set(&[2, 3]));
        assert_eq!(a.centers, set(&[4, 5, 7]));
    }

    #[test]
    fn arcs_count_subadditive_under_merge() {
        let mut a = DenseSubGraph::new(set(&[1, 2, 3]), set(&[4]));
        let b = DenseSubGraph::new(set(&[2, 3]), set(&[5]));
        let before = a.arcs_count() + b.arcs_count();
        a.merge(&b);
        assert!(a.arcs_count() <= before);
    }

    #[test]
    fn includes_requires_both_sets_to_cover() {
        let big = DenseSubGraph::new(set(&[1, 2, 3]), set(&[4, 5]));
        let small = DenseSubGraph::new(set(&[1, 2, 3]), set(&[4]));
        assert!(big.includes(&small));
        assert!(!small.includes(&big));
    }
}
