//! The in-memory mineable adjacency-list graph.

pub mod cluster;
pub mod weighted;

pub use cluster::GraphCluster;
pub use weighted::{EdgeMap, WeightedGraph};

use std::{
    cmp::Reverse,
    collections::BTreeMap,
    io::{self, BufRead, BufReader, Read},
};

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::error::OdsgError;

/// Vertex identifier: an unsigned integer, totally ordered.
pub type Vertex = u32;

/// An adjacency list: a finite, ordered sequence of distinct vertices.
pub type AdjacencyList = Vec<Vertex>;

/// Monotone lifecycle of a `Graph`'s mineability. Only ever advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Mineability {
    Raw,
    Trimmed,
    Sorted,
}

/// A total order over vertices, used to sort adjacency lists so that a
/// prefix-DAG built from them cannot contain a cycle.
#[derive(Debug, Clone)]
pub enum Order {
    /// Ascending vertex id.
    ById,
    /// Descending inlink frequency, ties broken by ascending id.
    ByFrequencyThenId,
    /// A uniformly random bijection over the vertex set, seeded for
    /// reproducibility.
    RandomPermutation { seed: u64 },
}

/// The mineable adjacency-list graph: a mapping from `Vertex` to its
/// `AdjacencyList`.
///
/// It is the caller's responsibility to ensure the lists passed to
/// `Graph::load`/`from_map` contain no duplicate entries and that no
/// vertex key repeats; violating this is undefined behaviour for the
/// mining core, matching the original implementation's contract.
#[derive(Debug, Clone)]
pub struct Graph {
    inner: BTreeMap<Vertex, AdjacencyList>,
    sorted_by_vertex: bool,
    mineability: Mineability,
}

impl Graph {
    /// An empty graph; mineable by definition.
    pub fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
            sorted_by_vertex: true,
            mineability: Mineability::Sorted,
        }
    }

    /// Build directly from a vertex -> adjacency-list mapping, e.g. when
    /// adapting data from another representation.
    pub fn from_map(map: BTreeMap<Vertex, AdjacencyList>, come_sorted_by_vertex: bool) -> Self {
        Self {
            inner: map,
            sorted_by_vertex: come_sorted_by_vertex,
            mineability: Mineability::Raw,
        }
    }

    /// Parse the adjacency-list text format: one `vertex: v1 v2 v3 ...`
    /// line per vertex, `#` starting a comment line, blank lines ignored.
    pub fn load(source: impl Read, come_sorted_by_vertex: bool) -> Result<Self, OdsgError> {
        let mut inner = BTreeMap::new();

        for (idx, line) in BufReader::new(source).lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (head, rest) = line.split_once(':').ok_or_else(|| OdsgError::MalformedInput {
                line: idx + 1,
                detail: "missing ':' adjacency-list delimiter".to_string(),
            })?;

            let vertex: Vertex = head.trim().parse().map_err(|_| OdsgError::MalformedInput {
                line: idx + 1,
                detail: format!("'{}' is not a valid vertex id", head.trim()),
            })?;

            if inner.contains_key(&vertex) {
                return Err(OdsgError::MalformedInput {
                    line: idx + 1,
                    detail: format!("duplicate vertex key {vertex}"),
                });
            }

            let outlinks = rest
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<Vertex>().map_err(|_| OdsgError::MalformedInput {
                        line: idx + 1,
                        detail: format!("'{tok}' is not a valid vertex id"),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            inner.insert(vertex, outlinks);
        }

        Ok(Self {
            inner,
            sorted_by_vertex: come_sorted_by_vertex,
            mineability: Mineability::Raw,
        })
    }

    /// Construct a standalone `Graph` from one of its own clusters. The
    /// cluster is assumed to come from an already-mineable graph.
    pub fn from_cluster(cluster: &GraphCluster<'_>) -> Self {
        let mut inner = BTreeMap::new();
        for (vertex, list) in cluster.iter() {
            inner.insert(vertex, list.clone());
        }
        Self {
            inner,
            sorted_by_vertex: false,
            mineability: Mineability::Sorted,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Vertex, &AdjacencyList)> {
        self.inner.iter()
    }

    pub fn get(&self, vertex: Vertex) -> Option<&AdjacencyList> {
        self.inner.get(&vertex)
    }

    pub fn is_mineable(&self) -> bool {
        self.mineability == Mineability::Sorted
    }

    pub fn is_sorted_by_vertex(&self) -> bool {
        self.sorted_by_vertex
    }

    pub fn mineability(&self) -> Mineability {
        self.mineability
    }

    pub fn lists_count(&self) -> usize {
        self.inner.len()
    }

    /// O(arcs): the number of distinct vertices appearing anywhere (as a
    /// key or within some adjacency list).
    pub fn nodes_count(&self) -> usize {
        let mut nodes = std::collections::BTreeSet::new();
        for (&v, list) in &self.inner {
            nodes.insert(v);
            nodes.extend(list.iter().copied());
        }
        nodes.len()
    }

    pub fn arcs_count(&self) -> u64 {
        self.inner.values().map(|l| l.len() as u64).sum()
    }

    /// Self-loop insertion and trivial-list removal, without sorting.
    /// Exposed so frequency-based orderings can be computed on the
    /// trimmed graph.
    pub fn rebuild_except_sorting(&mut self) {
        if self.mineability >= Mineability::Trimmed {
            return;
        }

        let mut to_remove = Vec::new();
        for (&vertex, outlinks) in self.inner.iter_mut() {
            if !outlinks.is_empty() && !outlinks.contains(&vertex) {
                if self.sorted_by_vertex {
                    let pos = outlinks.partition_point(|&v| v <= vertex);
                    outlinks.insert(pos, vertex);
                } else {
                    outlinks.push(vertex);
                }
            }
            if outlinks.len() <= 1 {
                to_remove.push(vertex);
            }
        }
        for vertex in to_remove {
            self.inner.remove(&vertex);
        }

        self.mineability = Mineability::Trimmed;
    }

    /// Idempotent transition to a fully mineable graph: self-loops
    /// inserted, trivial lists dropped, every remaining list sorted
    /// under `order`.
    pub fn make_mineable(&mut self, order: Order) {
        if self.is_mineable() {
            return;
        }

        self.rebuild_except_sorting();
        self.sort_lists(order);
        self.mineability = Mineability::Sorted;
    }

    fn sort_lists(&mut self, order: Order) {
        match order {
            Order::ById => {
                for list in self.inner.values_mut() {
                    list.sort_unstable();
                }
                self.sorted_by_vertex = true;
            }
            Order::ByFrequencyThenId => {
                let mut frequencies: BTreeMap<Vertex, u64> = BTreeMap::new();
                for list in self.inner.values() {
                    for &v in list {
                        *frequencies.entry(v).or_default() += 1;
                    }
                }
                for list in self.inner.values_mut() {
                    list.sort_unstable_by_key(|v| (Reverse(frequencies[v]), *v));
                }
                self.sorted_by_vertex = false;
            }
            Order::RandomPermutation { seed } => {
                let mut all_vertices: std::collections::BTreeSet<Vertex> =
                    std::collections::BTreeSet::new();
                for (&v, list) in &self.inner {
                    all_vertices.insert(v);
                    all_vertices.extend(list.iter().copied());
                }
                let mut nodes: Vec<Vertex> = all_vertices.into_iter().collect();

                let mut rng = StdRng::seed_from_u64(seed);
                nodes.shuffle(&mut rng);
                let permutation: BTreeMap<Vertex, usize> =
                    nodes.into_iter().enumerate().map(|(i, v)| (v, i)).collect();

                for list in self.inner.values_mut() {
                    list.sort_unstable_by_key(|v| permutation[v]);
                }
                self.sorted_by_vertex = false;
            }
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
