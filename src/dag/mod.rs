//! Prefix-DAGs built from a mineable graph (or one of its clusters).

use std::cell::Cell;
use std::collections::{BTreeSet, HashMap, VecDeque};

use xxhash_rust::xxh3::Xxh3Builder;

use crate::graph::{EdgeMap, Graph, GraphCluster, Vertex, WeightedGraph};

/// An index into a `PrefixDag`'s node arena.
pub type NodeIndex = usize;

/// A node in a prefix-DAG, labeled by the vertex it represents in the
/// source graph.
///
/// `children`/`parents` are arena indices, not owned references — the
/// arena (`PrefixDag`) is the sole owner of every node. The
/// `traveling_next` cache is the one field a `Miner` mutates through a
/// shared reference while mining is in progress (see `crate::mining`).
#[derive(Debug)]
pub struct DagNode {
    pub label: Vertex,
    pub vertexes: BTreeSet<Vertex>,
    pub children: Vec<NodeIndex>,
    pub parents: Vec<NodeIndex>,
    pub max_depth: u32,
    traveling_next: Cell<Option<NodeIndex>>,
}

impl DagNode {
    fn new(label: Vertex) -> Self {
        Self {
            label,
            vertexes: BTreeSet::new(),
            children: Vec::new(),
            parents: Vec::new(),
            max_depth: 1,
            traveling_next: Cell::new(None),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn traveling_next(&self) -> Option<NodeIndex> {
        self.traveling_next.get()
    }

    /// Only a `Miner` that owns the active mining pass should call this.
    pub fn set_traveling_next(&self, next: Option<NodeIndex>) {
        self.traveling_next.set(next);
    }
}

/// A prefix-DAG: a collection of `DagNode`s, a topologically-sorted node
/// cache, the set of root nodes, and the maximum `max_depth` seen.
pub struct PrefixDag {
    nodes: Vec<DagNode>,
    node_cache: Vec<NodeIndex>,
    roots: Vec<NodeIndex>,
    max_depth: u32,
    edges: Option<EdgeMap>,
    mining_in_progress: Cell<bool>,
}

impl PrefixDag {
    pub fn from_graph(graph: &Graph) -> Self {
        Self::build(graph.iter().map(|(v, l)| (*v, l.as_slice())), graph.is_sorted_by_vertex())
    }

    pub fn from_cluster(cluster: &GraphCluster<'_>) -> Self {
        let entries: Vec<(Vertex, Vec<Vertex>)> =
            cluster.iter().map(|(v, l)| (v, l.clone())).collect();
        Self::build(
            entries.iter().map(|(v, l)| (*v, l.as_slice())),
            false,
        )
    }

    pub fn from_weighted_graph(graph: &WeightedGraph) -> Self {
        let mut dag = Self::from_graph(&graph.graph);
        dag.edges = Some(graph.edges.clone());
        dag
    }

    fn build<'a>(entries: impl Iterator<Item = (Vertex, &'a [Vertex])>, sorted_by_vertex: bool) -> Self {
        let mut nodes: Vec<DagNode> = Vec::new();
        let mut index_of: HashMap<Vertex, NodeIndex, Xxh3Builder> = HashMap::default();
        let mut edges_seen: std::collections::HashSet<(NodeIndex, NodeIndex), Xxh3Builder> =
            std::collections::HashSet::default();
        let mut is_head_somewhere: BTreeSet<Vertex> = BTreeSet::new();
        let mut is_nonhead_somewhere: BTreeSet<Vertex> = BTreeSet::new();
        let mut lists_count = 0usize;

        let mut get_or_create = |label: Vertex, nodes: &mut Vec<DagNode>, index_of: &mut HashMap<Vertex, NodeIndex, Xxh3Builder>| -> NodeIndex {
            *index_of.entry(label).or_insert_with(|| {
                nodes.push(DagNode::new(label));
                nodes.len() - 1
            })
        };

        for (v, list) in entries {
            lists_count += 1;
            let mut prev: Option<NodeIndex> = None;
            for (i, &u) in list.iter().enumerate() {
                let node_idx = get_or_create(u, &mut nodes, &mut index_of);
                nodes[node_idx].vertexes.insert(v);

                if i == 0 {
                    is_head_somewhere.insert(u);
                } else {
                    is_nonhead_somewhere.insert(u);
                }

                if let Some(parent_idx) = prev {
                    if edges_seen.insert((parent_idx, node_idx)) {
                        nodes[parent_idx].children.push(node_idx);
                        nodes[node_idx].parents.push(parent_idx);
                    }
                }
                prev = Some(node_idx);
            }
        }

        let roots: Vec<NodeIndex> = is_head_somewhere
            .difference(&is_nonhead_somewhere)
            .filter_map(|label| index_of.get(label).copied())
            .collect();

        debug_assert!(
            roots.len() <= lists_count,
            "a prefix-DAG cannot have more roots than source lists"
        );
        for &root in &roots {
            debug_assert!(nodes[root].parents.is_empty());
        }

        let node_cache = if sorted_by_vertex {
            let mut cache: Vec<NodeIndex> = (0..nodes.len()).collect();
            cache.sort_unstable_by_key(|&i| nodes[i].label);
            cache
        } else {
            Self::generic_topological_order(&nodes)
        };

        debug_assert_eq!(node_cache.len(), nodes.len());
        Self::assert_topological(&nodes, &node_cache);

        let max_depth = Self::compute_max_depths(&mut nodes, &node_cache);

        for &root in &roots {
            debug_assert_eq!(nodes[root].max_depth, 1);
        }
        for (idx, node) in nodes.iter().enumerate() {
            if node.max_depth == 1 {
                debug_assert!(roots.contains(&idx), "only roots may have max_depth == 1");
            }
        }

        Self {
            nodes,
            node_cache,
            roots,
            max_depth,
            edges: None,
            mining_in_progress: Cell::new(false),
        }
    }

    /// Kahn's algorithm over the arena's own child/parent edges, used
    /// when the source graph's lists are not sorted ascending by vertex
    /// (so the label order is not already a valid topological order).
    fn generic_topological_order(nodes: &[DagNode]) -> Vec<NodeIndex> {
        let mut in_degree: Vec<usize> = nodes.iter().map(|n| n.parents.len()).collect();
        let mut queue: VecDeque<NodeIndex> = in_degree
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d == 0)
            .map(|(i, _)| i)
            .collect();

        let mut order = Vec::with_capacity(nodes.len());
        while let Some(n) = queue.pop_front() {
            order.push(n);
            for &c in &nodes[n].children {
                in_degree[c] -= 1;
                if in_degree[c] == 0 {
                    queue.push_back(c);
                }
            }
        }

        debug_assert_eq!(
            order.len(),
            nodes.len(),
            "prefix-DAG construction produced a cycle"
        );
        order
    }

    fn assert_topological(nodes: &[DagNode], cache: &[NodeIndex]) {
        if cfg!(debug_assertions) {
            let mut position = vec![0usize; nodes.len()];
            for (pos, &idx) in cache.iter().enumerate() {
                position[idx] = pos;
            }
            for (idx, node) in nodes.iter().enumerate() {
                for &parent in &node.parents {
                    debug_assert!(position[parent] < position[idx]);
                }
            }
        }
    }

    fn compute_max_depths(nodes: &mut [DagNode], cache: &[NodeIndex]) -> u32 {
        let mut max_seen = 1;
        for &idx in cache {
            let depth = {
                let node = &nodes[idx];
                if node.parents.is_empty() {
                    1
                } else {
                    1 + node
                        .parents
                        .iter()
                        .map(|&p| nodes[p].max_depth)
                        .max()
                        .unwrap()
                }
            };
            nodes[idx].max_depth = depth;
            max_seen = max_seen.max(depth);
        }
        max_seen
    }

    pub fn node(&self, idx: NodeIndex) -> &DagNode {
        &self.nodes[idx]
    }

    /// Nodes in topological order: for every arc `p -> c`, `p` precedes
    /// `c`.
    pub fn node_cache(&self) -> &[NodeIndex] {
        &self.node_cache
    }

    pub fn roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn arcs_count(&self) -> u64 {
        self.nodes.iter().map(|n| n.children.len() as u64).sum()
    }

    pub fn edges(&self) -> Option<&EdgeMap> {
        self.edges.as_ref()
    }

    pub fn is_mining_in_progress(&self) -> bool {
        self.mining_in_progress.get()
    }

    /// Acquire the single mining slot for this DAG. Returns `false` (and
    /// acquires nothing) if a miner is already running against it — no
    /// two miners may operate concurrently on the same DAG, since the
    /// traveling cache is shared mutable state.
    pub fn begin_mining(&self) -> bool {
        if self.mining_in_progress.get() {
            false
        } else {
            self.mining_in_progress.set(true);
            true
        }
    }

    pub fn end_mining(&self) {
        self.mining_in_progress.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Order;
    use std::collections::BTreeMap;

    fn triangle() -> Graph {
        let mut map = BTreeMap::new();
        map.insert(1, vec![2, 3]);
        map.insert(2, vec![1, 3]);
        map.insert(3, vec![1, 2]);
        let mut g = Graph::from_map(map, false);
        g.make_mineable(Order::ById);
        g
    }

    #[test]
    fn is_acyclic_and_topologically_cached() {
        let g = triangle();
        let dag = PrefixDag::from_graph(&g);

        let mut position = vec![0usize; dag.nodes_count()];
        for (pos, &idx) in dag.node_cache().iter().enumerate() {
            position[idx] = pos;
        }
        for idx in 0..dag.nodes_count() {
            for &parent in &dag.node(idx).parents {
                assert!(position[parent] < position[idx]);
            }
        }
    }

    #[test]
    fn max_depth_matches_recurrence() {
        let g = triangle();
        let dag = PrefixDag::from_graph(&g);

        for &idx in dag.node_cache() {
            let node = dag.node(idx);
            if node.parents.is_empty() {
                assert_eq!(node.max_depth, 1);
            } else {
                let expected = 1 + node
                    .parents
                    .iter()
                    .map(|&p| dag.node(p).max_depth)
                    .max()
                    .unwrap();
                assert_eq!(node.max_depth, expected);
            }
        }
    }

    #[test]
    fn roots_have_no_parents_and_depth_one() {
        let g = triangle();
        let dag = PrefixDag::from_graph(&g);
        for &root in dag.roots() {
            assert!(dag.node(root).is_root());
            assert_eq!(dag.node(root).max_depth, 1);
        }
        assert!(dag.roots().len() <= g.lists_count());
    }

    #[test]
    fn mining_lock_excludes_concurrent_miners() {
        let g = triangle();
        let dag = PrefixDag::from_graph(&g);
        assert!(dag.begin_mining());
        assert!(!dag.begin_mining());
        dag.end_mining();
        assert!(dag.begin_mining());
    }
}
