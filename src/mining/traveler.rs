//! `Traveler`: picks the next node on a DAG node's mining path.
//!
//! All three travelers move strictly toward a parent, so the walk they
//! define can never cycle — the DAG's own acyclicity is enough to
//! guarantee termination.

use crate::dag::{NodeIndex, PrefixDag};
use crate::util::sorted_intersection_count;

pub trait Traveler {
    fn next(&self, dag: &PrefixDag, node: NodeIndex) -> Option<NodeIndex>;
}

/// The first parent in list order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyParentTraveler;

impl Traveler for AnyParentTraveler {
    fn next(&self, dag: &PrefixDag, node: NodeIndex) -> Option<NodeIndex> {
        dag.node(node).parents.first().copied()
    }
}

/// Any parent one level shallower than `node`, first in list order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepestParentTraveler;

impl Traveler for DeepestParentTraveler {
    fn next(&self, dag: &PrefixDag, node: NodeIndex) -> Option<NodeIndex> {
        let n = dag.node(node);
        n.parents
            .iter()
            .copied()
            .find(|&p| dag.node(p).max_depth + 1 == n.max_depth)
    }
}

/// The parent sharing the most `vertexes` with `node`, first in list
/// order on ties, short-circuiting once a parent covers every one of
/// `node`'s vertexes (no other parent could possibly share more).
#[derive(Debug, Clone, Copy, Default)]
pub struct SharingMostVertexesParentTraveler;

impl Traveler for SharingMostVertexesParentTraveler {
    fn next(&self, dag: &PrefixDag, node: NodeIndex) -> Option<NodeIndex> {
        let n = dag.node(node);
        // BTreeSet iteration is already sorted ascending, so the merge-style
        // walk applies directly without materializing an intersection set.
        let n_vertexes: Vec<_> = n.vertexes.iter().copied().collect();
        let mut best: Option<(NodeIndex, usize)> = None;

        for &p in &n.parents {
            let p_vertexes: Vec<_> = dag.node(p).vertexes.iter().copied().collect();
            let shared = sorted_intersection_count(&p_vertexes, &n_vertexes);
            if best.map_or(true, |(_, best_shared)| shared > best_shared) {
                best = Some((p, shared));
            }
            if shared == n.vertexes.len() {
                break;
            }
        }

        best.map(|(p, _)| p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, Order};
    use std::collections::BTreeMap;

    fn chain() -> PrefixDag {
        let mut map = BTreeMap::new();
        map.insert(1, vec![2, 3]);
        map.insert(2, vec![1, 3]);
        map.insert(3, vec![1, 2]);
        let mut g = Graph::from_map(map, false);
        g.make_mineable(Order::ById);
        PrefixDag::from_graph(&g)
    }

    #[test]
    fn deepest_parent_walks_up_one_level_at_a_time() {
        let dag = chain();
        let deepest = dag
            .node_cache()
            .iter()
            .copied()
            .max_by_key(|&i| dag.node(i).max_depth)
            .unwrap();

        let t = DeepestParentTraveler;
        let parent = t.next(&dag, deepest).unwrap();
        assert_eq!(dag.node(parent).max_depth, dag.node(deepest).max_depth - 1);
    }

    #[test]
    fn root_has_no_next() {
        let dag = chain();
        let root = dag.roots()[0];
        let t = AnyParentTraveler;
        assert!(t.next(&dag, root).is_none());
    }

    #[test]
    fn sharing_most_vertexes_picks_full_overlap_parent() {
        let dag = chain();
        let deepest = dag
            .node_cache()
            .iter()
            .copied()
            .max_by_key(|&i| dag.node(i).max_depth)
            .unwrap();

        let t = SharingMostVertexesParentTraveler;
        let parent = t.next(&dag, deepest).unwrap();
        assert!(dag.node(parent).parents.len() <= dag.node(deepest).parents.len() + 1);
    }
}
