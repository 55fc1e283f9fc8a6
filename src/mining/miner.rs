//! `Miner`: walks a `PrefixDag` with a `Traveler` and an `Objective`,
//! producing a `MaximalSet` of dense subgraphs.

use crate::dag::PrefixDag;
use crate::error::OdsgError;

use super::dsg::DenseSubGraph;
use super::maximal_set::{MaximalSet, SupersedeMode};
use super::objective::Objective;
use super::traveler::Traveler;

pub struct Miner<'a> {
    dag: &'a PrefixDag,
    traveler: &'a dyn Traveler,
    objective: &'a dyn Objective,
    cliques_only: bool,
    min_arcs: u64,
}

impl<'a> Miner<'a> {
    pub fn new(
        dag: &'a PrefixDag,
        traveler: &'a dyn Traveler,
        objective: &'a dyn Objective,
        cliques_only: bool,
        min_arcs: u64,
    ) -> Result<Self, OdsgError> {
        if cliques_only && !objective.supports_cliques_only() {
            return Err(OdsgError::InvalidState(
                "cliques_only mining requires the as-clique objective".to_string(),
            ));
        }
        Ok(Self {
            dag,
            traveler,
            objective,
            cliques_only,
            min_arcs,
        })
    }

    /// Mines the whole DAG. Panics (via `assert!`) if another `Miner` is
    /// already running against the same DAG — see
    /// `PrefixDag::begin_mining`.
    pub fn mine(&self) -> MaximalSet {
        assert!(
            self.dag.begin_mining(),
            "no two miners may run concurrently on the same PrefixDag"
        );

        for &idx in self.dag.node_cache() {
            let node = self.dag.node(idx);
            let next = self.traveler.next(self.dag, idx);
            debug_assert!(
                next.is_some() || node.is_root(),
                "every non-root node must have a traveling_next"
            );
            node.set_traveling_next(next);
        }

        let mode = if self.cliques_only {
            SupersedeMode::CentersOnly
        } else {
            SupersedeMode::Full
        };
        let mut result = MaximalSet::new(mode);

        for &idx in self.dag.node_cache() {
            let node = self.dag.node(idx);
            if node.is_root() {
                continue;
            }

            if let Some(cur) = self.walk_from(idx) {
                result.insert(cur);
            }
        }

        self.dag.end_mining();
        result
    }

    /// Builds the candidate DSG rooted at `idx` by walking its traveling
    /// path, returning `None` if the result fails the final rejection
    /// checks.
    ///
    /// The first hop is always taken (a single-center DSG is never
    /// useful on its own, so there is nothing to compare it against);
    /// from the second hop on, a further merge is only adopted while it
    /// remains valid (`sources` not collapsed to a singleton — sources
    /// only ever shrink along the path, so once this happens no further
    /// hop can help) and the objective judges it no worse than stopping.
    fn walk_from(&self, idx: crate::dag::NodeIndex) -> Option<DenseSubGraph> {
        let node = self.dag.node(idx);
        let mut cur = DenseSubGraph::singleton_center(node.vertexes.clone(), node.label);
        let mut cursor = idx;

        while let Some(p) = self.dag.node(cursor).traveling_next() {
            let parent = self.dag.node(p);
            let mut cand = DenseSubGraph::singleton_center(parent.vertexes.clone(), parent.label);
            cand.merge(&cur);

            if cand.sources.len() <= 1 {
                break;
            }
            if cur.centers.len() > 1 && !self.objective.better(&cur, &cand) {
                break;
            }

            cur = cand;
            cursor = p;

            if self.objective.has_best() && self.objective.best(&cur) {
                break;
            }
        }

        if cur.centers.len() == 1 || cur.sources.len() <= 1 || cur.arcs_count() < self.min_arcs {
            None
        } else {
            Some(cur)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, Order};
    use crate::mining::objective::{AsClique, MaxIntersection};
    use crate::mining::traveler::DeepestParentTraveler;
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

    fn biclique_source() -> Graph {
        let mut map = BTreeMap::new();
        map.insert(1, vec![3, 4]);
        map.insert(2, vec![3, 4]);
        map.insert(3, vec![]);
        map.insert(4, vec![]);
        let mut g = Graph::from_map(map, false);
        g.make_mineable(Order::ById);
        g
    }

    #[test]
    fn s1_trivial_clique() {
        let g = triangle();
        let dag = PrefixDag::from_graph(&g);
        let traveler = DeepestParentTraveler;
        let objective = AsClique;
        let miner = Miner::new(&dag, &traveler, &objective, false, 1).unwrap();
        let result = miner.mine();

        assert_eq!(result.len(), 1);
        let dsg = result.iter().next().unwrap();
        let full: std::collections::BTreeSet<u32> = [1, 2, 3].into_iter().collect();
        assert_eq!(dsg.sources, full);
        assert_eq!(dsg.centers, full);
        assert!(dsg.is_clique());
    }

    #[test]
    fn s2_biclique() {
        let g = biclique_source();
        let dag = PrefixDag::from_graph(&g);
        let traveler = DeepestParentTraveler;
        let objective = MaxIntersection;
        let miner = Miner::new(&dag, &traveler, &objective, false, 1).unwrap();
        let result = miner.mine();

        assert_eq!(result.len(), 1);
        let dsg = result.iter().next().unwrap();
        let sources: std::collections::BTreeSet<u32> = [1, 2].into_iter().collect();
        let centers: std::collections::BTreeSet<u32> = [3, 4].into_iter().collect();
        assert_eq!(dsg.sources, sources);
        assert_eq!(dsg.centers, centers);
        assert!(dsg.is_biclique());
    }

    #[test]
    fn cliques_only_rejects_non_as_clique_objective() {
        let g = triangle();
        let dag = PrefixDag::from_graph(&g);
        let traveler = DeepestParentTraveler;
        let objective = MaxIntersection;
        let err = Miner::new(&dag, &traveler, &objective, true, 1).unwrap_err();
        assert!(matches!(err, OdsgError::InvalidState(_)));
    }

    #[test]
    fn cliques_only_output_has_centers_subset_of_sources() {
        let g = triangle();
        let dag = PrefixDag::from_graph(&g);
        let traveler = DeepestParentTraveler;
        let objective = AsClique;
        let miner = Miner::new(&dag, &traveler, &objective, true, 1).unwrap();
        let result = miner.mine();
        for dsg in result.iter() {
            assert!(dsg.centers.is_subset(&dsg.sources));
        }
    }
}
