//! `Objective`: the ordering a `Miner` walks the traveling path against.

use crate::graph::EdgeMap;

use super::dsg::DenseSubGraph;

/// `better` orders two candidates; `best` optionally recognizes a
/// terminal winner that short-circuits the walk early.
pub trait Objective {
    fn better(&self, cur: &DenseSubGraph, cand: &DenseSubGraph) -> bool;

    fn has_best(&self) -> bool {
        false
    }

    fn best(&self, _dsg: &DenseSubGraph) -> bool {
        false
    }

    /// Whether this objective is compatible with `cliques_only` mining.
    /// Only `AsClique` is.
    fn supports_cliques_only(&self) -> bool {
        false
    }
}

/// `better` iff `cand.centers` is a subset of `cand.sources` (read
/// non-strictly here — unlike `DenseSubGraph::is_as_clique`'s strict
/// classification, a full clique, where the sets are equal, must also
/// count as "better" for the walk to ever reach one; see DESIGN.md).
/// `best` iff the two sets are equal in size (a full clique has been
/// reached). Mandatory when `cliques_only` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsClique;

impl Objective for AsClique {
    fn better(&self, _cur: &DenseSubGraph, cand: &DenseSubGraph) -> bool {
        cand.centers.is_subset(&cand.sources)
    }

    fn has_best(&self) -> bool {
        true
    }

    fn best(&self, dsg: &DenseSubGraph) -> bool {
        dsg.centers.len() == dsg.sources.len()
    }

    fn supports_cliques_only(&self) -> bool {
        true
    }
}

/// `better` iff `cand.arcs_count() > cur.arcs_count()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Legacy;

impl Objective for Legacy {
    fn better(&self, cur: &DenseSubGraph, cand: &DenseSubGraph) -> bool {
        cand.arcs_count() > cur.arcs_count()
    }
}

/// `better` iff `|cand.centers ∩ cand.sources| > |cur.centers ∩ cur.sources|`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxIntersection;

impl Objective for MaxIntersection {
    fn better(&self, cur: &DenseSubGraph, cand: &DenseSubGraph) -> bool {
        let cand_shared = cand.centers.intersection(&cand.sources).count();
        let cur_shared = cur.centers.intersection(&cur.sources).count();
        cand_shared > cur_shared
    }
}

/// Average edge weight over the induced `centers × sources` pairs,
/// excluding any vertex paired with itself. Scores 0 for DSGs with
/// `sources.len() + centers.len() < 5` (suppresses trivially-small
/// candidates).
#[derive(Debug, Clone)]
pub struct SimpleEdgeDensity(pub EdgeMap);

impl Objective for SimpleEdgeDensity {
    fn better(&self, cur: &DenseSubGraph, cand: &DenseSubGraph) -> bool {
        self.0.simple_edge_density(&cand.sources, &cand.centers)
            > self.0.simple_edge_density(&cur.sources, &cur.centers)
    }
}

/// Average edge weight over all unordered pairs in `sources ∪ centers`.
#[derive(Debug, Clone)]
pub struct FullEdgeDensity(pub EdgeMap);

impl Objective for FullEdgeDensity {
    fn better(&self, cur: &DenseSubGraph, cand: &DenseSubGraph) -> bool {
        self.0.full_edge_density(&cand.sources, &cand.centers)
            > self.0.full_edge_density(&cur.sources, &cur.centers)
    }
}

/// Weight-sum over the induced `centers × sources` pairs, normalized by
/// `|sources ∪ centers|`.
#[derive(Debug, Clone)]
pub struct SimpleDegreeDensity(pub EdgeMap);

impl Objective for SimpleDegreeDensity {
    fn better(&self, cur: &DenseSubGraph, cand: &DenseSubGraph) -> bool {
        self.0.simple_degree_density(&cand.sources, &cand.centers)
            > self.0.simple_degree_density(&cur.sources, &cur.centers)
    }
}

/// Weight-sum over all unordered pairs in the union, normalized by
/// `|sources ∪ centers|`.
#[derive(Debug, Clone)]
pub struct FullDegreeDensity(pub EdgeMap);

impl Objective for FullDegreeDensity {
    fn better(&self, cur: &DenseSubGraph, cand: &DenseSubGraph) -> bool {
        self.0.full_degree_density(&cand.sources, &cand.centers)
            > self.0.full_degree_density(&cur.sources, &cur.centers)
    }
}

/// `|sources| * |centers| / |sources ∪ centers|` — the average arc
/// count per distinct node, unweighted. DSGs with `sources.len() +
/// centers.len() < 5` score 0, matching the other density objectives.
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeAndEdge;

impl DegreeAndEdge {
    fn score(dsg: &DenseSubGraph) -> f64 {
        if dsg.sources.len() + dsg.centers.len() < 5 {
            return 0.0;
        }
        let union_len = dsg.union().len();
        if union_len == 0 {
            0.0
        } else {
            (dsg.sources.len() * dsg.centers.len()) as f64 / union_len as f64
        }
    }
}

impl Objective for DegreeAndEdge {
    fn better(&self, cur: &DenseSubGraph, cand: &DenseSubGraph) -> bool {
        Self::score(cand) > Self::score(cur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(vs: &[u32]) -> BTreeSet<u32> {
        vs.iter().copied().collect()
    }

    #[test]
    fn as_clique_better_accepts_full_clique() {
        let o = AsClique;
        let cur = DenseSubGraph::new(set(&[1, 2, 3]), set(&[2, 3]));
        let cand = DenseSubGraph::new(set(&[1, 2, 3]), set(&[1, 2, 3]));
        assert!(o.better(&cur, &cand));
        assert!(o.best(&cand));
    }

    #[test]
    fn as_clique_rejects_non_subset_centers() {
        let o = AsClique;
        let cur = DenseSubGraph::new(set(&[1, 2]), set(&[3, 4]));
        let cand = DenseSubGraph::new(set(&[1, 2, 3]), set(&[3, 4, 5]));
        assert!(!o.better(&cur, &cand));
    }

    #[test]
    fn legacy_prefers_more_arcs() {
        let o = Legacy;
        let cur = DenseSubGraph::new(set(&[1, 2]), set(&[3, 4]));
        let cand = DenseSubGraph::new(set(&[1, 2, 3]), set(&[3, 4, 5]));
        assert!(o.better(&cur, &cand));
    }
}
