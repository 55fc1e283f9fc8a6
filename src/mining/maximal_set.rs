//! `MaximalSet`: a collection of `DenseSubGraph`s kept maximal on insert.

use super::dsg::DenseSubGraph;

/// How two DSGs are compared for supersedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupersedeMode {
    /// `a` supersedes `b` iff `a.sources ⊇ b.sources ∧ a.centers ⊇ b.centers`.
    Full,
    /// `a` supersedes `b` iff `a.centers ⊇ b.centers`, ignoring sources.
    ///
    /// Used when mining cliques only. This is deliberately asymmetric:
    /// two DSGs with equal centers but different sources are treated as
    /// duplicates and one is evicted, losing the source distinction —
    /// preserved from the original behavior, not a bug.
    CentersOnly,
}

/// A set of `DenseSubGraph`s such that no element supersedes another,
/// under a configurable `SupersedeMode`.
#[derive(Debug, Clone)]
pub struct MaximalSet {
    mode: SupersedeMode,
    dsgs: Vec<DenseSubGraph>,
}

impl MaximalSet {
    pub fn new(mode: SupersedeMode) -> Self {
        Self {
            mode,
            dsgs: Vec::new(),
        }
    }

    fn supersedes(&self, a: &DenseSubGraph, b: &DenseSubGraph) -> bool {
        match self.mode {
            SupersedeMode::Full => a.includes(b),
            SupersedeMode::CentersOnly => b.centers.is_subset(&a.centers),
        }
    }

    /// Discards `dsg` if any existing element already supersedes it;
    /// otherwise inserts it and evicts every existing element it
    /// supersedes. Returns whether `dsg` was inserted.
    pub fn insert(&mut self, dsg: DenseSubGraph) -> bool {
        if self.dsgs.iter().any(|existing| self.supersedes(existing, &dsg)) {
            return false;
        }
        self.dsgs.retain(|existing| !self.supersedes(&dsg, existing));
        self.dsgs.push(dsg);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &DenseSubGraph> {
        self.dsgs.iter()
    }

    pub fn into_vec(self) -> Vec<DenseSubGraph> {
        self.dsgs
    }

    pub fn len(&self) -> usize {
        self.dsgs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dsgs.is_empty()
    }

    /// Merges `other`'s elements into `self`, one insert at a time.
    pub fn extend(&mut self, other: MaximalSet) {
        for dsg in other.into_vec() {
            self.insert(dsg);
        }
    }
}
